//! In-memory representation of a single parsed Syslog message.

use crate::facility::Facility;
use crate::severity::Severity;

/// The fields of one RFC 3164 message, in wire order. Borrows from the message it was
/// parsed out of; produced fresh per [`parse`](crate::parse) call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedMessage<'a> {
    pub facility: Facility,
    pub severity: Severity,
    /// `Mmm dd`. Single-digit days keep their padding space, e.g. `Jan  1`.
    pub date: &'a str,
    /// `hh:mm:ss`.
    pub time: &'a str,
    /// Not validated; whatever the origin put there (DNS name or IP).
    pub hostname: &'a str,
    /// Includes the terminating non-alphanumeric character when one was found
    /// within the length bound.
    pub tag: &'a str,
    /// Everything after the tag, verbatim, leading whitespace included.
    pub content: &'a str,
}
