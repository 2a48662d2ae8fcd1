//! Decomposition of conformant messages into their fields.

use crate::message::ParsedMessage;
use crate::{Error, Facility, Severity, MAX_TAG_LEN, TIMESTAMP_LEN};

/// Split a conformant message into the seven RFC 3164 fields.
///
/// The input must already satisfy [`validate`](crate::validate)'s guarantee: a grammatical
/// PRI at the start of the message and the fixed-width timestamp right behind it. Nothing is
/// re-checked here. Input that never went through the validator gets an [`Error`] instead of
/// an out-of-bounds read, but which error — and whether the fields of a near-conformant
/// message come out meaningful — is unspecified.
///
/// # Example
///
/// ```
/// let msg = syslog3164::parse("<34>Oct 11 22:14:15 mymachine su: 'su root' failed").unwrap();
///
/// assert_eq!(msg.hostname, "mymachine");
/// assert_eq!(msg.tag, "su:");
/// ```
pub fn parse(message: &str) -> Result<ParsedMessage<'_>, Error> {
    let buf = message.as_bytes();

    // PRI: everything up to the first `>`, angle brackets stripped.
    let close = buf
        .iter()
        .position(|&ch| ch == b'>')
        .ok_or(Error::UnexpectedEndOfInput)?;
    let prival: i32 = message
        .get(1..close)
        .ok_or(Error::UnexpectedEndOfInput)?
        .parse()?;
    let severity = Severity::try_from(prival & 0x7)?;
    let facility = Facility::try_from(prival >> 3)?;

    // TIMESTAMP: fixed width, no scanning. Date and time are cut straight out of the
    // window, so a space-padded single-digit day comes out as `Jan  1`, matching the wire
    // bytes exactly.
    let mut offset = close + 1;
    let timestamp = message
        .get(offset..offset + TIMESTAMP_LEN)
        .ok_or(Error::UnexpectedEndOfInput)?;
    let date = timestamp.get(..6).ok_or(Error::UnexpectedEndOfInput)?;
    let time = timestamp.get(7..).ok_or(Error::UnexpectedEndOfInput)?;
    offset += TIMESTAMP_LEN + 1;

    let hostname = take_until_space(message, &mut offset)?;

    // TAG: the scan consumes a character before testing it, so the terminating
    // non-alphanumeric character stays inside the tag, and an unbroken alphanumeric run is
    // cut after 33 characters, not 32. Downstream consumers rely on this byte layout.
    let start = offset;
    let mut alphanumeric = true;
    while alphanumeric && offset - start <= MAX_TAG_LEN {
        let ch = *buf.get(offset).ok_or(Error::UnexpectedEndOfInput)?;
        offset += 1;
        alphanumeric = ch.is_ascii_alphanumeric();
    }

    let tag = message.get(start..offset).ok_or(Error::UnexpectedEndOfInput)?;
    let content = message.get(offset..).ok_or(Error::UnexpectedEndOfInput)?;

    Ok(ParsedMessage {
        facility,
        severity,
        date,
        time,
        hostname,
        tag,
        content,
    })
}

/// Everything from `*offset` up to the next space; `*offset` ends up past the space.
fn take_until_space<'a>(message: &'a str, offset: &mut usize) -> Result<&'a str, Error> {
    let buf = message.as_bytes();
    for pos in *offset..buf.len() {
        if buf[pos] == b' ' {
            let value = message
                .get(*offset..pos)
                .ok_or(Error::UnexpectedEndOfInput)?;
            *offset = pos + 1;
            return Ok(value);
        }
    }

    Err(Error::UnexpectedEndOfInput)
}
