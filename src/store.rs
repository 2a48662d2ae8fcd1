//! Append-only JSON-lines store for parsed messages.
//!
//! The flat log file keeps the corrected wire format; this store keeps the decomposed
//! fields for consumers that want to filter on them without redoing the parse.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::ParsedMessage;

pub struct Store {
    file: File,
}

impl Store {
    /// Open the store at `path`, creating it if needed. Records are only ever appended.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        Ok(Store { file })
    }

    /// Append one message as a single JSON line.
    ///
    /// Facility and severity go in both numeric and keyword form, so records can be
    /// filtered either way without the PRI arithmetic.
    pub fn append(&mut self, message: &ParsedMessage<'_>) -> io::Result<()> {
        let record = serde_json::json!({
            "facility": message.facility as i32,
            "facility_name": message.facility.as_str(),
            "severity": message.severity as i32,
            "severity_name": message.severity.as_str(),
            "date": message.date,
            "time": message.time,
            "hostname": message.hostname,
            "tag": message.tag,
            "content": message.content,
        });

        writeln!(self.file, "{record}")
    }
}
