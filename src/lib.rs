//! Collector and normalizer for [RFC 3164](https://tools.ietf.org/html/rfc3164) BSD Syslog
//! messages. Not to be confused with the newer [RFC 5424](https://tools.ietf.org/html/rfc5424)
//! protocol, which this crate does not speak.
//!
//! The core is a two-stage pipeline. [`validate`] takes whatever arrived on the wire and
//! returns a message that is guaranteed to carry a grammatical PRI and TIMESTAMP, inserting
//! synthesized header fields when the original did not conform. [`parse`] then splits a
//! conformant message into its fields (facility, severity, date, time, hostname, tag,
//! content). Always validate before parsing: [`parse`] re-checks nothing.
//!
//! # Example
//!
//! A simple syslog server
//!
//! ```no_run
//! use std::net::UdpSocket;
//! use std::str;
//!
//! let s = UdpSocket::bind("127.0.0.1:10514").unwrap();
//! let mut buf = [0u8; syslog3164::MAX_MESSAGE_LEN];
//! loop {
//!     let (data_read, peer) = s.recv_from(&mut buf).unwrap();
//!     let raw = str::from_utf8(&buf[..data_read]).unwrap();
//!     let message = syslog3164::validate(raw.trim(), &peer.ip().to_string());
//!     let msg = syslog3164::parse(&message).unwrap();
//!     println!("{:?} {:?} {} {}", msg.facility, msg.severity, msg.hostname, msg.content);
//! }
//! ```
//!
//! # Unimplemented Features
//!
//!  * Non-ASCII payloads. RFC 3164 traffic is ASCII on the wire, and the collector drops
//!    datagrams that are not.
//!  * TCP framing, TLS, multi-datagram reassembly. One datagram is one message.

pub mod collector;
mod error;
mod facility;
mod message;
mod parser;
mod severity;
pub mod store;
mod validator;

pub use error::Error;
pub use facility::Facility;
pub use message::ParsedMessage;
pub use parser::parse;
pub use severity::Severity;
pub use validator::validate;

/// PRI used when a message arrives without a parseable one: facility 1, severity 5.
pub const DEFAULT_PRI: u8 = 13;

/// Largest datagram accepted off the wire, in bytes.
pub const MAX_MESSAGE_LEN: usize = 1024;

/// Count bound of the tag scan. The scan consumes a character before testing it, so a tag
/// can come out one character longer than this.
pub const MAX_TAG_LEN: usize = 32;

/// Length of `Mmm dd hh:mm:ss`.
pub const TIMESTAMP_LEN: usize = 15;
