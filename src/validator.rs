//! Validation and repair of raw messages against the RFC 3164 wire format.
//!
//! Relays are supposed to fill in missing header fields before passing a message on
//! (<https://datatracker.ietf.org/doc/html/rfc3164#section-4.3>); doing the same here keeps
//! the stored stream uniform whether or not a relay was involved. Malformed input is
//! therefore always corrected, never rejected.

use chrono::{Local, NaiveDateTime};

use crate::{DEFAULT_PRI, TIMESTAMP_LEN};

const MONTHS: [&[u8; 3]; 12] = [
    b"Jan", b"Feb", b"Mar", b"Apr", b"May", b"Jun", b"Jul", b"Aug", b"Sep", b"Oct", b"Nov",
    b"Dec",
];

/// Check `message` against the PRI and TIMESTAMP grammars, repairing it where it does not
/// conform.
///
/// A message without a usable PRI gets a full header — `<13>`, the current local time,
/// `source_addr` — prepended to it; the original string is kept intact behind the header,
/// garbled PRI-like prefixes included. A message with a valid PRI but a bad TIMESTAMP gets a
/// timestamp and `source_addr` spliced in right after the PRI. Conformant input is returned
/// unchanged, so the function is idempotent on its own output.
///
/// `source_addr` stands in for the hostname the origin did not send, as RFC 3164
/// section 4.1.2 suggests; it is not validated.
pub fn validate(message: &str, source_addr: &str) -> String {
    let buf = message.as_bytes();

    let close = match pri_end(buf) {
        Some(close) => close,
        None => {
            // No usable PRI means no usable header at all. The freshly built one is
            // trusted by construction, so the timestamp check does not run.
            return format!(
                "<{}>{} {} {}",
                DEFAULT_PRI,
                render_timestamp(Local::now().naive_local()),
                source_addr,
                message
            );
        }
    };

    let resume = close + 1;
    if valid_timestamp(&buf[resume..]) {
        return message.to_string();
    }

    // A grammatical PRI closes at index 2, 3 or 4; anything else is a bug in pri_end.
    debug_assert!((3..=5).contains(&resume));

    format!(
        "{}{} {} {}",
        &message[..resume],
        render_timestamp(Local::now().naive_local()),
        source_addr,
        &message[resume..]
    )
}

/// Index of the closing `>` when `buf` starts with a grammatical PRI.
///
/// The value grammar admits a single digit, two digits without a leading zero, and
/// 100..=191. A second `>` within the first five characters disqualifies the PRI even when
/// the value itself matched (`<9>>text` and friends).
fn pri_end(buf: &[u8]) -> Option<usize> {
    if buf.first() != Some(&b'<') {
        return None;
    }

    let close = 1 + buf[1..].iter().take(4).position(|&ch| ch == b'>')?;
    let digits = &buf[1..close];
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let in_range = match digits {
        [_] => true,
        [d0, _] => *d0 != b'0',
        // 100..=189, then 190 and 191
        [b'1', d1, d2] => *d1 < b'9' || *d2 <= b'1',
        _ => false,
    };
    if !in_range {
        return None;
    }

    let window = &buf[..buf.len().min(5)];
    if window[close + 1..].contains(&b'>') {
        return None;
    }

    Some(close)
}

/// Whether `buf` opens with the fixed-width `Mmm dd hh:mm:ss ` timestamp, trailing space
/// included.
///
/// The day grammar is `30 | 31 | [12][0-9] | <space>[0-9]`: single digits are space-padded,
/// and out-of-calendar values like ` 0` pass, matching what relays accept.
fn valid_timestamp(buf: &[u8]) -> bool {
    if buf.len() < TIMESTAMP_LEN + 1 {
        return false;
    }

    if !MONTHS.iter().any(|month| buf[..3] == month[..]) {
        return false;
    }

    let day = match (buf[4], buf[5]) {
        (b'3', b'0' | b'1') => true,
        (b'1' | b'2', d) => d.is_ascii_digit(),
        (b' ', d) => d.is_ascii_digit(),
        _ => false,
    };

    let hour = match (buf[7], buf[8]) {
        (b'2', b'0'..=b'3') => true,
        (b'0' | b'1', d) => d.is_ascii_digit(),
        _ => false,
    };

    day && hour
        && buf[3] == b' '
        && buf[6] == b' '
        && buf[9] == b':'
        && matches!(buf[10], b'0'..=b'5')
        && buf[11].is_ascii_digit()
        && buf[12] == b':'
        && matches!(buf[13], b'0'..=b'5')
        && buf[14].is_ascii_digit()
        && buf[15] == b' '
}

/// Render `Mmm dd hh:mm:ss`: English month abbreviation, day right-justified in a
/// two-character field with a space standing in for the leading zero.
fn render_timestamp(now: NaiveDateTime) -> String {
    now.format("%b %e %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn pri_grammar() {
        for input in [
            "<0>", "<9>", "<10>", "<99>", "<100>", "<165>", "<189>", "<190>", "<191>",
        ] {
            assert!(pri_end(input.as_bytes()).is_some(), "input: {input}");
        }

        for input in [
            "", "<", "<>", "<00>", "<01>", "<192>", "<199>", "<1000>", "<9!>", "<!9>", "191>",
            "<191", "x<13>", "<9>>", "<0>>>", "<99>>x",
        ] {
            assert!(pri_end(input.as_bytes()).is_none(), "input: {input}");
        }
    }

    #[test]
    fn pri_end_position() {
        assert_eq!(pri_end(b"<0>Jan"), Some(2));
        assert_eq!(pri_end(b"<13>Jan"), Some(3));
        assert_eq!(pri_end(b"<191>Jan"), Some(4));
    }

    #[test]
    fn timestamp_grammar() {
        for input in [
            "Jan 10 01:02:03 ",
            "Feb  5 17:32:18 ",
            "Oct 11 22:14:15 x",
            "Dec 31 23:59:59 ",
            // the day grammar admits a padded zero
            "Mar  0 00:00:00 ",
        ] {
            assert!(valid_timestamp(input.as_bytes()), "input: {input}");
        }

        for input in [
            "",
            "Jan 10 01:02:03", // no trailing space
            "July 10 01:02:0",
            "jan 10 01:02:03 ",
            "Jan 32 01:02:03 ",
            "Jan 00 01:02:03 ",
            "Jan 10 24:02:03 ",
            "Jan 10 01:60:03 ",
            "Jan 10 01:02:60 ",
            "Jan 10 01-02-03 ",
            "Jan1001:02:03   ",
        ] {
            assert!(!valid_timestamp(input.as_bytes()), "input: {input}");
        }
    }

    #[test]
    fn render_pads_single_digit_days() {
        let ts = NaiveDate::from_ymd_opt(2021, 2, 3)
            .unwrap()
            .and_hms_opt(4, 5, 6)
            .unwrap();
        assert_eq!(render_timestamp(ts), "Feb  3 04:05:06");

        let ts = NaiveDate::from_ymd_opt(2021, 12, 25)
            .unwrap()
            .and_hms_opt(14, 55, 6)
            .unwrap();
        assert_eq!(render_timestamp(ts), "Dec 25 14:55:06");
    }

    #[test]
    fn conformant_input_is_untouched() {
        for input in [
            "<34>Oct 11 22:14:15 mymachine su: 'su root' failed for lonvick on /dev/pts/8",
            "<13>Feb  5 17:32:18 10.0.0.99 Use the BFG!",
            "<0>Jan  1 00:00:00 host boot",
        ] {
            assert_eq!(validate(input, "10.0.0.1"), input);
        }
    }

    #[test]
    fn bad_pri_gets_a_full_header() {
        for input in ["", "Use the BFG!", "<9!>garbled", "<192>Jan 10 01:02:03 host x"] {
            let out = validate(input, "10.0.0.1");
            assert!(out.starts_with("<13>"), "output: {out}");
            // the original message survives verbatim, bad prefix and all
            assert!(out.ends_with(input), "output: {out}");
            assert!(valid_timestamp(&out.as_bytes()[4..]), "output: {out}");
            assert_eq!(out.len(), "<13>".len() + TIMESTAMP_LEN + 1 + "10.0.0.1 ".len() + input.len());
        }
    }

    #[test]
    fn bad_timestamp_gets_a_splice() {
        let input = "<100>July 10 01:02:03 localhost hello:world";
        let out = validate(input, "10.0.0.1");
        assert!(out.starts_with("<100>"), "output: {out}");
        assert!(out.ends_with("July 10 01:02:03 localhost hello:world"), "output: {out}");
        assert!(valid_timestamp(&out.as_bytes()[5..]), "output: {out}");
        assert_eq!(out.len(), input.len() + TIMESTAMP_LEN + 1 + "10.0.0.1 ".len());
    }

    #[test]
    fn repaired_output_revalidates_to_itself() {
        for input in ["no header at all", "<5>missing timestamp", "<9>>double bracket"] {
            let out = validate(input, "192.0.2.7");
            assert_eq!(validate(&out, "198.51.100.1"), out);
        }
    }
}
