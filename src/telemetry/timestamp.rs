//! Telemetry timestamp parsing (`YYYY/MM/DD HH:MM:SS`).
//!
//! Fields are range-checked individually, then converted to epoch seconds.
//! Days past the end of a month roll forward into the next month (Feb 30
//! becomes Mar 2) the same way calendar normalization does. Timestamps are
//! interpreted as UTC so results do not depend on the host time zone.

use chrono::{Days, NaiveDate, TimeZone, Utc};

use crate::error::{ProfileError, Result};

/// Minimum length of a well-formed timestamp.
pub const TIMESTAMP_LEN: usize = 19;

/// Largest epoch that still fits the ten-digit sort key field.
pub const MAX_EPOCH: i64 = 9_999_999_999;

/// Parse a telemetry timestamp into epoch seconds.
pub fn parse_timestamp(text: &str) -> Result<i64> {
    if text.len() < TIMESTAMP_LEN {
        return Err(ProfileError::FormatNotValid(format!(
            "timestamp {text:?} is shorter than {TIMESTAMP_LEN} characters"
        )));
    }

    let invalid = || ProfileError::DateNotValid(text.to_string());
    let [year, month, day, hour, minute, second] = scan_fields(text).ok_or_else(invalid)?;

    let in_range = year >= 1900
        && (1..=12).contains(&month)
        && (1..=31).contains(&day)
        && (0..=23).contains(&hour)
        && (0..=59).contains(&minute)
        && (0..=59).contains(&second);
    if !in_range {
        return Err(invalid());
    }

    let year = i32::try_from(year).map_err(|_| invalid())?;
    let date = NaiveDate::from_ymd_opt(year, month as u32, 1)
        .and_then(|first| first.checked_add_days(Days::new((day - 1) as u64)))
        .ok_or_else(invalid)?;
    let datetime = date
        .and_hms_opt(hour as u32, minute as u32, second as u32)
        .ok_or_else(invalid)?;

    let epoch = Utc.from_utc_datetime(&datetime).timestamp();
    if !(0..=MAX_EPOCH).contains(&epoch) {
        return Err(invalid());
    }
    Ok(epoch)
}

/// Format epoch seconds the way they appear in sort keys and output rows.
pub fn format_epoch(epoch: i64) -> String {
    format!("{epoch:010}")
}

/// Scan `%d/%d/%d %d:%d:%d`, ignoring anything after the seconds.
fn scan_fields(text: &str) -> Option<[i64; 6]> {
    let mut scanner = Scanner::new(text);
    let year = scanner.int()?;
    scanner.literal(b'/')?;
    let month = scanner.int()?;
    scanner.literal(b'/')?;
    let day = scanner.int()?;
    scanner.whitespace();
    let hour = scanner.int()?;
    scanner.literal(b':')?;
    let minute = scanner.int()?;
    scanner.literal(b':')?;
    let second = scanner.int()?;
    Some([year, month, day, hour, minute, second])
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn literal(&mut self, expected: u8) -> Option<()> {
        if self.peek()? == expected {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }

    fn int(&mut self) -> Option<i64> {
        self.whitespace();
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        let start = self.pos;
        let mut value: i64 = 0;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            value = value.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        Some(if negative { -value } else { value })
    }
}
