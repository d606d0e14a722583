use std::fmt;
use std::str;

use thiserror::Error;

/// Earliest time zone offset accepted, in minutes relative to GMT.
pub const MIN_TZ_OFFSET: i16 = -720;

/// Latest time zone offset accepted, in minutes relative to GMT.
pub const MAX_TZ_OFFSET: i16 = 840;

/// An error which can be returned when building an `Attribution`.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum AttributionError {
    #[error("illegal time zone offset: {0}")]
    IllegalTzOffset(i16),
}

/// An `Attribution` combines a person's identity (name and e-mail address)
/// with the timestamp for a particular action.
///
/// Attributions appear as the `author` and `committer` lines of a commit.
///
/// The `timestamp` value is in seconds relative to the Unix epoch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribution {
    name: String,
    email: String,
    timestamp: i64,
    tz_offset: i16,
}

impl Attribution {
    /// Creates a new attribution.
    ///
    /// `tz_offset` is in minutes and must lie within -720..=840.
    pub fn new(
        name: &str,
        email: &str,
        timestamp: i64,
        tz_offset: i16,
    ) -> Result<Attribution, AttributionError> {
        if !(MIN_TZ_OFFSET..=MAX_TZ_OFFSET).contains(&tz_offset) {
            return Err(AttributionError::IllegalTzOffset(tz_offset));
        }

        Ok(Attribution {
            name: name.to_string(),
            email: email.to_string(),
            timestamp,
            tz_offset,
        })
    }

    /// Parse the value of an identity line (the part after `author ` or
    /// `committer `) into an `Attribution` struct.
    ///
    /// Returns `None` if the angle-bracketed e-mail address is missing or
    /// the name or e-mail is not valid UTF-8. A missing or unreadable
    /// timestamp or time zone is read as zero, as git does.
    pub fn parse(line: &[u8]) -> Option<Attribution> {
        let line = line.strip_suffix(b"\n").unwrap_or(line);

        let open = line.iter().position(|b| *b == b'<')?;
        let close = open + line[open..].iter().position(|b| *b == b'>')?;

        let name = &line[..open];
        let name = name.strip_suffix(b" ").unwrap_or(name);
        let name = str::from_utf8(name).ok()?;
        let email = str::from_utf8(&line[open + 1..close]).ok()?;

        let mut words = line[close + 1..]
            .split(|b| *b == b' ')
            .filter(|w| !w.is_empty())
            .rev();

        let (timestamp, tz_offset) = match (words.next(), words.next()) {
            (Some(tz), Some(ts)) => {
                let timestamp = str::from_utf8(ts)
                    .ok()
                    .and_then(|s| s.parse::<i64>().ok())
                    .unwrap_or(0);
                let tz_offset = str::from_utf8(tz).ok().and_then(tz_from_str).unwrap_or(0);
                (timestamp, tz_offset)
            }
            _ => (0, 0),
        };

        Some(Attribution {
            name: name.to_string(),
            email: email.to_string(),
            timestamp,
            tz_offset,
        })
    }

    /// Parses a date given as `<unix-seconds> <+|-hhmm>` or as bare
    /// `<unix-seconds>` (read as `+0000`).
    ///
    /// Unlike `parse`, this is strict: anything else returns `None`.
    pub fn parse_date(s: &str) -> Option<(i64, i16)> {
        let mut words = s.split_whitespace();
        let timestamp = words.next()?.parse::<i64>().ok()?;
        let tz_offset = match words.next() {
            Some(tz) => tz_from_str(tz)?,
            None => 0,
        };

        if words.next().is_some() {
            None
        } else {
            Some((timestamp, tz_offset))
        }
    }

    /// Returns the person's human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a sanitized version of the person's human-readable name.
    pub fn sanitized_name(&self) -> String {
        sanitize(&self.name)
    }

    /// Returns the person's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns a sanitized version of the person's email address.
    pub fn sanitized_email(&self) -> String {
        sanitize(&self.email)
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns the timezone offset (minutes relative to GMT).
    pub fn tz_offset(&self) -> i16 {
        self.tz_offset
    }

    /// Returns the timezone formatted in human readable offset from GMT.
    pub fn format_tz(&self) -> String {
        let sign = if self.tz_offset < 0 { "-" } else { "+" };

        let offset = self.tz_offset.abs();
        format!("{}{:02}{:02}", sign, offset / 60, offset % 60)
    }
}

// Accepts exactly `+hhmm` or `-hhmm` within the legal offset range.
fn tz_from_str(s: &str) -> Option<i16> {
    let s = s.as_bytes();
    if s.len() != 5 || !s[1..].iter().all(u8::is_ascii_digit) {
        return None;
    }

    let sign: i16 = match s[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };

    let digit = |i: usize| i16::from(s[i] - b'0');
    let hh = digit(1) * 10 + digit(2);
    let mm = digit(3) * 10 + digit(4);
    if mm >= 60 {
        return None;
    }

    let offset = sign * (hh * 60 + mm);
    if (MIN_TZ_OFFSET..=MAX_TZ_OFFSET).contains(&offset) {
        Some(offset)
    } else {
        None
    }
}

fn sanitize(s: &str) -> String {
    // Remove control characters except for CR, and angle brackets.
    s.trim()
        .chars()
        .filter(|c| !matches!(*c as u32, 0..=12 | 14..=31 | 60 | 62))
        .collect()
}

impl fmt::Display for Attribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} {}",
            sanitize(&self.name),
            sanitize(&self.email),
            self.timestamp,
            self.format_tz()
        )
    }
}
