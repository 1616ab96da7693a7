//! Author and committer signatures.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{CommitParseError, ParseResult};

/// An identity plus timestamp, as found on `author` and `committer` lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Display name.
    pub name: String,

    /// Email address (without angle brackets).
    pub email: String,

    /// Timestamp in the signer's recorded timezone.
    pub time: DateTime<FixedOffset>,
}

impl Signature {
    /// Parses the value part of a signature header, e.g.
    /// `Jane Doe <jane@example.com> 1700000000 +0100`.
    ///
    /// # Errors
    ///
    /// Returns [`CommitParseError::MalformedSignature`] if the value does not
    /// have the `name <email> seconds offset` shape.
    pub fn parse(value: &str) -> ParseResult<Self> {
        let malformed = || CommitParseError::MalformedSignature(value.to_string());

        let open = value.find('<').ok_or_else(malformed)?;
        let close = value[open..].find('>').map(|i| open + i).ok_or_else(malformed)?;

        let name = value[..open].trim().to_string();
        let email = value[open + 1..close].to_string();

        let mut rest = value[close + 1..].split_whitespace();
        let seconds: i64 = rest
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(malformed)?;
        let offset = rest.next().and_then(parse_offset).ok_or_else(malformed)?;

        let time = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(malformed)?
            .with_timezone(&offset);

        Ok(Self { name, email, time })
    }
}

/// Parses a Git timezone offset such as `+0100` or `-0530`.
fn parse_offset(raw: &str) -> Option<FixedOffset> {
    if raw.len() != 5 || !raw.is_char_boundary(1) {
        return None;
    }
    let sign = match &raw[..1] {
        "+" => 1,
        "-" => -1,
        _ => return None,
    };
    let digits = &raw[1..];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
