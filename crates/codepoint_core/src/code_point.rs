use std::fmt;

use thiserror::Error;

/// Code points at or below this value are mostly non-emoji and get dropped.
pub const DEFAULT_THRESHOLD: u32 = 100_000;

const PREFIX: &str = "U+";

/// A Unicode code point as listed on the emoji reference page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePoint(u32);

impl CodePoint {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// True when the code point lies strictly above `threshold`.
    pub fn exceeds(self, threshold: u32) -> bool {
        self.0 > threshold
    }

    pub fn to_char(self) -> Option<char> {
        char::from_u32(self.0)
    }
}

impl From<u32> for CodePoint {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCodePointError {
    #[error("no code point text in cell")]
    Empty,
    #[error("invalid hex code point {text:?}")]
    InvalidHex { text: String },
    #[error("code point {text:?} out of range")]
    OutOfRange { text: String },
}

/// Parse the text of a code cell such as `"U+1F600 U+FE0F"`.
///
/// Only the first whitespace-separated token is considered; every `U+` in it
/// is removed before parsing the remainder as base-16. Values must fit in a
/// signed 32-bit integer.
pub fn parse_code_point_text(text: &str) -> Result<CodePoint, ParseCodePointError> {
    let token = text
        .split_whitespace()
        .next()
        .ok_or(ParseCodePointError::Empty)?;
    let hex = token.replace(PREFIX, "");
    if hex.is_empty() {
        return Err(ParseCodePointError::InvalidHex {
            text: token.to_string(),
        });
    }

    let value = u32::from_str_radix(&hex, 16).map_err(|err| match err.kind() {
        std::num::IntErrorKind::PosOverflow => ParseCodePointError::OutOfRange {
            text: token.to_string(),
        },
        _ => ParseCodePointError::InvalidHex {
            text: token.to_string(),
        },
    })?;
    if value > i32::MAX as u32 {
        return Err(ParseCodePointError::OutOfRange {
            text: token.to_string(),
        });
    }
    Ok(CodePoint(value))
}
