//! Ordinals of the seven strings.

use crate::numeral::{self, XIAN};
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

pub const NUM_STRINGS: u8 = 7;

/// One of the strings 1 (lowest) to 7 (highest).
///
/// ```
/// # use qinpu::string_index::StringIndex;
/// let string: StringIndex = "六弦".parse().unwrap();
/// assert_eq!(string.index(), 6);
/// assert_eq!(string.to_string(), "六弦");
/// assert_eq!(format!("{string:#}"), "六");
/// ```
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StringIndex {
    index: u8,
}

impl StringIndex {
    pub fn from_index(index: u8) -> Result<Self, StringIndexError> {
        if (1..=NUM_STRINGS).contains(&index) {
            Ok(Self { index })
        } else {
            Err(StringIndexError::InvalidStringIndex(format!(
                "String must be between 1 and {NUM_STRINGS} but was {index}"
            )))
        }
    }

    /// Parses a numeral glyph, optionally followed by `弦`.
    pub fn from_text(text: &str) -> Result<Self, StringIndexError> {
        let mut chars = text.chars();
        let index = chars
            .next()
            .filter(|&glyph| glyph != numeral::HALF)
            .and_then(numeral::value_of);

        match (index, chars.as_str()) {
            (Some(index), "" | "弦") => Self::from_index(index).ok(),
            _ => None,
        }
        .ok_or_else(|| StringIndexError::InvalidStringIndex(format!("'{text}' is not a string")))
    }

    pub fn index(self) -> u8 {
        self.index
    }

    /// The zero-based offset into a per-string table.
    pub fn offset(self) -> usize {
        usize::from(self.index - 1)
    }

    pub fn to_text(self) -> String {
        format!("{}{XIAN}", self.to_terse_text())
    }

    pub fn to_terse_text(self) -> String {
        numeral::text_of(self.index).unwrap_or_default().to_owned()
    }

    pub fn all() -> impl Iterator<Item = StringIndex> {
        (1..=NUM_STRINGS).map(|index| StringIndex { index })
    }
}

/// Formats with the unit or, using the alternate flag, as bare numeral.
impl Display for StringIndex {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if f.alternate() {
            f.pad(&self.to_terse_text())
        } else {
            f.pad(&self.to_text())
        }
    }
}

impl FromStr for StringIndex {
    type Err = StringIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StringIndexError {
    InvalidStringIndex(String),
}

impl Display for StringIndexError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            StringIndexError::InvalidStringIndex(message) => {
                write!(f, "Invalid string: {message}")
            }
        }
    }
}

impl Error for StringIndexError {}
