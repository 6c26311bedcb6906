//! Note letters, accidentals and pitch-class spelling.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// Pitch-class names indexed by `index % 12`. Black keys are spelled with a sharp.
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One of the seven natural note letters.
///
/// A [`NoteLetter`] doubles as the key of a cipher notation, see [`crate::cipher`].
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'C' => NoteLetter::C,
            'D' => NoteLetter::D,
            'E' => NoteLetter::E,
            'F' => NoteLetter::F,
            'G' => NoteLetter::G,
            'A' => NoteLetter::A,
            'B' => NoteLetter::B,
            _ => return None,
        })
    }

    /// Number of semitones above C within the same octave.
    ///
    /// ```
    /// # use qinpu::note::NoteLetter;
    /// assert_eq!(NoteLetter::C.semitones_above_c(), 0);
    /// assert_eq!(NoteLetter::F.semitones_above_c(), 5);
    /// assert_eq!(NoteLetter::B.semitones_above_c(), 11);
    /// ```
    pub fn semitones_above_c(self) -> i32 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }

    fn as_char(self) -> char {
        match self {
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
        }
    }
}

/// Only the bare letter is accepted. Accidentals are not part of a key name.
///
/// ```
/// # use qinpu::note::NoteLetter;
/// assert_eq!("G".parse::<NoteLetter>(), Ok(NoteLetter::G));
/// assert!("G#".parse::<NoteLetter>().is_err());
/// assert!("g".parse::<NoteLetter>().is_err());
/// ```
impl FromStr for NoteLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next().and_then(NoteLetter::from_char), chars.next()) {
            (Some(letter), None) => Ok(letter),
            _ => Err(format!("Invalid note letter '{s}': Must be one of C, D, E, F, G, A, B")),
        }
    }
}

impl Display for NoteLetter {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn semitone_delta(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}
