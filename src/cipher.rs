//! Cipher notation (numbered musical notation) relative to a key.
//!
//! A cipher is a scale degree `1`..`7` followed by octave marks. Each `` ` `` raises the degree by
//! an octave and each `,` lowers it by an octave. Degree `1` without marks is the key's tonic in
//! the octave starting at C4.

use crate::note::NoteLetter;
use crate::pitch::{Pitch, PitchError};

const RAISE_OCTAVE: char = '`';
const LOWER_OCTAVE: char = ',';

const TONIC_BASE_INDEX: i64 = 60;

/// Semitones above the tonic for the degrees 1..=7 of a major scale.
const DEGREE_OFFSETS: [i64; 7] = [0, 2, 4, 5, 7, 9, 11];

impl Pitch {
    /// Creates a [`Pitch`] from a cipher in the given `key`.
    ///
    /// Only the seven natural note letters are accepted as key.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qinpu::pitch::Pitch;
    /// assert_eq!(Pitch::from_cipher("C", "1").unwrap().index(), 60);
    /// assert_eq!(Pitch::from_cipher("C", "3`").unwrap().index(), 76);
    /// assert_eq!(Pitch::from_cipher("C", "3,").unwrap().index(), 52);
    /// assert_eq!(Pitch::from_cipher("F", "5,,").unwrap().name(), "C3");
    ///
    /// assert!(Pitch::from_cipher("C", "8").is_err());
    /// assert!(Pitch::from_cipher("C", "1`,").is_err());
    /// assert!(Pitch::from_cipher("C#", "1").is_err());
    /// ```
    pub fn from_cipher(key: &str, cipher: &str) -> Result<Pitch, PitchError> {
        let key = parse_key(key)?;

        let (degree, octave_shift) = parse_cipher(cipher).ok_or_else(|| {
            PitchError::InvalidPitch(format!(
                "Invalid cipher '{cipher}': Must be a degree 1-7 followed by {RAISE_OCTAVE} or {LOWER_OCTAVE} marks (e.g. 1, 3`, 5,,)"
            ))
        })?;

        Pitch::from_index_offset(
            TONIC_BASE_INDEX
                + i64::from(key.semitones_above_c())
                + DEGREE_OFFSETS[degree]
                + 12 * octave_shift,
        )
    }

    /// Renders `self` as a cipher in the given `key`.
    ///
    /// Fails if `self` is not part of the key's major scale.
    ///
    /// ```
    /// # use qinpu::pitch::Pitch;
    /// let a4 = Pitch::from_name("A4").unwrap();
    /// assert_eq!(a4.to_cipher("C").unwrap(), "6");
    /// assert_eq!(a4.to_cipher("F").unwrap(), "3");
    /// assert_eq!(a4.to_cipher("D").unwrap(), "5");
    /// assert!(a4.to_cipher("B").is_err()); // A is not in B major
    ///
    /// let c2 = Pitch::from_name("C2").unwrap();
    /// assert_eq!(c2.to_cipher("F").unwrap(), "5,,,");
    /// ```
    pub fn to_cipher(self, key: &str) -> Result<String, PitchError> {
        let key = parse_key(key)?;

        let offset_from_tonic =
            i64::from(self.index()) - TONIC_BASE_INDEX - i64::from(key.semitones_above_c());
        let octave_shift = offset_from_tonic.div_euclid(12);
        let semitone = offset_from_tonic.rem_euclid(12);

        let degree = DEGREE_OFFSETS
            .iter()
            .position(|&offset| offset == semitone)
            .ok_or_else(|| {
                PitchError::InvalidPitch(format!(
                    "{self} is not a degree of the {key} major scale"
                ))
            })?;

        let (mark, num_marks) = if octave_shift >= 0 {
            (RAISE_OCTAVE, octave_shift)
        } else {
            (LOWER_OCTAVE, -octave_shift)
        };

        let mut cipher = (degree + 1).to_string();
        cipher.extend((0..num_marks).map(|_| mark));
        Ok(cipher)
    }

    fn from_index_offset(index: i64) -> Result<Pitch, PitchError> {
        i32::try_from(index)
            .map_err(|_| PitchError::InvalidPitch(format!("Index {index} is out of range")))
            .and_then(Pitch::from_index)
    }
}

fn parse_key(key: &str) -> Result<NoteLetter, PitchError> {
    key.parse()
        .map_err(|_| PitchError::InvalidPitch(format!("Invalid key '{key}': Must be one of C, D, E, F, G, A, B")))
}

/// Returns the zero-based degree and the signed octave shift.
fn parse_cipher(cipher: &str) -> Option<(usize, i64)> {
    let mut chars = cipher.chars();
    let degree = chars
        .next()?
        .to_digit(10)
        .filter(|degree| (1..=7).contains(degree))?;

    let marks = chars.as_str();
    let octave_shift = match marks.chars().next() {
        None => 0,
        Some(mark @ (RAISE_OCTAVE | LOWER_OCTAVE)) => {
            if !marks.chars().all(|c| c == mark) {
                return None;
            }
            let num_marks = i64::try_from(marks.len()).ok()?;
            if mark == RAISE_OCTAVE {
                num_marks
            } else {
                -num_marks
            }
        }
        Some(_) => return None,
    };

    Some((degree as usize - 1, octave_shift))
}
