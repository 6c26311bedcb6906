//! Absolute pitches on the 128-step MIDI index scale.

use crate::note::{Accidental, NoteLetter, PITCH_CLASS_NAMES};
use crate::ratio::Ratio;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

pub const MAX_INDEX: u8 = 127;

pub const A4: Pitch = Pitch { index: 69 };

/// Relative frequency tolerance used when no other tolerance is given.
pub const DEFAULT_EPSILON: f64 = 0.001;

/// An absolute pitch given by its semitone index where 69 is A4 and 60 is C4.
///
/// A [`Pitch`] is always in the range `0..=127`. All conversions that could leave this range are
/// fallible.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use qinpu::pitch::Pitch;
/// let c4 = Pitch::from_index(60).unwrap();
/// assert_eq!(c4.name(), "C4");
/// assert_approx_eq!(c4.frequency(), 261.625565);
/// assert_eq!(Pitch::from_name("C4"), Ok(c4));
/// ```
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Pitch {
    index: u8,
}

impl Pitch {
    pub fn from_index(index: i32) -> Result<Pitch, PitchError> {
        Pitch::from_wide_index(i64::from(index))
    }

    fn from_wide_index(index: i64) -> Result<Pitch, PitchError> {
        u8::try_from(index)
            .ok()
            .filter(|&index| index <= MAX_INDEX)
            .map(|index| Pitch { index })
            .ok_or_else(|| {
                PitchError::InvalidPitch(format!(
                    "Index must be between 0 and {MAX_INDEX} but was {index}"
                ))
            })
    }

    /// Finds the [`Pitch`] sounding at `frequency` under the given `concert_pitch`.
    ///
    /// The frequency is snapped to the nearest index and the result is only accepted if the relative
    /// deviation `|frequency - snapped| / frequency` does not exceed `epsilon`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qinpu::pitch::{ConcertPitch, Pitch, PitchError};
    /// let a4 = Pitch::from_frequency(441.0, ConcertPitch::default(), 0.1).unwrap();
    /// assert_eq!(a4.index(), 69);
    ///
    /// let too_strict = Pitch::from_frequency(441.0, ConcertPitch::default(), 0.001);
    /// assert!(matches!(too_strict, Err(PitchError::NoSuchPitch { .. })));
    /// ```
    pub fn from_frequency(
        frequency: f64,
        concert_pitch: ConcertPitch,
        epsilon: f64,
    ) -> Result<Pitch, PitchError> {
        let no_such_pitch = || PitchError::NoSuchPitch {
            frequency,
            concert_pitch: concert_pitch.a4_hz(),
            epsilon,
        };

        let (candidate, _) = Pitch::nearest_to(frequency, concert_pitch).ok_or_else(no_such_pitch)??;
        let snapped = candidate.frequency_at(concert_pitch);
        let deviation = (frequency - snapped).abs() / frequency;

        if deviation > epsilon {
            log::trace!(
                "Rejecting {frequency} Hz: nearest pitch {candidate} deviates by {deviation} > {epsilon}"
            );
            return Err(no_such_pitch());
        }

        Ok(candidate)
    }

    /// Shorthand for [`Pitch::from_frequency`] at 440&nbsp;Hz with [`DEFAULT_EPSILON`].
    pub fn from_hz(frequency: f64) -> Result<Pitch, PitchError> {
        Pitch::from_frequency(frequency, ConcertPitch::default(), DEFAULT_EPSILON)
    }

    /// Parses a scientific pitch name like `C4`, `A#0`, `Bb2` or `G-1`.
    ///
    /// ```
    /// # use qinpu::pitch::Pitch;
    /// assert_eq!(Pitch::from_name("C#4").unwrap().index(), 61);
    /// assert_eq!(Pitch::from_name("A#0").unwrap().index(), 22);
    /// assert_eq!(Pitch::from_name("Bb2").unwrap().index(), 46);
    /// assert_eq!(Pitch::from_name("C-1").unwrap().index(), 0);
    /// assert!(Pitch::from_name("Invalid").is_err());
    /// assert!(Pitch::from_name("H4").is_err());
    /// assert!(Pitch::from_name("G#9").is_err()); // Out of range
    /// ```
    pub fn from_name(name: &str) -> Result<Pitch, PitchError> {
        let invalid = || {
            PitchError::InvalidPitch(format!(
                "Invalid pitch name '{name}': Must be a letter, an optional accidental and an octave (e.g. C4, A#0, Bb2)"
            ))
        };

        let mut chars = name.chars();
        let letter = chars
            .next()
            .and_then(NoteLetter::from_char)
            .ok_or_else(invalid)?;

        let rest = chars.as_str();
        let (accidental, octave) = match rest.chars().next().and_then(Accidental::from_char) {
            Some(accidental) => (accidental, &rest[1..]),
            None => (Accidental::Natural, rest),
        };

        let digits = octave.strip_prefix('-').unwrap_or(octave);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let octave = octave.parse::<i32>().map_err(|_| invalid())?;

        Pitch::from_wide_index(
            i64::from(letter.semitones_above_c())
                + 12 * (i64::from(octave) + 1)
                + i64::from(accidental.semitone_delta()),
        )
    }

    pub fn index(self) -> u8 {
        self.index
    }

    pub fn frequency(self) -> f64 {
        self.frequency_at(ConcertPitch::default())
    }

    pub fn frequency_at(self, concert_pitch: ConcertPitch) -> f64 {
        concert_pitch.a4_hz()
            * Ratio::from_semitones(i32::from(self.index) - i32::from(A4.index)).as_float()
    }

    /// The scientific name, spelling black keys with a sharp.
    ///
    /// ```
    /// # use qinpu::pitch::Pitch;
    /// assert_eq!(Pitch::from_index(0).unwrap().name(), "C-1");
    /// assert_eq!(Pitch::from_index(70).unwrap().name(), "A#4");
    /// assert_eq!(Pitch::from_index(127).unwrap().name(), "G9");
    /// ```
    pub fn name(self) -> String {
        let pitch_class = PITCH_CLASS_NAMES[usize::from(self.index % 12)];
        let octave = i32::from(self.index / 12) - 1;
        format!("{pitch_class}{octave}")
    }

    /// Transposes by a frequency factor, accepting the result within a relative `epsilon`.
    ///
    /// ```
    /// # use qinpu::pitch::Pitch;
    /// let c2 = Pitch::from_name("C2").unwrap();
    /// assert_eq!(c2.mul_frequency(2.0, 0.001).unwrap().name(), "C3");
    /// assert_eq!(c2.mul_frequency(3.0, 0.01).unwrap().name(), "G3");
    /// assert!(c2.mul_frequency(3.0, 0.001).is_err());
    /// ```
    pub fn mul_frequency(self, factor: f64, epsilon: f64) -> Result<Pitch, PitchError> {
        Pitch::from_frequency(self.frequency() * factor, ConcertPitch::default(), epsilon)
    }

    /// Transposes by `num_semitones`.
    ///
    /// ```
    /// # use qinpu::pitch::Pitch;
    /// let c4 = Pitch::from_name("C4").unwrap();
    /// assert_eq!(c4.add_semitones(9).unwrap().name(), "A4");
    /// assert_eq!(c4.add_semitones(-61).unwrap_err().to_string(), "Invalid pitch: Index must be between 0 and 127 but was -1");
    /// ```
    pub fn add_semitones(self, num_semitones: i32) -> Result<Pitch, PitchError> {
        Pitch::from_wide_index(i64::from(self.index) + i64::from(num_semitones))
    }

    /// Describes an arbitrary frequency by its nearest [`Pitch`] and the remaining deviation.
    ///
    /// In contrast to [`Pitch::from_frequency`], no tolerance is applied.
    pub fn describe(frequency: f64, concert_pitch: ConcertPitch) -> Result<Description, PitchError> {
        let (approx_pitch, semitones_above_a4) = Pitch::nearest_to(frequency, concert_pitch)
            .ok_or(PitchError::NoSuchPitch {
                frequency,
                concert_pitch: concert_pitch.a4_hz(),
                epsilon: f64::INFINITY,
            })??;

        let approx_semitones_above_a4 = f64::from(i32::from(approx_pitch.index) - i32::from(A4.index));

        Ok(Description {
            freq_in_hz: frequency,
            concert_pitch,
            approx_pitch,
            deviation: Ratio::from_semitones(semitones_above_a4 - approx_semitones_above_a4),
        })
    }

    /// Returns [`None`] if `frequency` or the concert pitch is not a positive finite number.
    fn nearest_to(
        frequency: f64,
        concert_pitch: ConcertPitch,
    ) -> Option<Result<(Pitch, f64), PitchError>> {
        if !(frequency > 0.0 && concert_pitch.a4_hz() > 0.0) {
            return None;
        }

        let semitones_above_a4 =
            Ratio::try_from_float(frequency / concert_pitch.a4_hz())?.as_semitones();
        let index = (semitones_above_a4 + f64::from(A4.index)).round() as i64;
        Some(Pitch::from_wide_index(index).map(|pitch| (pitch, semitones_above_a4)))
    }
}

impl Display for Pitch {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(&self.name())
    }
}

impl FromStr for Pitch {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pitch::from_name(s)
    }
}

/// The frequency of A4, 440&nbsp;Hz by default.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct ConcertPitch {
    a4_hz: f64,
}

impl ConcertPitch {
    pub fn from_a4_hz(a4_hz: f64) -> Self {
        Self { a4_hz }
    }

    pub fn a4_hz(self) -> f64 {
        self.a4_hz
    }
}

impl Default for ConcertPitch {
    fn default() -> Self {
        Self::from_a4_hz(440.0)
    }
}

/// The nearest [`Pitch`] to an arbitrary frequency and the deviation leading from it to that frequency.
#[derive(Copy, Clone, Debug)]
pub struct Description {
    pub freq_in_hz: f64,
    pub concert_pitch: ConcertPitch,
    pub approx_pitch: Pitch,
    pub deviation: Ratio,
}

/// Formats the nearest pitch with its own frequency, followed by the deviation in cents unless it is negligible.
///
/// ```
/// # use qinpu::pitch::{ConcertPitch, Pitch};
/// let description = Pitch::describe(441.0, ConcertPitch::default()).unwrap();
/// assert_eq!(description.to_string(), "A4 | MIDI 69 | 440.000 Hz | +3.930c");
/// ```
impl Display for Description {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{} | MIDI {} | {:.3} Hz",
            self.approx_pitch,
            self.approx_pitch.index(),
            self.approx_pitch.frequency_at(self.concert_pitch),
        )?;

        if self.deviation.as_cents().abs() >= 0.001 {
            write!(f, " | {:#.3}", self.deviation)?;
        }

        Ok(())
    }
}

/// Error reported when a [`Pitch`] cannot be created.
#[derive(Clone, Debug, PartialEq)]
pub enum PitchError {
    /// The input (index, name, cipher or key) is malformed or out of range.
    InvalidPitch(String),

    /// No [`Pitch`] lies within the relative tolerance `epsilon` of `frequency`.
    NoSuchPitch {
        frequency: f64,
        concert_pitch: f64,
        epsilon: f64,
    },
}

impl Display for PitchError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PitchError::InvalidPitch(message) => write!(f, "Invalid pitch: {message}"),
            PitchError::NoSuchPitch {
                frequency,
                concert_pitch,
                epsilon,
            } => write!(
                f,
                "No pitch within a relative tolerance of {epsilon} of {frequency} Hz (A4 = {concert_pitch} Hz)"
            ),
        }
    }
}

impl Error for PitchError {}
