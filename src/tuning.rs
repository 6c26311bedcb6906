//! Resolving string, position and technique to a sounding pitch.

use crate::pitch::{Pitch, PitchError};
use crate::position::{HuiPosition, PositionError};
use crate::preset;
use crate::string_index::{StringIndex, NUM_STRINGS};
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// Relative tolerance when snapping a stopped or harmonic frequency to a [`Pitch`].
///
/// The length ratios of sub-divisions are linear approximations, hence the wide margin.
pub const RESOLVE_EPSILON: f64 = 0.1;

/// The way a string is sounded.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Technique {
    /// 散音, the unstopped string.
    Open,
    /// 按音, the string stopped at a position.
    Pressed,
    /// 泛音, the string touched lightly at a position.
    Harmonic,
}

impl Technique {
    pub fn requires_position(self) -> bool {
        match self {
            Technique::Open => false,
            Technique::Pressed | Technique::Harmonic => true,
        }
    }
}

/// ```
/// # use qinpu::tuning::Technique;
/// assert_eq!("pressed".parse(), Ok(Technique::Pressed));
/// assert_eq!("fan".parse(), Ok(Technique::Harmonic));
/// assert_eq!("散".parse(), Ok(Technique::Open));
/// assert!("plucked".parse::<Technique>().is_err());
/// ```
impl FromStr for Technique {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" | "unfettered" | "san" | "散" => Ok(Technique::Open),
            "pressed" | "an" | "按" => Ok(Technique::Pressed),
            "harmonic" | "fan" | "泛" => Ok(Technique::Harmonic),
            _ => Err(format!(
                "Invalid technique '{s}': Must be open (san, 散), pressed (an, 按) or harmonic (fan, 泛)"
            )),
        }
    }
}

impl Display for Technique {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Technique::Open => "open",
            Technique::Pressed => "pressed",
            Technique::Harmonic => "harmonic",
        };
        f.pad(name)
    }
}

/// The open pitches of all seven strings.
///
/// # Examples
///
/// ```
/// # use qinpu::position::HuiPosition;
/// # use qinpu::string_index::StringIndex;
/// # use qinpu::tuning::{StringTuning, Technique};
/// let tuning = StringTuning::from_preset("F").unwrap();
/// let string_1 = StringIndex::from_index(1).unwrap();
///
/// let open = tuning.pitch_at(string_1, None, Technique::Open).unwrap();
/// assert_eq!(open.name(), "C2");
///
/// let position = HuiPosition::from_text("七").ok();
/// let octave = tuning.pitch_at(string_1, position, Technique::Pressed).unwrap();
/// assert_eq!(octave.name(), "C3");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StringTuning {
    pitches: [Pitch; NUM_STRINGS as usize],
}

impl StringTuning {
    pub fn from_pitches(pitches: [Pitch; NUM_STRINGS as usize]) -> Self {
        Self { pitches }
    }

    /// Builds a tuning from exactly seven scientific pitch names, lowest string first.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, TuningError> {
        let pitches = names
            .iter()
            .map(|name| Pitch::from_name(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let num_strings = pitches.len();
        pitches
            .try_into()
            .map(Self::from_pitches)
            .map_err(|_| TuningError::WrongNumberOfStrings(num_strings))
    }

    /// Builds one of the tunings listed in [`preset::PRESET_KEYS`].
    ///
    /// ```
    /// # use qinpu::tuning::StringTuning;
    /// let names = |key| {
    ///     StringTuning::from_preset(key)
    ///         .unwrap()
    ///         .pitches()
    ///         .map(|pitch| pitch.to_string())
    /// };
    /// assert_eq!(names("C"), ["C2", "D2", "E2", "G2", "A2", "C3", "D3"]);
    /// assert_eq!(names("bB"), ["C2", "D2", "F2", "G2", "A#2", "C3", "D3"]);
    /// ```
    pub fn from_preset(key: &str) -> Result<Self, TuningError> {
        let names = preset::open_string_names(key)
            .ok_or_else(|| TuningError::UnknownPreset(key.to_owned()))?;
        Self::from_names(&names)
    }

    pub fn pitches(&self) -> [Pitch; NUM_STRINGS as usize] {
        self.pitches
    }

    pub fn open_pitch(&self, string: StringIndex) -> Pitch {
        self.pitches[string.offset()]
    }

    /// Finds the [`Pitch`] sounding on `string` when played with `technique` at `position`.
    ///
    /// The position is ignored for [`Technique::Open`] and required otherwise.
    pub fn pitch_at(
        &self,
        string: StringIndex,
        position: Option<HuiPosition>,
        technique: Technique,
    ) -> Result<Pitch, ResolveError> {
        let open_pitch = self.open_pitch(string);

        if technique.requires_position() && position.is_none() {
            return Err(ResolveError::MissingPosition(technique));
        }

        let pitch = match (technique, position) {
            (Technique::Pressed, Some(position)) => {
                open_pitch.mul_frequency(1.0 / position.length_ratio()?, RESOLVE_EPSILON)?
            }
            (Technique::Harmonic, Some(position)) => open_pitch.mul_frequency(
                f64::from(position.harmonic_multiplier()?),
                RESOLVE_EPSILON,
            )?,
            (Technique::Open, _) | (_, None) => open_pitch,
        };

        log::debug!(
            "{string} {technique} at {} sounds {pitch}",
            position.map_or_else(|| "-".to_owned(), |position| position.to_string())
        );

        Ok(pitch)
    }
}

/// Error reported when a [`StringTuning`] cannot be built.
#[derive(Clone, Debug, PartialEq)]
pub enum TuningError {
    UnknownPreset(String),
    WrongNumberOfStrings(usize),
    InvalidPitch(PitchError),
}

impl From<PitchError> for TuningError {
    fn from(v: PitchError) -> Self {
        TuningError::InvalidPitch(v)
    }
}

impl Display for TuningError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TuningError::UnknownPreset(key) => write!(
                f,
                "Unknown preset '{key}': Must be one of {}",
                preset::PRESET_KEYS.join(", ")
            ),
            TuningError::WrongNumberOfStrings(num_strings) => write!(
                f,
                "A tuning must have {NUM_STRINGS} strings but has {num_strings}"
            ),
            TuningError::InvalidPitch(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TuningError {}

/// Error reported by [`StringTuning::pitch_at`].
#[derive(Clone, Debug, PartialEq)]
pub enum ResolveError {
    /// The technique requires a position but none was given.
    MissingPosition(Technique),
    Pitch(PitchError),
    Position(PositionError),
}

impl From<PitchError> for ResolveError {
    fn from(v: PitchError) -> Self {
        ResolveError::Pitch(v)
    }
}

impl From<PositionError> for ResolveError {
    fn from(v: PositionError) -> Self {
        ResolveError::Position(v)
    }
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ResolveError::MissingPosition(technique) => {
                write!(f, "The {technique} technique requires a position")
            }
            ResolveError::Pitch(err) => write!(f, "{err}"),
            ResolveError::Position(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ResolveError {}
