//! Linear and logarithmic views on frequency ratios.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// The relative distance between two frequencies.
///
/// A [`Ratio`] can be read as a factor in linear frequency space or as an offset in logarithmic
/// frequency space (`cents`, `semitones`, `octaves`).
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use qinpu::ratio::Ratio;
/// assert_approx_eq!(Ratio::from_float(1.5).as_cents(), 701.955);
/// assert_approx_eq!(Ratio::from_semitones(3.0).as_octaves(), 0.25);
/// assert_approx_eq!(Ratio::from_octaves(3.0).as_float(), 8.0);
/// ```
///
/// # Panics
///
/// Panics if the *linear* value is not a finite positive number.
///
/// ```should_panic
/// # use qinpu::ratio::Ratio;
/// Ratio::from_float(0.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Ratio {
    float_value: f64,
}

impl Ratio {
    pub fn from_float(float_value: f64) -> Self {
        assert!(
            is_valid_factor(float_value),
            "Ratio must be finite and positive but was {float_value}"
        );
        Self { float_value }
    }

    /// Like [`Ratio::from_float`] but returns [`None`] for non-finite or non-positive values.
    pub fn try_from_float(float_value: f64) -> Option<Self> {
        is_valid_factor(float_value).then_some(Self { float_value })
    }

    pub fn from_semitones(semitones: impl Into<f64>) -> Self {
        Self::from_octaves(semitones.into() / 12.0)
    }

    pub fn from_octaves(octaves: impl Into<f64>) -> Self {
        Self::from_float(octaves.into().exp2())
    }

    /// The [`Ratio`] leading from `from_hz` to `to_hz`.
    ///
    /// ```
    /// # use assert_approx_eq::assert_approx_eq;
    /// # use qinpu::ratio::Ratio;
    /// assert_approx_eq!(Ratio::between_frequencies(330.0, 440.0).as_float(), 4.0 / 3.0);
    /// ```
    pub fn between_frequencies(from_hz: f64, to_hz: f64) -> Self {
        Self::from_float(to_hz / from_hz)
    }

    pub fn as_float(self) -> f64 {
        self.float_value
    }

    pub fn as_cents(self) -> f64 {
        self.as_semitones() * 100.0
    }

    pub fn as_semitones(self) -> f64 {
        self.as_octaves() * 12.0
    }

    pub fn as_octaves(self) -> f64 {
        self.float_value.log2()
    }

    /// ```
    /// # use assert_approx_eq::assert_approx_eq;
    /// # use qinpu::ratio::Ratio;
    /// assert_approx_eq!(Ratio::from_float(4.0).inv().as_float(), 0.25);
    /// ```
    pub fn inv(self) -> Ratio {
        Self {
            float_value: 1.0 / self.float_value,
        }
    }
}

fn is_valid_factor(float_value: f64) -> bool {
    float_value.is_finite() && float_value > 0.0
}

impl Default for Ratio {
    fn default() -> Self {
        Self::from_float(1.0)
    }
}

/// [`Ratio`]s can be formatted as float or, using the alternate flag, as cents.
///
/// ```
/// # use qinpu::ratio::Ratio;
/// assert_eq!(format!("{}", Ratio::from_float(1.5)), "1.5000");
/// assert_eq!(format!("{:#}", Ratio::from_float(1.0 / 1.5)), "-702.0c");
/// assert_eq!(format!("{:#.3}", Ratio::from_semitones(0.5)), "+50.000c");
/// ```
impl Display for Ratio {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let formatted = if f.alternate() {
            format!(
                "{:+.precision$}c",
                self.as_cents(),
                precision = f.precision().unwrap_or(1)
            )
        } else {
            format!(
                "{:.precision$}",
                self.as_float(),
                precision = f.precision().unwrap_or(4)
            )
        };
        f.pad_integral(true, "", &formatted)
    }
}
