//! Hui positions, i.e. stopping and touching points along a guqin string.
//!
//! A position consists of a hui number `1..=13` (or 14 for the zone beyond the 13th hui) and a
//! sub-division `0..=9` measured in tenths towards the next hui. Positions can be written in two
//! notations:
//!
//! - The marker notation names the hui explicitly, e.g. `七徽`, `十徽八分`, `一徽半分` or `徽外`.
//! - The terse notation drops the marker and the unit, e.g. `七`, `十八` or `一半`.
//!
//! In the terse notation, `十一`, `十二` and `十三` denote the huis 11, 12 and 13 while `十四`
//! through `十九` denote the sub-divisions of hui 10.

use crate::numeral::{self, BEYOND_HUI, BEYOND_HUI_VALUE, FEN, HALF, HUI, OUTSIDE, TEN};
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// Fraction of the string's vibrating length remaining when stopped at each hui.
///
/// Index 0 is unused. Index 14 is the full string length at the bridge end.
const LENGTH_RATIOS: [f64; 15] = [
    0.0,
    1.0 / 8.0,
    1.0 / 6.0,
    1.0 / 5.0,
    1.0 / 4.0,
    1.0 / 3.0,
    2.0 / 5.0,
    1.0 / 2.0,
    3.0 / 5.0,
    2.0 / 3.0,
    3.0 / 4.0,
    4.0 / 5.0,
    5.0 / 6.0,
    7.0 / 8.0,
    1.0,
];

/// Overtone produced when touching the string lightly at each hui. Index 0 is unused.
const HARMONIC_MULTIPLIERS: [u8; 14] = [0, 8, 6, 5, 4, 3, 5, 2, 5, 3, 4, 5, 6, 8];

/// A position along a string, see the [module-level documentation](self).
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use qinpu::position::HuiPosition;
/// let position: HuiPosition = "十八".parse().unwrap();
/// assert_eq!(position.to_hui_and_fen(), (10, 8));
/// assert_eq!(position.to_string(), "十徽八分");
/// assert_eq!(format!("{position:#}"), "十八");
/// assert_approx_eq!(position.length_ratio().unwrap(), 0.79);
/// ```
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HuiPosition {
    hui: u8,
    fen: u8,
}

impl HuiPosition {
    /// Creates a position from its hui number `1..=14` and its sub-division `0..=9`.
    pub fn from_hui_and_fen(hui: u8, fen: u8) -> Result<Self, PositionError> {
        if (1..=BEYOND_HUI_VALUE).contains(&hui) && fen <= 9 {
            Ok(Self { hui, fen })
        } else {
            Err(PositionError::InvalidPosition(format!(
                "Hui {hui} with sub-division {fen} is out of range"
            )))
        }
    }

    /// Creates a position from a number like `7`, `10.8` or `14.5`.
    ///
    /// ```
    /// # use qinpu::position::HuiPosition;
    /// assert_eq!(HuiPosition::from_index(10.8).unwrap().to_hui_and_fen(), (10, 8));
    /// assert!(HuiPosition::from_index(1.25).is_err());
    /// assert!(HuiPosition::from_index(0.5).is_err());
    /// ```
    pub fn from_index(index: f64) -> Result<Self, PositionError> {
        let invalid = || {
            PositionError::InvalidPosition(format!(
                "{index} is not a hui number with at most one decimal place"
            ))
        };

        if !index.is_finite() || index < 0.0 {
            return Err(invalid());
        }

        let hui = index.floor();
        let fen = ((index - hui) * 10.0).round();
        if (hui + fen / 10.0 - index).abs() > 1e-9 || hui > f64::from(u8::MAX) {
            return Err(invalid());
        }

        Self::from_hui_and_fen(hui as u8, fen as u8).map_err(|_| invalid())
    }

    /// Parses the marker or the terse notation.
    ///
    /// ```
    /// # use qinpu::position::HuiPosition;
    /// let hui_and_fen = |text| HuiPosition::from_text(text).unwrap().to_hui_and_fen();
    /// assert_eq!(hui_and_fen("徽外"), (14, 0));
    /// assert_eq!(hui_and_fen("十三徽八分"), (13, 8));
    /// assert_eq!(hui_and_fen("一徽半"), (1, 5));
    /// assert_eq!(hui_and_fen("四三"), (4, 3));
    /// assert_eq!(hui_and_fen("十三"), (13, 0));
    /// assert_eq!(hui_and_fen("十八"), (10, 8));
    /// assert!(HuiPosition::from_text("十四徽").is_err());
    /// ```
    pub fn from_text(text: &str) -> Result<Self, PositionError> {
        parse_hui_and_fen(text)
            .and_then(|(hui, fen)| Self::from_hui_and_fen(hui, fen).ok())
            .ok_or_else(|| PositionError::InvalidPosition(format!("'{text}' is not a hui position")))
    }

    pub fn hui(self) -> u8 {
        self.hui
    }

    pub fn fen(self) -> u8 {
        self.fen
    }

    pub fn to_hui_and_fen(self) -> (u8, u8) {
        (self.hui, self.fen)
    }

    pub fn index(self) -> f64 {
        f64::from(self.hui) + f64::from(self.fen) / 10.0
    }

    pub fn is_beyond_hui(self) -> bool {
        self.hui == BEYOND_HUI_VALUE
    }

    /// Renders the marker notation. A sub-division of 5 is written as `半` if `use_half` is set.
    ///
    /// ```
    /// # use qinpu::position::HuiPosition;
    /// let position = HuiPosition::from_hui_and_fen(1, 5).unwrap();
    /// assert_eq!(position.to_text(true), "一徽半分");
    /// assert_eq!(position.to_text(false), "一徽五分");
    ///
    /// let position = HuiPosition::from_hui_and_fen(14, 0).unwrap();
    /// assert_eq!(position.to_text(true), "徽外");
    /// ```
    pub fn to_text(self, use_half: bool) -> String {
        match (self.is_beyond_hui(), self.fen_glyph(use_half)) {
            (true, None) => BEYOND_HUI.to_owned(),
            (true, Some(fen)) => format!("{BEYOND_HUI}{fen}{FEN}"),
            (false, None) => format!("{}{HUI}", self.hui_text()),
            (false, Some(fen)) => format!("{}{HUI}{fen}{FEN}", self.hui_text()),
        }
    }

    /// Renders the terse notation, falling back to the marker notation where the terse form would
    /// be read as a different position.
    ///
    /// ```
    /// # use qinpu::position::HuiPosition;
    /// let terse = |hui, fen| HuiPosition::from_hui_and_fen(hui, fen).unwrap().to_terse_text(true);
    /// assert_eq!(terse(1, 2), "一二");
    /// assert_eq!(terse(10, 8), "十八");
    /// assert_eq!(terse(10, 3), "十徽三分"); // 十三 would be hui 13
    /// assert_eq!(terse(13, 8), "十三徽八分");
    /// ```
    pub fn to_terse_text(self, use_half: bool) -> String {
        match self.fen_glyph(use_half) {
            None => self.hui_text().to_owned(),
            Some(_) if self.hui > 10 || (self.hui == 10 && self.fen <= 3) => self.to_text(use_half),
            Some(fen) => format!("{}{fen}", self.hui_text()),
        }
    }

    /// The fraction of the vibrating string length remaining when the string is stopped here.
    ///
    /// Sub-divisions are interpolated linearly between two huis. There is no such interpolation
    /// for sub-divisions beyond the 13th hui.
    ///
    /// ```
    /// # use assert_approx_eq::assert_approx_eq;
    /// # use qinpu::position::{HuiPosition, PositionError};
    /// let length_ratio = |hui, fen| HuiPosition::from_hui_and_fen(hui, fen).unwrap().length_ratio();
    /// assert_approx_eq!(length_ratio(7, 0).unwrap(), 0.5);
    /// assert_approx_eq!(length_ratio(1, 6).unwrap(), 0.15);
    /// assert!(matches!(length_ratio(14, 3), Err(PositionError::NotImplemented(_))));
    /// ```
    pub fn length_ratio(self) -> Result<f64, PositionError> {
        let hui = usize::from(self.hui);
        if self.fen == 0 {
            return Ok(LENGTH_RATIOS[hui]);
        }
        if self.is_beyond_hui() {
            return Err(PositionError::NotImplemented(format!(
                "No length ratio for sub-divisions beyond the 13th hui ({self})"
            )));
        }

        let low = LENGTH_RATIOS[hui];
        let high = LENGTH_RATIOS[hui + 1];
        Ok(low + (high - low) * f64::from(self.fen) / 10.0)
    }

    /// The overtone sounding when the string is touched lightly here.
    ///
    /// Only defined for positions exactly on one of the huis 1 to 13.
    ///
    /// ```
    /// # use qinpu::position::HuiPosition;
    /// let harmonic = |hui, fen| HuiPosition::from_hui_and_fen(hui, fen).unwrap().harmonic_multiplier();
    /// assert_eq!(harmonic(7, 0), Ok(2));
    /// assert_eq!(harmonic(11, 0), Ok(5));
    /// assert!(harmonic(7, 5).is_err());
    /// assert!(harmonic(14, 0).is_err());
    /// ```
    pub fn harmonic_multiplier(self) -> Result<u8, PositionError> {
        if self.fen != 0 || self.is_beyond_hui() {
            return Err(PositionError::InvalidPosition(format!(
                "{self} is not a harmonic position"
            )));
        }
        Ok(HARMONIC_MULTIPLIERS[usize::from(self.hui)])
    }

    fn hui_text(self) -> &'static str {
        numeral::text_of(self.hui).unwrap_or_default()
    }

    fn fen_glyph(self, use_half: bool) -> Option<char> {
        match self.fen {
            0 => None,
            5 if use_half => Some(HALF),
            fen => numeral::digit_glyph(fen),
        }
    }
}

/// Formats the marker notation or, using the alternate flag, the terse notation.
///
/// ```
/// # use qinpu::position::HuiPosition;
/// let position = HuiPosition::from_hui_and_fen(4, 5).unwrap();
/// assert_eq!(format!("{position}"), "四徽半分");
/// assert_eq!(format!("{position:#}"), "四半");
/// ```
impl Display for HuiPosition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if f.alternate() {
            f.pad(&self.to_terse_text(true))
        } else {
            f.pad(&self.to_text(true))
        }
    }
}

impl FromStr for HuiPosition {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

/// Tries the beyond-hui, the marker and the terse grammar in this order.
///
/// The result is not yet range-checked.
fn parse_hui_and_fen(text: &str) -> Option<(u8, u8)> {
    if let Some(fen) = text.strip_prefix(BEYOND_HUI) {
        return Some((BEYOND_HUI_VALUE, parse_fen(fen)?));
    }
    if let Some((hui, fen)) = text.split_once(HUI) {
        return Some((parse_marked_hui(hui)?, parse_fen(fen)?));
    }
    parse_terse(text)
}

/// An empty sub-division, a digit or a digit followed by the unit.
fn parse_fen(text: &str) -> Option<u8> {
    match glyphs(text)[..] {
        [] => Some(0),
        [digit] | [digit, FEN] => numeral::digit_value_of(digit),
        _ => None,
    }
}

/// A single numeral (`一`..`十`, `半` for 5) or `十` followed by `零`..`三`.
fn parse_marked_hui(text: &str) -> Option<u8> {
    match glyphs(text)[..] {
        [glyph] => numeral::value_of(glyph).filter(|hui| (1..=10).contains(hui)),
        [TEN, glyph] => numeral::digit_value_of(glyph)
            .filter(|&unit| unit <= 3)
            .map(|unit| 10 + unit),
        _ => None,
    }
}

fn parse_terse(text: &str) -> Option<(u8, u8)> {
    match glyphs(text)[..] {
        [OUTSIDE] => Some((BEYOND_HUI_VALUE, 0)),
        [glyph] => numeral::value_of(glyph)
            .filter(|hui| (1..=10).contains(hui))
            .map(|hui| (hui, 0)),
        [TEN, glyph] => match numeral::digit_value_of(glyph)? {
            unit @ 0..=3 => Some((10 + unit, 0)),
            fen => Some((10, fen)),
        },
        [hui, fen] => Some((numeral::value_of(hui)?, numeral::digit_value_of(fen)?)),
        _ => None,
    }
}

fn glyphs(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Error reported when a [`HuiPosition`] cannot be created or does not support an operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PositionError {
    /// The text or number is not a hui position, or the position has no harmonic.
    InvalidPosition(String),

    /// The operation is not defined for this position.
    NotImplemented(String),
}

impl Display for PositionError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PositionError::InvalidPosition(message) => write!(f, "Invalid position: {message}"),
            PositionError::NotImplemented(message) => write!(f, "Not implemented: {message}"),
        }
    }
}

impl Error for PositionError {}

#[cfg(test)]
mod test {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn parse(text: &str) -> (u8, u8) {
        HuiPosition::from_text(text).unwrap().to_hui_and_fen()
    }

    fn position(hui: u8, fen: u8) -> HuiPosition {
        HuiPosition::from_hui_and_fen(hui, fen).unwrap()
    }

    #[test]
    fn parse_beyond_hui() {
        assert_eq!(parse("徽外"), (14, 0));
        assert_eq!(parse("徽外一"), (14, 1));
        assert_eq!(parse("徽外三分"), (14, 3));
        assert_eq!(parse("徽外半分"), (14, 5));
        assert_eq!(parse("外"), (14, 0));
    }

    #[test]
    fn parse_marker_notation() {
        assert_eq!(parse("一徽"), (1, 0));
        assert_eq!(parse("十徽"), (10, 0));
        assert_eq!(parse("十三徽"), (13, 0));
        assert_eq!(parse("一徽二"), (1, 2));
        assert_eq!(parse("一徽二分"), (1, 2));
        assert_eq!(parse("十三徽八分"), (13, 8));
        assert_eq!(parse("一徽半"), (1, 5));
        assert_eq!(parse("九徽零"), (9, 0));
        assert_eq!(parse("十零徽"), (10, 0));
        assert_eq!(parse("十零徽五分"), (10, 5));
        assert_eq!(parse("半徽"), (5, 0));
        assert_eq!(parse("半徽半分"), (5, 5));
    }

    #[test]
    fn parse_terse_notation() {
        assert_eq!(parse("四三"), (4, 3));
        assert_eq!(parse("一半"), (1, 5));
        assert_eq!(parse("十"), (10, 0));
        assert_eq!(parse("十一"), (11, 0));
        assert_eq!(parse("十三"), (13, 0));
        assert_eq!(parse("十四"), (10, 4));
        assert_eq!(parse("十八"), (10, 8));
        assert_eq!(parse("十半"), (10, 5));
        assert_eq!(parse("十零"), (10, 0));
        assert_eq!(parse("半"), (5, 0));
        assert_eq!(parse("半三"), (5, 3));
        assert_eq!(parse("半半"), (5, 5));
    }

    #[test]
    fn parse_invalid_text() {
        for text in [
            "",
            "徽",
            "零",
            "零徽",
            "十四徽",
            "十半徽",
            "二十徽",
            "一徽外",
            "一徽十",
            "一徽二三",
            "一徽二分三",
            "徽外十",
            "徽外一二",
            "十十",
            "十外",
            "一十",
            "一二三",
            "7",
            "seven",
        ] {
            assert!(
                matches!(
                    HuiPosition::from_text(text),
                    Err(PositionError::InvalidPosition(_))
                ),
                "{text}"
            );
        }
    }

    #[test]
    fn invalid_text_is_reported() {
        assert_eq!(
            HuiPosition::from_text("十四徽").unwrap_err().to_string(),
            "Invalid position: '十四徽' is not a hui position"
        );
    }

    #[test]
    fn from_index() {
        assert_eq!(HuiPosition::from_index(1.0).unwrap(), position(1, 0));
        assert_eq!(HuiPosition::from_index(1.6).unwrap(), position(1, 6));
        assert_eq!(HuiPosition::from_index(14.5).unwrap(), position(14, 5));

        for index in [0.0, 0.9, 1.05, 14.95, 15.0, -1.0, f64::NAN, f64::INFINITY, 1e300] {
            assert!(HuiPosition::from_index(index).is_err(), "{index}");
        }

        assert_approx_eq!(position(10, 8).index(), 10.8);
    }

    #[test]
    fn from_hui_and_fen() {
        assert!(HuiPosition::from_hui_and_fen(0, 0).is_err());
        assert!(HuiPosition::from_hui_and_fen(15, 0).is_err());
        assert!(HuiPosition::from_hui_and_fen(1, 10).is_err());
    }

    #[test]
    fn to_text() {
        assert_eq!(position(14, 0).to_text(true), "徽外");
        assert_eq!(position(14, 5).to_text(true), "徽外半分");
        assert_eq!(position(14, 5).to_text(false), "徽外五分");
        assert_eq!(position(14, 2).to_text(true), "徽外二分");
        assert_eq!(position(1, 0).to_text(true), "一徽");
        assert_eq!(position(13, 0).to_text(true), "十三徽");
        assert_eq!(position(1, 2).to_text(true), "一徽二分");
        assert_eq!(position(13, 8).to_text(true), "十三徽八分");
        assert_eq!(position(1, 5).to_text(true), "一徽半分");
        assert_eq!(position(1, 5).to_text(false), "一徽五分");
    }

    #[test]
    fn to_terse_text() {
        assert_eq!(position(14, 0).to_terse_text(true), "徽外");
        assert_eq!(position(14, 5).to_terse_text(true), "徽外半分");
        assert_eq!(position(1, 0).to_terse_text(true), "一");
        assert_eq!(position(13, 0).to_terse_text(true), "十三");
        assert_eq!(position(1, 2).to_terse_text(true), "一二");
        assert_eq!(position(13, 8).to_terse_text(true), "十三徽八分");
        assert_eq!(position(10, 3).to_terse_text(true), "十徽三分");
        assert_eq!(position(10, 8).to_terse_text(true), "十八");
        assert_eq!(position(10, 5).to_terse_text(true), "十半");
        assert_eq!(position(1, 5).to_terse_text(true), "一半");
        assert_eq!(position(1, 5).to_terse_text(false), "一五");
    }

    #[test]
    fn text_roundtrip() {
        for hui in 1..=14 {
            for fen in [0, 1, 2, 3, 5, 8] {
                let position = position(hui, fen);
                for use_half in [true, false] {
                    for text in [position.to_text(use_half), position.to_terse_text(use_half)] {
                        assert_eq!(
                            HuiPosition::from_text(&text).unwrap().to_hui_and_fen(),
                            (hui, fen),
                            "{text}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn length_ratio() {
        assert_approx_eq!(position(1, 0).length_ratio().unwrap(), 1.0 / 8.0);
        assert_approx_eq!(position(7, 0).length_ratio().unwrap(), 0.5);
        assert_approx_eq!(position(13, 0).length_ratio().unwrap(), 7.0 / 8.0);
        assert_approx_eq!(position(1, 6).length_ratio().unwrap(), 0.15);
        assert_approx_eq!(position(10, 8).length_ratio().unwrap(), 0.79);
        assert_approx_eq!(position(13, 5).length_ratio().unwrap(), 0.9375);
        assert_approx_eq!(position(14, 0).length_ratio().unwrap(), 1.0);

        assert!(matches!(
            position(14, 1).length_ratio(),
            Err(PositionError::NotImplemented(_))
        ));
    }

    #[test]
    fn length_ratio_grows_towards_the_bridge() {
        let mut previous = 0.0;
        for hui in 1..=13 {
            for fen in 0..=9 {
                let ratio = position(hui, fen).length_ratio().unwrap();
                assert!(ratio > previous, "{hui}.{fen}");
                previous = ratio;
            }
        }
    }

    #[test]
    fn harmonic_multiplier() {
        let multipliers = (1..=13)
            .map(|hui| position(hui, 0).harmonic_multiplier().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(multipliers, [8, 6, 5, 4, 3, 5, 2, 5, 3, 4, 5, 6, 8]);

        for (hui, fen) in [(14, 0), (14, 5), (1, 1), (7, 5), (13, 9)] {
            assert!(
                matches!(
                    position(hui, fen).harmonic_multiplier(),
                    Err(PositionError::InvalidPosition(_))
                ),
                "{hui}.{fen}"
            );
        }
    }
}
