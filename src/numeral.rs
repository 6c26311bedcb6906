//! The Chinese numeral vocabulary of guqin tablature.

/// Ten, the prefix of the compound numerals 11, 12 and 13.
pub const TEN: char = '十';

/// Half, standing for a sub-division of 5.
pub const HALF: char = '半';

/// The hui marker, separating the hui number from its sub-division.
pub const HUI: char = '徽';

/// The sub-division unit following a decimal digit.
pub const FEN: char = '分';

/// The string unit following a string number.
pub const XIAN: char = '弦';

/// Standalone glyph for the zone beyond the 13th hui.
pub const OUTSIDE: char = '外';

/// The word for the zone beyond the 13th hui.
pub const BEYOND_HUI: &str = "徽外";

/// Value of the zone beyond the 13th hui.
pub const BEYOND_HUI_VALUE: u8 = 14;

const DIGITS: [char; 11] = ['零', '一', '二', '三', '四', '五', '六', '七', '八', '九', '十'];

const NUMERALS: [&str; 15] = [
    "零", "一", "二", "三", "四", "五", "六", "七", "八", "九", "十", "十一", "十二", "十三", "徽外",
];

/// Looks up the value of a single numeral glyph.
///
/// ```
/// # use qinpu::numeral;
/// assert_eq!(numeral::value_of('七'), Some(7));
/// assert_eq!(numeral::value_of('十'), Some(10));
/// assert_eq!(numeral::value_of('半'), Some(5));
/// assert_eq!(numeral::value_of('外'), Some(14));
/// assert_eq!(numeral::value_of('徽'), None);
/// ```
pub fn value_of(glyph: char) -> Option<u8> {
    match glyph {
        HALF => Some(5),
        OUTSIDE => Some(BEYOND_HUI_VALUE),
        glyph => DIGITS
            .iter()
            .position(|&digit| digit == glyph)
            .map(|value| value as u8),
    }
}

/// Looks up a glyph standing for a single decimal digit, i.e. `零`..`九` or `半`.
pub fn digit_value_of(glyph: char) -> Option<u8> {
    value_of(glyph).filter(|&value| value <= 9)
}

/// The single glyph for a digit `0..=10`.
pub fn digit_glyph(value: u8) -> Option<char> {
    DIGITS.get(usize::from(value)).copied()
}

/// Renders `0..=14` where 11, 12 and 13 are compound numerals and 14 is [`BEYOND_HUI`].
///
/// ```
/// # use qinpu::numeral;
/// assert_eq!(numeral::text_of(3), Some("三"));
/// assert_eq!(numeral::text_of(12), Some("十二"));
/// assert_eq!(numeral::text_of(14), Some("徽外"));
/// assert_eq!(numeral::text_of(15), None);
/// ```
pub fn text_of(value: u8) -> Option<&'static str> {
    NUMERALS.get(usize::from(value)).copied()
}
