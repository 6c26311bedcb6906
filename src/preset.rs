//! Common tunings of the seven strings, named by the key they are played in.

use crate::string_index::NUM_STRINGS;

/// Keys with a preset, in canonical spelling.
pub const PRESET_KEYS: [&str; 5] = ["F", "C", "Bb", "G", "Eb"];

/// The scientific names of the open strings 1 to 7 in the preset for `key`.
///
/// Flat keys may also be written with the accidental first, e.g. `bB`.
///
/// ```
/// # use qinpu::preset;
/// assert_eq!(preset::open_string_names("F").unwrap()[0], "C2");
/// assert_eq!(preset::open_string_names("bE"), preset::open_string_names("Eb"));
/// assert_eq!(preset::open_string_names("A"), None);
/// ```
pub fn open_string_names(key: &str) -> Option<[&'static str; NUM_STRINGS as usize]> {
    Some(match key {
        "F" => ["C2", "D2", "F2", "G2", "A2", "C3", "D3"],
        "C" => ["C2", "D2", "E2", "G2", "A2", "C3", "D3"],
        "Bb" | "bB" => ["C2", "D2", "F2", "G2", "Bb2", "C3", "D3"],
        "G" => ["B1", "D2", "E2", "G2", "A2", "B2", "D3"],
        "Eb" | "bE" => ["C2", "Eb2", "F2", "G2", "Bb2", "C3", "Eb3"],
        _ => return None,
    })
}

#[cfg(test)]
mod test {
    use crate::pitch::Pitch;

    use super::*;

    #[test]
    fn all_presets_consist_of_valid_ascending_pitches() {
        for key in PRESET_KEYS {
            let pitches = open_string_names(key)
                .unwrap()
                .map(|name| Pitch::from_name(name).unwrap());
            assert!(pitches.windows(2).all(|pair| pair[0] < pair[1]), "{key}");
        }
    }
}
