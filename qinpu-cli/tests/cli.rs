use std::{
    env, fs,
    process::{Command, Output},
};

use pretty_assertions::assert_eq;

fn call_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qinpu"))
        .args(args)
        .env_remove("QINPU_PRESET")
        .env_remove("QINPU_TUNING_FILE")
        .output()
        .unwrap()
}

fn stdout_of(args: &[&str]) -> String {
    let output = call_cli(args);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn pitch_by_name_and_index() {
    assert_eq!(
        stdout_of(&["pitch", "name", "C4"]),
        "C4 | MIDI 60 | 261.626 Hz\n"
    );
    assert_eq!(
        stdout_of(&["pitch", "index", "69", "--key", "F"]),
        "A4 | MIDI 69 | 440.000 Hz | 3\n"
    );
    assert_eq!(
        stdout_of(&["pitch", "name", "C#4", "--key", "C"]),
        "C#4 | MIDI 61 | 277.183 Hz | -\n"
    );
}

#[test]
fn pitch_by_frequency() {
    assert_eq!(
        stdout_of(&["pitch", "hz", "441", "--eps", "0.1"]),
        "A4 | MIDI 69 | 440.000 Hz | +3.930c\n"
    );
    assert_eq!(
        stdout_of(&["pitch", "hz", "432", "--base", "432"]),
        "A4 | MIDI 69 | 432.000 Hz\n"
    );

    let output = call_cli(&["pitch", "hz", "441"]);
    assert!(!output.status.success());
    assert_eq!(output.stdout, b"");
}

#[test]
fn reject_negative_frequencies() {
    for args in [
        ["pitch", "hz", "--base=-440", "--", "-300"],
        ["pitch", "hz", "--base=440", "--", "-440"],
    ] {
        let output = call_cli(&args);
        assert!(!output.status.success(), "{args:?}");
        assert_eq!(output.stdout, b"");
    }
}

#[test]
fn pitch_by_cipher() {
    assert_eq!(
        stdout_of(&["pitch", "cipher", "C", "3`"]),
        "E5 | MIDI 76 | 659.255 Hz\n"
    );
    assert_eq!(
        stdout_of(&["pitch", "cipher", "F", "1,", "--key", "F"]),
        "F3 | MIDI 53 | 174.614 Hz | 1,\n"
    );
}

#[test]
fn describe_position() {
    assert_eq!(
        stdout_of(&["pos", "十八"]),
        "position: 10.8\n\
         marker: 十徽八分\n\
         terse: 十八\n\
         length ratio: 0.790000\n\
         harmonic: -\n"
    );
    assert_eq!(
        stdout_of(&["pos", "七徽"]),
        "position: 7.0\n\
         marker: 七徽\n\
         terse: 七\n\
         length ratio: 0.500000\n\
         harmonic: 2\n"
    );
    assert_eq!(
        stdout_of(&["pos", "四半", "--no-half"]),
        "position: 4.5\n\
         marker: 四徽五分\n\
         terse: 四五\n\
         length ratio: 0.291667\n\
         harmonic: -\n"
    );
}

#[test]
fn reject_invalid_position() {
    let output = call_cli(&["pos", "二十"]);
    assert!(!output.status.success());
    assert_eq!(output.stdout, b"");
}

#[test]
fn resolve_with_default_technique() {
    assert_eq!(
        stdout_of(&["resolve", "一"]),
        "C2 | MIDI 36 | 65.406 Hz\n"
    );
    assert_eq!(
        stdout_of(&["resolve", "一弦", "一六"]),
        "A4 | MIDI 69 | 440.000 Hz\n"
    );
    assert_eq!(
        stdout_of(&["resolve", "六", "十八"]),
        "E3 | MIDI 52 | 164.814 Hz\n"
    );
}

#[test]
fn resolve_harmonic() {
    assert_eq!(
        stdout_of(&["resolve", "七", "十一", "-t", "harmonic"]),
        "F#5 | MIDI 78 | 739.989 Hz\n"
    );
    assert_eq!(
        stdout_of(&["resolve", "一", "七", "-t", "泛", "--key", "F"]),
        "C3 | MIDI 48 | 130.813 Hz | 5,,\n"
    );
}

#[test]
fn resolve_harmonic_without_position() {
    let output = call_cli(&["resolve", "七", "-t", "harmonic"]);
    assert!(!output.status.success());
    assert_eq!(output.stdout, b"");
}

#[test]
fn resolve_with_preset() {
    assert_eq!(
        stdout_of(&["--preset", "G", "resolve", "一"]),
        "B1 | MIDI 35 | 61.735 Hz\n"
    );

    let output = call_cli(&["--preset", "A", "resolve", "一"]);
    assert!(!output.status.success());
}

#[test]
fn chart_of_highest_string() {
    assert_eq!(
        stdout_of(&["chart", "七"]),
        "七弦 | D3\n\
         一 | D6 | D6\n\
         二 | A5 | A5\n\
         三 | F#5 | F#5\n\
         四 | D5 | D5\n\
         五 | A4 | A4\n\
         六 | F#4 | F#5\n\
         七 | D4 | D4\n\
         八 | B3 | F#5\n\
         九 | A3 | A4\n\
         十 | G3 | D5\n\
         十一 | F#3 | F#5\n\
         十二 | F3 | A5\n\
         十三 | E3 | D6\n\
         徽外 | D3 | -\n"
    );
}

#[test]
fn dump_and_reload_tuning() {
    let dumped = stdout_of(&["--preset", "Eb", "dump"]);

    let tuning_file = env::temp_dir().join(format!("qinpu-tuning-{}.yml", std::process::id()));
    fs::write(&tuning_file, &dumped).unwrap();
    let tuning_path = tuning_file.to_str().unwrap();

    let reloaded = stdout_of(&["--tuning-file", tuning_path, "dump"]);
    let resolved = stdout_of(&["--tuning-file", tuning_path, "resolve", "七"]);
    fs::remove_file(&tuning_file).unwrap();

    assert_eq!(reloaded, dumped);
    assert_eq!(resolved, "D#3 | MIDI 51 | 155.563 Hz\n");
}

#[test]
fn reject_tuning_file_with_wrong_number_of_strings() {
    let tuning_file = env::temp_dir().join(format!("qinpu-short-{}.yml", std::process::id()));
    fs::write(&tuning_file, "strings: [C2, D2, F2]\n").unwrap();

    let output = call_cli(&["--tuning-file", tuning_file.to_str().unwrap(), "dump"]);
    fs::remove_file(&tuning_file).unwrap();

    assert!(!output.status.success());
    assert_eq!(output.stdout, b"");
}
