use clap::{Args, Subcommand};
use qinpu::{
    note::NoteLetter,
    pitch::{ConcertPitch, Pitch, DEFAULT_EPSILON},
};

use crate::{App, CliResult};

#[derive(Subcommand)]
pub(crate) enum PitchCommand {
    /// Scientific pitch name, e.g. C4, A#0, Bb2
    Name {
        name: Pitch,

        #[command(flatten)]
        key: KeyOptions,
    },

    /// Absolute index where 60 is C4 and 69 is A4
    Index {
        #[arg(allow_negative_numbers = true)]
        index: i32,

        #[command(flatten)]
        key: KeyOptions,
    },

    /// Frequency in Hz
    Hz {
        frequency: f64,

        /// Largest acceptable relative deviation from the nearest pitch
        #[arg(long = "eps", default_value_t = DEFAULT_EPSILON)]
        epsilon: f64,

        /// Frequency of A4 in Hz
        #[arg(long = "base", default_value_t = 440.0)]
        a4_hz: f64,

        #[command(flatten)]
        key: KeyOptions,
    },

    /// Cipher notation, e.g. 1, 3` (octave up) or 5,, (two octaves down)
    Cipher {
        /// Key of the cipher, one of C, D, E, F, G, A, B
        cipher_key: String,

        #[arg(allow_hyphen_values = true)]
        cipher: String,

        #[command(flatten)]
        key: KeyOptions,
    },
}

#[derive(Args)]
pub(crate) struct KeyOptions {
    /// Also print the cipher notation in this key
    #[arg(long = "key")]
    key: Option<NoteLetter>,
}

impl PitchCommand {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        match self {
            PitchCommand::Name { name, key } => print_pitch(app, *name, key),
            PitchCommand::Index { index, key } => print_pitch(app, Pitch::from_index(*index)?, key),
            PitchCommand::Hz {
                frequency,
                epsilon,
                a4_hz,
                key,
            } => {
                let concert_pitch = ConcertPitch::from_a4_hz(*a4_hz);
                let pitch = Pitch::from_frequency(*frequency, concert_pitch, *epsilon)?;
                app.write(Pitch::describe(*frequency, concert_pitch)?)?;
                print_cipher(app, pitch, key)
            }
            PitchCommand::Cipher {
                cipher_key,
                cipher,
                key,
            } => print_pitch(app, Pitch::from_cipher(cipher_key, cipher)?, key),
        }
    }
}

pub(crate) fn print_pitch(app: &mut App, pitch: Pitch, key: &KeyOptions) -> CliResult<()> {
    app.write(format_args!(
        "{} | MIDI {} | {:.3} Hz",
        pitch,
        pitch.index(),
        pitch.frequency()
    ))?;
    print_cipher(app, pitch, key)
}

/// Completes the line, showing `-` if the pitch is not a degree of the key.
fn print_cipher(app: &mut App, pitch: Pitch, key: &KeyOptions) -> CliResult<()> {
    if let Some(key) = key.key {
        let cipher = pitch
            .to_cipher(&key.to_string())
            .unwrap_or_else(|_| "-".to_owned());
        app.write(format_args!(" | {cipher}"))?;
    }
    app.writeln("")?;
    Ok(())
}
