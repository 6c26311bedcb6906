use std::{fs::File, path::PathBuf};

use clap::Args;
use qinpu::{
    position::HuiPosition,
    string_index::StringIndex,
    tuning::{StringTuning, Technique},
};

use crate::{
    dto::TuningDto,
    error::ResultExt,
    pitch::{self, KeyOptions},
    App, CliError, CliResult,
};

#[derive(Args)]
pub(crate) struct TuningOptions {
    /// Preset tuning of the open strings, one of F, C, Bb, G, Eb
    #[arg(long = "preset", env = "QINPU_PRESET", default_value = "F")]
    preset: String,

    /// YAML file listing the open strings, e.g. `strings: [C2, D2, F2, G2, A2, C3, D3]`.
    /// Takes precedence over --preset
    #[arg(long = "tuning-file", env = "QINPU_TUNING_FILE")]
    tuning_file: Option<PathBuf>,
}

impl TuningOptions {
    fn to_tuning(&self) -> CliResult<StringTuning> {
        match &self.tuning_file {
            Some(tuning_file) => {
                log::info!("Loading tuning from {}", tuning_file.display());
                let file = File::open(tuning_file)
                    .handle_error::<CliError>("Could not open tuning file")?;
                TuningDto::read(file)?.to_tuning()
            }
            None => {
                log::info!("Using preset tuning {}", self.preset);
                Ok(StringTuning::from_preset(&self.preset)?)
            }
        }
    }
}

#[derive(Args)]
pub(crate) struct ResolveOptions {
    /// String 一 (lowest) to 七 (highest), optionally followed by 弦
    string: StringIndex,

    /// Position in marker or terse notation. Not needed for open strings
    position: Option<HuiPosition>,

    /// open (san, 散), pressed (an, 按) or harmonic (fan, 泛).
    /// Defaults to pressed if a position is given and to open otherwise
    #[arg(short = 't', long = "technique")]
    technique: Option<Technique>,

    #[command(flatten)]
    key: KeyOptions,
}

impl ResolveOptions {
    pub fn run(&self, app: &mut App, tuning: &TuningOptions) -> CliResult<()> {
        let tuning = tuning.to_tuning()?;

        let technique = self.technique.unwrap_or(match self.position {
            Some(_) => Technique::Pressed,
            None => Technique::Open,
        });

        let pitch = tuning.pitch_at(self.string, self.position, technique)?;
        pitch::print_pitch(app, pitch, &self.key)
    }
}

#[derive(Args)]
pub(crate) struct ChartOptions {
    /// String 一 (lowest) to 七 (highest), optionally followed by 弦
    string: StringIndex,
}

impl ChartOptions {
    pub fn run(&self, app: &mut App, tuning: &TuningOptions) -> CliResult<()> {
        let tuning = tuning.to_tuning()?;

        app.writeln(format_args!(
            "{} | {}",
            self.string,
            tuning.open_pitch(self.string)
        ))?;

        for hui in 1..=14 {
            let position = HuiPosition::from_hui_and_fen(hui, 0)?;
            let pressed = tuning.pitch_at(self.string, Some(position), Technique::Pressed);
            let harmonic = tuning.pitch_at(self.string, Some(position), Technique::Harmonic);

            app.writeln(format_args!(
                "{position:#} | {} | {}",
                pressed.map_or_else(|_| "-".to_owned(), |pitch| pitch.to_string()),
                harmonic.map_or_else(|_| "-".to_owned(), |pitch| pitch.to_string()),
            ))?;
        }

        Ok(())
    }
}

pub(crate) fn dump_tuning(app: &mut App, tuning: &TuningOptions) -> CliResult<()> {
    let tuning = tuning.to_tuning()?;
    let yaml = serde_yaml::to_string(&TuningDto::from_tuning(&tuning))
        .handle_error::<CliError>("Could not encode tuning")?;
    app.writeln(yaml.trim())?;
    Ok(())
}
