use std::io::Read;

use qinpu::tuning::StringTuning;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ResultExt;
use crate::CliError;
use crate::CliResult;

/// Open pitches of the seven strings by scientific name, lowest string first.
#[derive(Debug, Deserialize, Serialize)]
pub struct TuningDto {
    pub strings: Vec<String>,
}

impl TuningDto {
    pub fn read(input: impl Read) -> CliResult<TuningDto> {
        serde_yaml::from_reader(input).handle_error::<CliError>("Could not parse tuning file")
    }

    pub fn from_tuning(tuning: &StringTuning) -> Self {
        Self {
            strings: tuning
                .pitches()
                .iter()
                .map(|pitch| pitch.name())
                .collect(),
        }
    }

    pub fn to_tuning(&self) -> CliResult<StringTuning> {
        Ok(StringTuning::from_names(self.strings.as_slice())?)
    }
}
