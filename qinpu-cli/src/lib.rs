mod dto;
mod error;
mod pitch;
mod position;
mod resolve;

use std::{
    fmt::{self, Debug, Display},
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use pitch::PitchCommand;
use position::PositionOptions;
use qinpu::{
    pitch::PitchError, position::PositionError, string_index::StringIndexError,
    tuning::{ResolveError, TuningError},
};
use resolve::{ChartOptions, ResolveOptions, TuningOptions};

#[derive(Parser)]
#[command(name = "qinpu", version, about)]
struct MainOptions {
    /// Write output to a file instead of stdout
    #[arg(long = "of")]
    output_file: Option<PathBuf>,

    #[command(flatten)]
    tuning: TuningOptions,

    #[command(subcommand)]
    command: MainCommand,
}

#[derive(Subcommand)]
enum MainCommand {
    /// Convert a pitch between name, index, frequency and cipher notation
    #[command(subcommand)]
    Pitch(PitchCommand),

    /// Show both notations, the length ratio and the harmonic of a hui position
    Pos(PositionOptions),

    /// Find the pitch sounding on a string at a hui position
    Resolve(ResolveOptions),

    /// List the pressed and harmonic pitches of all huis on a string
    Chart(ChartOptions),

    /// Print the active tuning in the tuning file format
    Dump,
}

impl MainOptions {
    fn run(self) -> CliResult<()> {
        let stdout = io::stdout();
        let output: Box<dyn Write> = match self.output_file {
            Some(output_file) => Box::new(File::create(output_file)?),
            None => Box::new(stdout.lock()),
        };

        let mut app = App { output };

        self.command.run(&mut app, &self.tuning)
    }
}

impl MainCommand {
    fn run(self, app: &mut App, tuning: &TuningOptions) -> CliResult<()> {
        match self {
            MainCommand::Pitch(command) => command.run(app)?,
            MainCommand::Pos(options) => options.run(app)?,
            MainCommand::Resolve(options) => options.run(app, tuning)?,
            MainCommand::Chart(options) => options.run(app, tuning)?,
            MainCommand::Dump => resolve::dump_tuning(app, tuning)?,
        }
        Ok(())
    }
}

pub fn run_in_shell_env(args: impl IntoIterator<Item = String>) -> CliResult<()> {
    let options = match MainOptions::try_parse_from(args) {
        Err(err) => {
            return if err.use_stderr() {
                Err(CliError::CommandError(err.to_string()))
            } else {
                print!("{err}");
                Ok(())
            };
        }
        Ok(options) => options,
    };

    options.run()
}

struct App<'a> {
    output: Box<dyn 'a + Write>,
}

impl App<'_> {
    pub fn write(&mut self, message: impl Display) -> io::Result<()> {
        write!(&mut self.output, "{message}")
    }

    pub fn writeln(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(&mut self.output, "{message}")
    }
}

pub type CliResult<T> = Result<T, CliError>;

pub enum CliError {
    IoError(io::Error),
    CommandError(String),
}

impl Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::IoError(err) => write!(f, "IO error / {err}"),
            CliError::CommandError(err) => write!(f, "The command failed / {err}"),
        }
    }
}

impl From<String> for CliError {
    fn from(v: String) -> Self {
        CliError::CommandError(v)
    }
}

impl From<io::Error> for CliError {
    fn from(v: io::Error) -> Self {
        CliError::IoError(v)
    }
}

impl From<PitchError> for CliError {
    fn from(v: PitchError) -> Self {
        CliError::CommandError(v.to_string())
    }
}

impl From<PositionError> for CliError {
    fn from(v: PositionError) -> Self {
        CliError::CommandError(v.to_string())
    }
}

impl From<StringIndexError> for CliError {
    fn from(v: StringIndexError) -> Self {
        CliError::CommandError(v.to_string())
    }
}

impl From<TuningError> for CliError {
    fn from(v: TuningError) -> Self {
        CliError::CommandError(format!("Could not create tuning ({v})"))
    }
}

impl From<ResolveError> for CliError {
    fn from(v: ResolveError) -> Self {
        CliError::CommandError(format!("Could not resolve pitch ({v})"))
    }
}
