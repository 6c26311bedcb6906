use std::{env, io::ErrorKind};

use qinpu_cli::{CliError, CliResult};

fn main() -> CliResult<()> {
    env_logger::init();

    match qinpu_cli::run_in_shell_env(env::args()) {
        // The reading end of a pipe has been closed, e.g. `qinpu chart 七 | head -n 3`.
        Err(CliError::IoError(err)) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
