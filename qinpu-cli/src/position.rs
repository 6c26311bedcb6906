use clap::Args;
use qinpu::position::HuiPosition;

use crate::{App, CliResult};

#[derive(Args)]
pub(crate) struct PositionOptions {
    /// Position in marker (e.g. 十徽八分, 徽外) or terse (e.g. 十八, 四半) notation
    position: HuiPosition,

    /// Write a sub-division of 5 as 五 instead of 半
    #[arg(long = "no-half")]
    no_half: bool,
}

impl PositionOptions {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        let position = self.position;
        let use_half = !self.no_half;

        app.writeln(format_args!("position: {:.1}", position.index()))?;
        app.writeln(format_args!("marker: {}", position.to_text(use_half)))?;
        app.writeln(format_args!("terse: {}", position.to_terse_text(use_half)))?;

        match position.length_ratio() {
            Ok(length_ratio) => app.writeln(format_args!("length ratio: {length_ratio:.6}"))?,
            Err(err) => {
                log::debug!("{err}");
                app.writeln("length ratio: -")?
            }
        }

        match position.harmonic_multiplier() {
            Ok(multiplier) => app.writeln(format_args!("harmonic: {multiplier}"))?,
            Err(_) => app.writeln("harmonic: -")?,
        }

        Ok(())
    }
}
