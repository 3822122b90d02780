use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell as CompletionShell};
use log::debug;
use miette::Result;

use super::{DockwrightArgs, DockwrightCommand};

#[derive(Debug, Clone, Args)]
pub struct CompletionsCommand {
    #[arg(value_enum)]
    shell: CompletionShell,
}

impl DockwrightCommand for CompletionsCommand {
    fn try_run(&mut self) -> Result<()> {
        debug!("Generating completions for {shell}", shell = self.shell);

        generate(
            self.shell,
            &mut DockwrightArgs::command(),
            "dockwright",
            &mut std::io::stdout().lock(),
        );

        Ok(())
    }
}
