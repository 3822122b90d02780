use std::io::{self, Write};

use bon::Builder;
use clap::Args;
use dockwright_tasks::plan::TaskPlan;
use log::trace;
use miette::{IntoDiagnostic, Result};

use super::{DockwrightCommand, RecipeArgs};

#[derive(Debug, Clone, Args, Builder)]
pub struct CommandLineCommand {
    /// The exec task to print the command line of
    /// (e.g. `docker` or `dockerTagLatest`).
    #[builder(into)]
    pub task: String,

    #[clap(flatten)]
    #[builder(default)]
    pub recipe_args: RecipeArgs,
}

impl DockwrightCommand for CommandLineCommand {
    fn try_run(&mut self) -> Result<()> {
        trace!("CommandLineCommand::try_run()");

        let plan = self.recipe_args.load_plan()?;
        self.write_command_line(&plan, &mut io::stdout().lock())
    }
}

impl CommandLineCommand {
    fn write_command_line<W: Write>(&self, plan: &TaskPlan, out: &mut W) -> Result<()> {
        let command_line = plan.command_line(&self.task)?;

        writeln!(out, "{}", command_line.join(" ")).into_diagnostic()
    }
}
