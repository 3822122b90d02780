use std::io::{self, Write};

use bon::Builder;
use clap::Args;
use dockwright_tasks::plan::TaskPlan;
use dockwright_utils::constants::TAG_TASK;
use log::trace;
use miette::{IntoDiagnostic, Result};

use super::{DockwrightCommand, RecipeArgs};

#[derive(Debug, Clone, Args, Builder)]
pub struct TagsCommand {
    #[clap(flatten)]
    #[builder(default)]
    pub recipe_args: RecipeArgs,
}

impl DockwrightCommand for TagsCommand {
    fn try_run(&mut self) -> Result<()> {
        trace!("TagsCommand::try_run()");

        let plan = self.recipe_args.load_plan()?;
        write_tags(&plan, &mut io::stdout().lock())
    }
}

fn write_tags<W: Write>(plan: &TaskPlan, out: &mut W) -> Result<()> {
    for (id, step) in plan.tag_steps() {
        writeln!(out, "{TAG_TASK}{id} {}", step.reference).into_diagnostic()?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::commands::test::{project, TEST_RECIPE};

    use super::*;

    #[test]
    fn prints_every_tag_step() {
        let (_dir, recipe_args) = project(TEST_RECIPE);
        let plan = recipe_args.load_plan().unwrap();

        let mut out = Vec::new();
        write_tags(&plan, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "dockerTagWithTaskNameByTag id5:new-latest\n\
             dockerTagLatest id5:latest\n\
             dockerTagWithTaskName id5:2.0\n\
             dockerTagNewImageName id5-new:latest\n"
        );
    }

    #[test]
    fn no_tags_prints_nothing() {
        let (_dir, recipe_args) = project("name: id1\n");
        let plan = recipe_args.load_plan().unwrap();

        let mut out = Vec::new();
        write_tags(&plan, &mut out).unwrap();

        assert!(out.is_empty());
    }
}
