use bon::Builder;
use clap::Args;
use colored::Colorize;
use log::{info, trace};
use miette::Result;

use super::{DockwrightCommand, RecipeArgs};

#[derive(Debug, Clone, Args, Builder)]
pub struct ValidateCommand {
    #[clap(flatten)]
    #[builder(default)]
    pub recipe_args: RecipeArgs,
}

impl DockwrightCommand for ValidateCommand {
    fn try_run(&mut self) -> Result<()> {
        trace!("ValidateCommand::try_run()");

        let recipe_path = self.recipe_args.recipe_path()?;
        let recipe_path_display = recipe_path.display().to_string().bold().italic();

        let plan = self.recipe_args.load_plan()?;

        info!(
            "Recipe {recipe_path_display} is valid ({} tasks, {} tags)",
            plan.tasks().count(),
            plan.tag_steps().len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use dockwright_recipe::ConfigError;
    use rstest::rstest;

    use crate::commands::test::{project, TEST_RECIPE};

    use super::*;

    #[test]
    fn valid_recipe_passes() {
        let (_dir, recipe_args) = project(TEST_RECIPE);

        assert!(ValidateCommand::builder()
            .recipe_args(recipe_args)
            .build()
            .try_run()
            .is_ok());
    }

    #[test]
    fn dependency_on_plan_task_passes() {
        let (_dir, recipe_args) = project("name: id1\ndepends-on: [dockerClean]\n");

        assert!(ValidateCommand::builder()
            .recipe_args(recipe_args)
            .build()
            .try_run()
            .is_ok());
    }

    #[test]
    fn cycle_is_reported() {
        let (_dir, recipe_args) = project("name: id1\ndepends-on: [dockerTag]\n");

        let err = ValidateCommand::builder()
            .recipe_args(recipe_args)
            .build()
            .try_run()
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::CircularDependency(cycle)) if cycle == "docker -> dockerTag -> docker"
        ));
    }

    #[rstest]
    #[case::missing_name("tags: [latest]\n")]
    #[case::push_and_load("name: id1\nbuildx: true\npush: true\nload: true\n")]
    #[case::illegal_label("name: id1\nlabels:\n  Bad_Key: x\n")]
    #[case::duplicate_tag("name: id1\ntags: [latest, Latest]\n")]
    #[case::tag_without_task_name("name: id1\ntags: ['registry/app:1']\n")]
    #[case::unknown_key("name: id1\nimage: other\n")]
    #[case::self_dependency("name: id1\ndepends-on: [docker]\n")]
    #[case::indirect_dependency("name: id1\ntags: [latest]\ndepends-on: [dockerPush]\n")]
    fn invalid_recipe_fails(#[case] contents: &str) {
        let (_dir, recipe_args) = project(contents);

        assert!(ValidateCommand::builder()
            .recipe_args(recipe_args)
            .build()
            .try_run()
            .is_err());
    }
}
