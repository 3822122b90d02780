use std::io::{self, Write};

use bon::Builder;
use clap::Args;
use colored::Colorize;
use dockwright_tasks::plan::{Task, TaskPlan};
use log::{debug, trace};
use miette::{IntoDiagnostic, Result};

use super::{DockwrightCommand, RecipeArgs};

#[derive(Debug, Clone, Args, Builder)]
pub struct PlanCommand {
    /// The tasks to plan for.
    ///
    /// Their dependencies are included.
    /// Prints every task when empty.
    #[builder(default, into)]
    pub tasks: Vec<String>,

    /// Print the tasks as JSON.
    #[arg(long)]
    #[builder(default)]
    pub json: bool,

    #[clap(flatten)]
    #[builder(default)]
    pub recipe_args: RecipeArgs,
}

impl DockwrightCommand for PlanCommand {
    fn try_run(&mut self) -> Result<()> {
        trace!("PlanCommand::try_run()");

        let plan = self.recipe_args.load_plan()?;
        self.write_plan(&plan, &mut io::stdout().lock())
    }
}

impl PlanCommand {
    fn write_plan<W: Write>(&self, plan: &TaskPlan, out: &mut W) -> Result<()> {
        let tasks = if self.tasks.is_empty() {
            plan.full_order()
        } else {
            plan.execution_order(self.tasks.as_slice())?
        };
        debug!("Printing {} tasks", tasks.len());

        if self.json {
            serde_json::to_writer_pretty(&mut *out, &tasks).into_diagnostic()?;
            writeln!(out).into_diagnostic()?;
        } else {
            for task in tasks {
                writeln!(out, "{}", describe(task)).into_diagnostic()?;
            }
        }

        Ok(())
    }
}

fn describe(task: &Task) -> String {
    if task.depends_on.is_empty() {
        format!("{} - {}", task.name.bold(), task.description)
    } else {
        format!(
            "{} - {} (after {})",
            task.name.bold(),
            task.description,
            task.depends_on.join(", ")
        )
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use crate::commands::test::{project, TEST_RECIPE};

    use super::*;

    fn output(command: &PlanCommand) -> String {
        let plan = command.recipe_args.load_plan().unwrap();
        let mut out = Vec::new();
        command.write_plan(&plan, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_closure_of_targets() {
        colored::control::set_override(false);
        let (_dir, recipe_args) = project(TEST_RECIPE);
        let command = PlanCommand::builder()
            .tasks(vec!["dockerPushLatest".to_string()])
            .recipe_args(recipe_args)
            .build();

        assert_eq!(
            output(&command).lines().collect::<Vec<_>>(),
            [
                "dockerClean - Clean Docker build directory",
                "dockerPrepare - Prepares Docker build directory. (after dockerClean)",
                "docker - Builds Docker image. (after dockerPrepare, jar)",
                "dockerTagLatest - Tags Docker image with tag 'latest' (after docker)",
                "dockerPushLatest - Pushes the Docker image with tag 'latest' to configured \
                 Docker Hub (after dockerTagLatest)",
            ]
        );
    }

    #[test]
    fn prints_json() {
        let (_dir, recipe_args) = project(TEST_RECIPE);
        let command = PlanCommand::builder()
            .tasks(vec!["dockerTagWithTaskName".to_string()])
            .json(true)
            .recipe_args(recipe_args)
            .build();

        let tasks: Value = serde_json::from_str(&output(&command)).unwrap();
        let last = &tasks[3];

        assert_eq!(last["name"], "dockerTagWithTaskName");
        assert_eq!(last["group"], "Docker");
        assert_eq!(last["action"]["type"], "exec");
        assert_eq!(
            last["action"]["command_line"],
            serde_json::json!(["docker", "tag", "id5", "id5:2.0"])
        );
    }

    #[test]
    fn orders_dependency_on_plan_task() {
        colored::control::set_override(false);
        let (_dir, recipe_args) = project("name: id1\ndepends-on: [dockerfileZip]\n");
        let command = PlanCommand::builder()
            .tasks(vec!["docker".to_string()])
            .recipe_args(recipe_args)
            .build();

        assert_eq!(
            output(&command)
                .lines()
                .map(|line| line.split(' ').next().unwrap_or_default())
                .collect::<Vec<_>>(),
            ["dockerClean", "dockerPrepare", "dockerfileZip", "docker"]
        );
    }

    #[test]
    fn unknown_task_fails() {
        let (_dir, recipe_args) = project(TEST_RECIPE);
        let command = PlanCommand::builder()
            .tasks(vec!["dockerDeploy".to_string()])
            .recipe_args(recipe_args)
            .build();
        let plan = command.recipe_args.load_plan().unwrap();

        assert!(command.write_plan(&plan, &mut Vec::new()).is_err());
    }
}
