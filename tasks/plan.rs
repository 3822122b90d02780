use std::path::{Path, PathBuf};

use bon::Builder;
use dockwright_recipe::{BuildConfiguration, ConfigError, Result, TagStep};
use dockwright_utils::constants::{
    BUILD_TASK, CLEAN_TASK, DOCKERFILE_ZIP, DOCKERFILE_ZIP_TASK,
    DOCKER_BUILD_DIR, PREPARE_TASK, PUSH_TASK, TAGS_PUSH_TASK, TAG_TASK, TASK_GROUP,
};
use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use serde::Serialize;

use crate::drivers::{
    opts::{PushOpts, TagOpts},
    BuildDriver, DockerDriver,
};

/// What a task does when the orchestrator runs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TaskAction {
    /// Remove paths recursively.
    Delete { paths: Vec<PathBuf> },

    /// Copy the context files and the Dockerfile into a directory.
    /// The Dockerfile is always written as `Dockerfile`.
    Copy {
        files: Vec<PathBuf>,
        dockerfile: PathBuf,
        into: PathBuf,
    },

    /// Run a command line from a working directory.
    Exec {
        working_dir: PathBuf,
        command_line: Vec<String>,
    },

    /// Bundle files into an archive.
    Zip { files: Vec<PathBuf>, archive: PathBuf },

    /// Does nothing on its own, only aggregates dependencies.
    Lifecycle,
}

/// A named, schedulable unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Builder)]
#[serde(rename_all = "kebab-case")]
pub struct Task {
    #[builder(into)]
    pub name: String,

    #[builder(default = TASK_GROUP)]
    pub group: &'static str,

    #[builder(into)]
    pub description: String,

    /// Names of the tasks that have to run first.
    /// They may name tasks outside of the plan.
    #[builder(default, into)]
    pub depends_on: Vec<String>,

    pub action: TaskAction,
}

/// Every task derived from one [`BuildConfiguration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPlan {
    tasks: IndexMap<String, Task>,
    tag_steps: IndexMap<String, TagStep>,
    order: Vec<String>,
}

impl TaskPlan {
    /// Creates the plan for a configuration.
    ///
    /// `build_dir` is the directory the build context is staged under.
    ///
    /// # Errors
    /// Will error if the tags can't be resolved into unique steps,
    /// if the build command line can't be assembled, or if the
    /// configured dependencies close a cycle.
    #[allow(clippy::too_many_lines)]
    pub fn new(config: &BuildConfiguration, build_dir: &Path) -> Result<Self> {
        trace!("TaskPlan::new({}, {})", config.name, build_dir.display());

        let context_dir = build_dir.join(DOCKER_BUILD_DIR);
        let tag_steps = config.tag_steps()?;
        let build_command = DockerDriver::build_command_line(config)?;

        let mut tasks = vec![
            Task::builder()
                .name(CLEAN_TASK)
                .description("Clean Docker build directory")
                .action(TaskAction::Delete {
                    paths: vec![context_dir.clone()],
                })
                .build(),
            Task::builder()
                .name(PREPARE_TASK)
                .description("Prepares Docker build directory.")
                .depends_on([CLEAN_TASK.to_string()])
                .action(TaskAction::Copy {
                    files: config.files.clone(),
                    dockerfile: config.dockerfile.clone(),
                    into: context_dir.clone(),
                })
                .build(),
            Task::builder()
                .name(BUILD_TASK)
                .description("Builds Docker image.")
                .depends_on(
                    std::iter::once(PREPARE_TASK.to_string())
                        .chain(config.dependencies.iter().cloned())
                        .collect::<Vec<_>>(),
                )
                .action(TaskAction::Exec {
                    working_dir: context_dir.clone(),
                    command_line: build_command,
                })
                .build(),
            Task::builder()
                .name(TAG_TASK)
                .description("Applies all tags to the Docker image.")
                .depends_on(
                    std::iter::once(BUILD_TASK.to_string())
                        .chain(tag_steps.keys().map(|id| format!("{TAG_TASK}{id}")))
                        .collect::<Vec<_>>(),
                )
                .action(TaskAction::Lifecycle)
                .build(),
            Task::builder()
                .name(TAGS_PUSH_TASK)
                .description("Pushes all tagged Docker images to configured Docker Hub.")
                .depends_on(
                    tag_steps
                        .keys()
                        .map(|id| format!("{PUSH_TASK}{id}"))
                        .collect::<Vec<_>>(),
                )
                .action(TaskAction::Lifecycle)
                .build(),
            Task::builder()
                .name(PUSH_TASK)
                .description("Pushes named Docker image to configured Docker Hub.")
                .depends_on([TAGS_PUSH_TASK.to_string()])
                .action(TaskAction::Lifecycle)
                .build(),
            Task::builder()
                .name(DOCKERFILE_ZIP_TASK)
                .description("Bundles the configured Dockerfile in a zip file")
                .action(TaskAction::Zip {
                    files: vec![config.dockerfile.clone()],
                    archive: build_dir.join(DOCKERFILE_ZIP),
                })
                .build(),
        ];

        for (id, step) in &tag_steps {
            let tag_task = format!("{TAG_TASK}{id}");
            let declared = step.spec.declared();

            let tag = TagOpts::builder()
                .src_image(config.name.as_str())
                .dest_image(step.reference.as_str())
                .build();
            let push = PushOpts::builder().image(step.reference.as_str()).build();

            tasks.push(
                Task::builder()
                    .name(tag_task.clone())
                    .description(format!("Tags Docker image with tag '{declared}'"))
                    .depends_on([BUILD_TASK.to_string()])
                    .action(TaskAction::Exec {
                        working_dir: context_dir.clone(),
                        command_line: DockerDriver::tag_command_line(&tag),
                    })
                    .build(),
            );
            tasks.push(
                Task::builder()
                    .name(format!("{PUSH_TASK}{id}"))
                    .description(format!(
                        "Pushes the Docker image with tag '{declared}' to configured Docker Hub"
                    ))
                    .depends_on([tag_task])
                    .action(TaskAction::Exec {
                        working_dir: context_dir.clone(),
                        command_line: DockerDriver::push_command_line(&push),
                    })
                    .build(),
            );
        }

        let mut plan = Self {
            tasks: tasks
                .into_iter()
                .map(|task| (task.name.clone(), task))
                .collect(),
            tag_steps,
            order: Vec::new(),
        };

        plan.order = plan
            .walk(plan.tasks.keys())?
            .into_iter()
            .map(str::to_owned)
            .collect();

        debug!("Planned tasks: {:?}", plan.order);

        Ok(plan)
    }

    /// Looks up a task by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// All tasks in the order they were declared.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// The resolved tag steps, keyed by their identifier.
    #[must_use]
    pub const fn tag_steps(&self) -> &IndexMap<String, TagStep> {
        &self.tag_steps
    }

    /// The targets and everything they depend on, dependencies first.
    ///
    /// Ties are broken by the order targets are given in and the
    /// order dependencies are declared in. Dependencies on tasks
    /// outside of the plan are left to the orchestrator.
    ///
    /// # Errors
    /// Will error if a target isn't part of the plan.
    pub fn execution_order<S: AsRef<str>>(&self, targets: &[S]) -> Result<Vec<&Task>> {
        trace!(
            "TaskPlan::execution_order({:?})",
            targets.iter().map(AsRef::as_ref).collect::<Vec<_>>()
        );

        Ok(self
            .walk(targets)?
            .into_iter()
            .filter_map(|name| self.tasks.get(name))
            .collect())
    }

    /// Every task in the plan, dependencies first.
    #[must_use]
    pub fn full_order(&self) -> Vec<&Task> {
        self.order
            .iter()
            .filter_map(|name| self.tasks.get(name))
            .collect()
    }

    fn walk<'a, I, S>(&'a self, targets: I) -> Result<IndexSet<&'a str>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut visiting = IndexSet::new();
        let mut ordered = IndexSet::new();

        for target in targets {
            let target = target.as_ref();
            if !self.tasks.contains_key(target) {
                return Err(ConfigError::UnknownTask(target.to_owned()));
            }
            self.visit(target, &mut visiting, &mut ordered)?;
        }

        Ok(ordered)
    }

    fn visit<'a>(
        &'a self,
        name: &str,
        visiting: &mut IndexSet<&'a str>,
        ordered: &mut IndexSet<&'a str>,
    ) -> Result<()> {
        if ordered.contains(name) {
            return Ok(());
        }

        let Some((key, task)) = self.tasks.get_key_value(name) else {
            trace!("Leaving external task {name} to the orchestrator");
            return Ok(());
        };

        if let Some(start) = visiting.get_index_of(key.as_str()) {
            let cycle = visiting
                .iter()
                .skip(start)
                .copied()
                .chain(std::iter::once(key.as_str()))
                .collect::<Vec<_>>();
            return Err(ConfigError::CircularDependency(cycle.join(" -> ")));
        }

        visiting.insert(key.as_str());
        for dependency in &task.depends_on {
            self.visit(dependency, visiting, ordered)?;
        }
        visiting.pop();

        ordered.insert(key.as_str());
        Ok(())
    }

    /// The command line an exec task runs.
    ///
    /// # Errors
    /// Will error if the task doesn't exist or doesn't run a command.
    pub fn command_line(&self, name: &str) -> Result<&[String]> {
        trace!("TaskPlan::command_line({name})");

        match self.tasks.get(name) {
            Some(Task {
                action: TaskAction::Exec { command_line, .. },
                ..
            }) => Ok(command_line),
            Some(_) => Err(ConfigError::NotAnExecTask(name.to_owned())),
            None => Err(ConfigError::UnknownTask(name.to_owned())),
        }
    }
}
