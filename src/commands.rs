use std::{
    env,
    path::{Path, PathBuf},
};

use bon::Builder;
use clap::{crate_authors, crate_version, Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dockwright_recipe::{BuildConfiguration, DockerRecipe};
use dockwright_tasks::plan::TaskPlan;
use dockwright_utils::constants::{
    DEFAULT_BUILD_DIR, DW_BUILD_DIR, DW_PROJECT_DIR, DW_RECIPE, RECIPE_FILE,
};
use log::{debug, error, trace};
use miette::{Context, IntoDiagnostic, Result};

pub mod command_line;
pub mod completions;
pub mod plan;
pub mod tags;
pub mod validate;

pub trait DockwrightCommand {
    /// Runs the command and returns a result
    /// of the execution
    ///
    /// # Errors
    /// Can return a `miette` Error
    fn try_run(&mut self) -> Result<()>;

    /// Runs the command and exits if there is an error.
    fn run(&mut self) {
        if let Err(e) = self.try_run() {
            error!("{e:?}");
            std::process::exit(1);
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "dockwright",
    about,
    long_about = None,
    author = crate_authors!(),
    version = crate_version!(),
)]
pub struct DockwrightArgs {
    #[command(subcommand)]
    pub command: CommandArgs,

    #[clap(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
pub enum CommandArgs {
    /// Print the tasks of a recipe in execution order
    Plan(plan::PlanCommand),

    /// Print the command line a single task runs
    Command(command_line::CommandLineCommand),

    /// Print the tag steps of a recipe and the
    /// reference each one applies
    Tags(tags::TagsCommand),

    /// Check that a recipe resolves into a valid plan
    Validate(validate::ValidateCommand),

    /// Generate shell completions for your shell to stdout
    Completions(completions::CompletionsCommand),
}

/// Where to find the recipe and where the build context is staged.
#[derive(Debug, Clone, Default, Args, Builder)]
pub struct RecipeArgs {
    /// The recipe file to load.
    ///
    /// A relative path is looked up in the project directory.
    #[arg(short, long, env = DW_RECIPE)]
    #[builder(into)]
    pub recipe: Option<PathBuf>,

    /// The directory relative paths in the
    /// recipe are resolved against.
    ///
    /// Defaults to the current directory.
    #[arg(short = 'C', long, env = DW_PROJECT_DIR)]
    #[builder(into)]
    pub project_dir: Option<PathBuf>,

    /// The build directory the docker
    /// context is staged under.
    #[arg(short, long, env = DW_BUILD_DIR)]
    #[builder(into)]
    pub build_dir: Option<PathBuf>,
}

impl RecipeArgs {
    fn project_dir(&self) -> Result<PathBuf> {
        match self.project_dir.as_ref() {
            Some(dir) if dir.is_absolute() => Ok(dir.clone()),
            Some(dir) => Ok(current_dir()?.join(dir)),
            None => current_dir(),
        }
    }

    /// The recipe path after resolving it against the project directory.
    ///
    /// # Errors
    /// Will error if the current directory can't be determined.
    pub fn recipe_path(&self) -> Result<PathBuf> {
        let recipe = self
            .recipe
            .as_deref()
            .unwrap_or_else(|| Path::new(RECIPE_FILE));

        Ok(if recipe.is_absolute() {
            recipe.to_path_buf()
        } else {
            self.project_dir()?.join(recipe)
        })
    }

    /// Loads the recipe and resolves it.
    ///
    /// # Errors
    /// Will error if the recipe can't be read, parsed, or resolved.
    pub fn load_config(&self) -> Result<BuildConfiguration> {
        trace!("RecipeArgs::load_config()");

        let recipe_path = self.recipe_path()?;
        let recipe = DockerRecipe::parse(&recipe_path)?;

        recipe
            .resolve(&self.project_dir()?)
            .wrap_err_with(|| format!("Failed to resolve {}", recipe_path.display()))
    }

    /// Loads the recipe and plans its tasks.
    ///
    /// # Errors
    /// Will error if the recipe can't be loaded or planned.
    pub fn load_plan(&self) -> Result<TaskPlan> {
        trace!("RecipeArgs::load_plan()");

        let config = self.load_config()?;
        let build_dir = self.build_dir()?;
        debug!("Using build directory {}", build_dir.display());

        TaskPlan::new(&config, &build_dir)
            .wrap_err_with(|| format!("Failed to plan tasks for image {}", config.name))
    }

    fn build_dir(&self) -> Result<PathBuf> {
        let build_dir = self
            .build_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_BUILD_DIR));

        Ok(if build_dir.is_absolute() {
            build_dir.to_path_buf()
        } else {
            self.project_dir()?.join(build_dir)
        })
    }
}

fn current_dir() -> Result<PathBuf> {
    env::current_dir()
        .into_diagnostic()
        .wrap_err("Failed to determine the current directory")
}
