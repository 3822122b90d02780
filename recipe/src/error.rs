use std::path::PathBuf;

use dockwright_utils::constants::LABEL_KEY_PATTERN;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Why a tag specification was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTagReason {
    /// The spec starts with `@` or is empty.
    EmptyTaskName,

    /// The spec has no `@` but contains a `:` or `/`.
    MissingTaskName,
}

impl std::fmt::Display for InvalidTagReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::EmptyTaskName => "task name must not be empty",
            Self::MissingTaskName => {
                "tag with repository or registry must have an explicit task name"
            }
        })
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("name is a required docker configuration item.")]
    #[diagnostic(help("Set `name` in the recipe to the image that should be built"))]
    MissingName,

    #[error("Invalid docker tag '{spec}': {reason}")]
    #[diagnostic(help("Use `taskName@reference` to give a tag an explicit task name"))]
    InvalidTagSpecification {
        spec: String,
        reason: InvalidTagReason,
    },

    #[error("Task name '{0}' already exists.")]
    #[diagnostic(help("Task names start with an uppercase letter, so `latest` and `Latest` collide"))]
    DuplicateStepIdentifier(String),

    #[error(
        "Docker label '{key}' contains illegal characters. Label keys must only contain \
         lowercase alphanumeric, `.`, or `-` characters (must match {pattern}).",
        pattern = LABEL_KEY_PATTERN
    )]
    #[diagnostic(help("Use reverse DNS notation like `org.opencontainers.image.vendor`"))]
    IllegalLabelKey { key: String },

    #[error("cannot combine 'push' and 'load' options")]
    #[diagnostic(help("Set only one of `push` or `load` for a buildx build"))]
    PushAndLoad,

    #[error("Failed to read recipe {}", .path.display())]
    #[diagnostic(help("Pass the recipe location with `--recipe` or `DW_RECIPE`"))]
    ReadRecipe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize recipe")]
    #[diagnostic(help("Recipe keys are kebab-case, e.g. `named-tags` or `build-args`"))]
    ParseRecipe {
        #[source_code]
        src: NamedSource<String>,

        #[label("here")]
        span: Option<SourceSpan>,

        #[source]
        source: serde_yaml::Error,
    },

    #[error("Task '{0}' does not exist")]
    #[diagnostic(help("Run `dockwright plan` to list the available tasks"))]
    UnknownTask(String),

    #[error("Task '{0}' does not run a command")]
    #[diagnostic(help("Only `docker`, `dockerTag<Id>` and `dockerPush<Id>` run commands"))]
    NotAnExecTask(String),

    #[error("Circular task dependency: {0}")]
    #[diagnostic(help("Tasks listed in `depends-on` must not run after the image build"))]
    CircularDependency(String),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
