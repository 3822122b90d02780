use std::{
    fs,
    path::{Path, PathBuf},
};

use dockwright_utils::constants::{
    DEFAULT_COMPOSE_FILE, DEFAULT_COMPOSE_TEMPLATE, DEFAULT_DOCKERFILE,
};
use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use miette::{NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};

use crate::{
    config::BuildConfiguration,
    error::{ConfigError, Result},
    tag::TagSpecification,
};

/// The docker recipe.
///
/// This is the user-declared content of a `docker.yml`.
/// Nothing in it is validated until it is
/// [resolved](DockerRecipe::resolve) into a [`BuildConfiguration`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Default, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DockerRecipe {
    /// The name of the image to build.
    ///
    /// May carry a registry, a port, and a tag
    /// (`registry:5000/app:1.0`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The Dockerfile to build, relative to the project directory.
    ///
    /// Defaults to `Dockerfile`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<PathBuf>,

    /// Files and directories to copy into the build context.
    pub files: Vec<PathBuf>,

    /// Tasks of the host build the image build depends on.
    pub depends_on: Vec<String>,

    /// Tags to apply to the built image.
    ///
    /// Each entry is either a bare tag (`latest`) or a
    /// `taskName@reference` pair (`stable@registry/app:1`).
    pub tags: IndexSet<String>,

    /// Tags keyed by an explicit task name.
    ///
    /// The value is used as the full image reference.
    pub named_tags: IndexMap<String, String>,

    pub labels: IndexMap<String, String>,

    pub build_args: IndexMap<String, String>,

    pub pull: bool,

    pub no_cache: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    pub buildx: bool,

    pub platform: IndexSet<String>,

    pub load: bool,

    pub push: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub builder: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_template: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_file: Option<PathBuf>,
}

impl DockerRecipe {
    /// Parse a recipe file.
    ///
    /// # Errors
    /// Errors when the file can't be read or
    /// the yaml can't be deserialized.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        fn inner(path: &Path) -> Result<DockerRecipe> {
            trace!("DockerRecipe::parse({})", path.display());

            let file = fs::read_to_string(path).map_err(|source| ConfigError::ReadRecipe {
                path: path.to_path_buf(),
                source,
            })?;

            debug!("Recipe contents: {file}");

            DockerRecipe::from_yaml(&path.display().to_string(), file)
        }
        inner(path.as_ref())
    }

    /// Deserialize a recipe from yaml contents.
    ///
    /// `source_name` is only used when reporting errors.
    ///
    /// # Errors
    /// Errors when the yaml can't be deserialized.
    pub fn from_yaml(source_name: &str, contents: String) -> Result<Self> {
        serde_yaml::from_str::<Self>(&contents).map_err(|source| {
            let span = source
                .location()
                .map(|location| SourceSpan::from((location.index(), 1)));

            ConfigError::ParseRecipe {
                src: NamedSource::new(source_name, contents),
                span,
                source,
            }
        })
    }

    /// Validates the recipe and resolves it into a [`BuildConfiguration`].
    ///
    /// Relative paths are resolved against `project_dir`. Named tags
    /// come before the other tags.
    ///
    /// # Errors
    /// Errors when the image name is missing or empty.
    pub fn resolve(&self, project_dir: &Path) -> Result<BuildConfiguration> {
        trace!("DockerRecipe::resolve({})", project_dir.display());

        let name = self
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingName)?;

        let resolve_path = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                project_dir.join(path)
            }
        };

        let tags = self
            .named_tags
            .iter()
            .map(|(task_name, reference)| TagSpecification::named(task_name, reference))
            .chain(self.tags.iter().map(TagSpecification::bare))
            .collect::<Vec<_>>();

        let config = BuildConfiguration::builder()
            .name(name)
            .dockerfile(resolve_path(
                self.dockerfile
                    .as_deref()
                    .unwrap_or_else(|| Path::new(DEFAULT_DOCKERFILE)),
            ))
            .files(
                self.files
                    .iter()
                    .map(|file| resolve_path(file.as_path()))
                    .collect::<Vec<_>>(),
            )
            .dependencies(self.depends_on.clone())
            .buildx(self.buildx)
            .platforms(self.platform.clone())
            .load(self.load)
            .push(self.push)
            .maybe_builder_name(self.builder.clone())
            .no_cache(self.no_cache)
            .maybe_network(self.network.clone())
            .build_args(self.build_args.clone())
            .labels(self.labels.clone())
            .pull(self.pull)
            .tags(tags)
            .compose_template(resolve_path(
                self.docker_compose_template
                    .as_deref()
                    .unwrap_or_else(|| Path::new(DEFAULT_COMPOSE_TEMPLATE)),
            ))
            .compose_file(resolve_path(
                self.docker_compose_file
                    .as_deref()
                    .unwrap_or_else(|| Path::new(DEFAULT_COMPOSE_FILE)),
            ))
            .build();

        debug!("Resolved configuration: {config:#?}");

        Ok(config)
    }
}
