use std::path::PathBuf;

use bon::Builder;
use dockwright_utils::constants::{DEFAULT_COMPOSE_FILE, DEFAULT_COMPOSE_TEMPLATE, DEFAULT_DOCKERFILE};
use indexmap::{map::Entry, IndexMap, IndexSet};
use log::trace;

use crate::{
    error::{ConfigError, Result},
    tag::{TagSpecification, TagStep},
};

/// Everything needed to build, tag, and push one image.
///
/// This is an immutable snapshot. It is created once, either
/// directly through the builder or by resolving a
/// [`DockerRecipe`](crate::DockerRecipe), and only read afterwards.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct BuildConfiguration {
    /// The image name the build is tagged with.
    #[builder(into)]
    pub name: String,

    /// The Dockerfile to build.
    #[builder(into, default = PathBuf::from(DEFAULT_DOCKERFILE))]
    pub dockerfile: PathBuf,

    /// Files copied into the build context.
    #[builder(default, into)]
    pub files: Vec<PathBuf>,

    /// Tasks of the host build that must run before the image build.
    #[builder(default, into)]
    pub dependencies: Vec<String>,

    /// Use `docker buildx build` instead of `docker build`.
    #[builder(default)]
    pub buildx: bool,

    /// Target platforms for a buildx build, in declaration order.
    #[builder(default, into)]
    pub platforms: IndexSet<String>,

    /// Load the buildx result into the local image store.
    #[builder(default)]
    pub load: bool,

    /// Push the buildx result straight to the registry.
    #[builder(default)]
    pub push: bool,

    /// The buildx builder instance to use.
    #[builder(into)]
    pub builder_name: Option<String>,

    #[builder(default)]
    pub no_cache: bool,

    /// Networking mode for `RUN` instructions.
    #[builder(into)]
    pub network: Option<String>,

    #[builder(default, into)]
    pub build_args: IndexMap<String, String>,

    #[builder(default, into)]
    pub labels: IndexMap<String, String>,

    /// Always attempt to pull a newer version of the base image.
    #[builder(default)]
    pub pull: bool,

    /// Tags to apply after the build, in declaration order.
    #[builder(default, into)]
    pub tags: Vec<TagSpecification>,

    #[builder(into, default = PathBuf::from(DEFAULT_COMPOSE_TEMPLATE))]
    pub compose_template: PathBuf,

    #[builder(into, default = PathBuf::from(DEFAULT_COMPOSE_FILE))]
    pub compose_file: PathBuf,
}

impl BuildConfiguration {
    /// Resolves every tag into the step it creates.
    ///
    /// Steps are keyed by their identifier and keep the
    /// declaration order of the tags.
    ///
    /// # Errors
    /// Will error if a tag spec is invalid or if two tags
    /// derive the same step identifier.
    pub fn tag_steps(&self) -> Result<IndexMap<String, TagStep>> {
        trace!("BuildConfiguration::tag_steps()");

        let mut steps = IndexMap::with_capacity(self.tags.len());

        for spec in &self.tags {
            match steps.entry(spec.step_identifier()?) {
                Entry::Occupied(entry) => {
                    return Err(ConfigError::DuplicateStepIdentifier(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    let step = TagStep {
                        identifier: entry.key().clone(),
                        reference: spec.resolve(&self.name),
                        spec: spec.clone(),
                    };
                    entry.insert(step);
                }
            }
        }

        Ok(steps)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tags<const N: usize>(specs: [&str; N]) -> Vec<TagSpecification> {
        specs.into_iter().map(TagSpecification::bare).collect()
    }

    #[test]
    fn defaults() {
        let config = BuildConfiguration::builder().name("id1").build();

        assert_eq!(config.dockerfile, PathBuf::from("Dockerfile"));
        assert_eq!(config.compose_file, PathBuf::from("docker-compose.yml"));
        assert!(!config.buildx);
        assert!(config.labels.is_empty());
        assert!(config.tag_steps().unwrap().is_empty());
    }

    #[test]
    fn resolves_tag_steps_in_order() {
        let mut specs = vec![TagSpecification::named(
            "withTaskNameByTag",
            "id5:new-latest",
        )];
        specs.extend(tags([
            "latest",
            "another",
            "withTaskName@2.0",
            "newImageName@id5-new:latest",
        ]));

        let config = BuildConfiguration::builder()
            .name("id5")
            .tags(specs)
            .build();

        let steps = config
            .tag_steps()
            .unwrap()
            .into_iter()
            .map(|(id, step)| (id, step.reference))
            .collect::<Vec<_>>();

        assert_eq!(
            steps,
            vec![
                ("WithTaskNameByTag".to_string(), "id5:new-latest".to_string()),
                ("Latest".to_string(), "id5:latest".to_string()),
                ("Another".to_string(), "id5:another".to_string()),
                ("WithTaskName".to_string(), "id5:2.0".to_string()),
                ("NewImageName".to_string(), "id5-new:latest".to_string()),
            ]
        );
    }

    #[test]
    fn duplicate_step_identifier_fails() {
        let config = BuildConfiguration::builder()
            .name("id1")
            .tags(tags(["Latest", "latest"]))
            .build();

        assert!(matches!(
            config.tag_steps(),
            Err(ConfigError::DuplicateStepIdentifier(id)) if id == "Latest"
        ));
    }

    #[test]
    fn named_and_bare_tag_collide() {
        let config = BuildConfiguration::builder()
            .name("id1")
            .tags(vec![
                TagSpecification::named("stable", "id1:stable"),
                TagSpecification::bare("stable@1.0"),
            ])
            .build();

        assert!(matches!(
            config.tag_steps(),
            Err(ConfigError::DuplicateStepIdentifier(id)) if id == "Stable"
        ));
    }

    #[test]
    fn invalid_tag_fails_collection() {
        let config = BuildConfiguration::builder()
            .name("id1")
            .tags(tags(["latest", "host/v1"]))
            .build();

        assert!(matches!(
            config.tag_steps(),
            Err(ConfigError::InvalidTagSpecification { spec, .. }) if spec == "host/v1"
        ));
    }
}
