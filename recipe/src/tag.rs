use std::borrow::Cow;

use dockwright_utils::{capitalize, container};
use log::trace;
use serde::Serialize;

use crate::error::{ConfigError, InvalidTagReason, Result};

/// Derives the step identifier for a tag specification.
///
/// The task name is the part before the first `@`, or the
/// whole spec when there is none. Its first character is
/// uppercased.
///
/// # Errors
/// Will error when the task name part is empty, or when a spec
/// without `@` carries a repository or registry (`:` or `/`).
pub fn derive_task_name(tag_spec: &str) -> Result<String> {
    trace!("derive_task_name({tag_spec})");

    let invalid = |reason| ConfigError::InvalidTagSpecification {
        spec: tag_spec.to_owned(),
        reason,
    };

    let task_name = match tag_spec.find('@') {
        Some(0) => return Err(invalid(InvalidTagReason::EmptyTaskName)),
        Some(at) => &tag_spec[..at],
        None if container::is_qualified(tag_spec) => {
            return Err(invalid(InvalidTagReason::MissingTaskName))
        }
        None if tag_spec.is_empty() => return Err(invalid(InvalidTagReason::EmptyTaskName)),
        None => tag_spec,
    };

    Ok(capitalize(task_name))
}

/// A single tag the user asked to apply to the built image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum TagSpecification {
    /// A tag string of the form `[taskName@]reference`.
    ///
    /// A bare tag (`latest`) replaces the tag of the image name,
    /// a qualified reference (`host/app:1`) replaces the whole name.
    Bare(String),

    /// A tag declared with an explicit task name.
    ///
    /// The reference is applied exactly as written.
    Named { task_name: String, reference: String },
}

impl TagSpecification {
    #[must_use]
    pub fn bare<S: Into<String>>(spec: S) -> Self {
        Self::Bare(spec.into())
    }

    #[must_use]
    pub fn named<N, R>(task_name: N, reference: R) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        Self::Named {
            task_name: task_name.into(),
            reference: reference.into(),
        }
    }

    /// The identifier used to name the tag and push steps.
    ///
    /// # Errors
    /// Will error if the task name can't be derived.
    /// See [`derive_task_name`].
    pub fn step_identifier(&self) -> Result<String> {
        match self {
            Self::Bare(spec) => derive_task_name(spec),
            Self::Named { task_name, .. } => derive_task_name(task_name),
        }
    }

    /// The image reference this tag points at for the given base name.
    #[must_use]
    pub fn resolve(&self, base_name: &str) -> String {
        match self {
            Self::Bare(spec) => container::resolve_reference(base_name, spec),
            Self::Named { reference, .. } => reference.clone(),
        }
    }

    /// The tag as the user declared it, used in step descriptions.
    #[must_use]
    pub fn declared(&self) -> Cow<'_, str> {
        match self {
            Self::Bare(spec) => Cow::Borrowed(spec),
            Self::Named { reference, .. } => Cow::Borrowed(reference),
        }
    }
}

/// A resolved tag: the step it belongs to and the
/// concrete reference it applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagStep {
    pub identifier: String,
    pub reference: String,
    pub spec: TagSpecification,
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::bare("latest", "Latest")]
    #[case::another("another", "Another")]
    #[case::with_task_name("withTaskName@2.0", "WithTaskName")]
    #[case::with_image_name("newImageName@id5-new:latest", "NewImageName")]
    #[case::with_registry("push@host:port/v2:2", "Push")]
    #[case::already_capitalized("Latest", "Latest")]
    #[case::version_tag("2.0", "2.0")]
    #[case::trailing_at("name@", "Name")]
    fn derives_task_name(#[case] spec: &str, #[case] expected: &str) {
        assert_eq!(derive_task_name(spec).unwrap(), expected);
    }

    #[rstest]
    #[case::leading_at("@x", InvalidTagReason::EmptyTaskName)]
    #[case::only_at("@", InvalidTagReason::EmptyTaskName)]
    #[case::empty("", InvalidTagReason::EmptyTaskName)]
    #[case::registry("host/v1", InvalidTagReason::MissingTaskName)]
    #[case::tag("v1:latest", InvalidTagReason::MissingTaskName)]
    #[case::registry_port("host:5000/v1:1", InvalidTagReason::MissingTaskName)]
    fn rejects_tag_spec(#[case] spec: &str, #[case] expected: InvalidTagReason) {
        let err = derive_task_name(spec).unwrap_err();

        assert!(
            matches!(
                &err,
                ConfigError::InvalidTagSpecification { spec: s, reason } if s == spec && *reason == expected
            ),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn derivation_is_stable() {
        assert_eq!(
            derive_task_name("withTaskName@2.0").unwrap(),
            derive_task_name("withTaskName@2.0").unwrap()
        );
    }

    #[rstest]
    #[case::bare_tag(TagSpecification::bare("latest"), "id5", "Latest", "id5:latest")]
    #[case::bare_with_name(
        TagSpecification::bare("newImageName@id5-new:latest"),
        "id5",
        "NewImageName",
        "id5-new:latest"
    )]
    #[case::named(
        TagSpecification::named("withTaskNameByTag", "id5:new-latest"),
        "id5",
        "WithTaskNameByTag",
        "id5:new-latest"
    )]
    #[case::named_bare_reference(
        TagSpecification::named("stable", "stable"),
        "host:port/id5:1",
        "Stable",
        "stable"
    )]
    fn resolves_tag_spec(
        #[case] spec: TagSpecification,
        #[case] base: &str,
        #[case] identifier: &str,
        #[case] reference: &str,
    ) {
        assert_eq!(spec.step_identifier().unwrap(), identifier);
        assert_eq!(spec.resolve(base), reference);
    }

    #[test]
    fn named_tag_with_qualified_task_name_is_rejected() {
        let spec = TagSpecification::named("host/app", "host/app:1");

        assert!(matches!(
            spec.step_identifier(),
            Err(ConfigError::InvalidTagSpecification {
                reason: InvalidTagReason::MissingTaskName,
                ..
            })
        ));
    }
}
