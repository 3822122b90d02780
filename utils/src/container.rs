//! Resolution of image references against a base image name.
//!
//! References follow the `[host[:port]/]repository[:tag]` convention and
//! are never parsed beyond locating their last `:` and last `/`.

use log::trace;

/// Returns the reference part of a tag specification.
///
/// A tag spec can carry a task name before the first `@`
/// (`name@reference`). When there is no `@`, or the spec
/// starts with one, the whole spec is returned.
#[must_use]
pub fn reference_part(tag_spec: &str) -> &str {
    match tag_spec.find('@') {
        Some(at) if at > 0 => &tag_spec[at + 1..],
        _ => tag_spec,
    }
}

/// Whether a reference carries a repository or registry
/// and therefore replaces the base name entirely.
#[must_use]
pub fn is_qualified(reference: &str) -> bool {
    reference.contains([':', '/'])
}

/// Removes an existing tag suffix from an image name.
///
/// Only a `:` after the last `/` starts a tag. Anything before
/// the last `/` is a `host:port` and is kept.
#[must_use]
pub fn strip_tag(name: &str) -> &str {
    match (name.rfind(':'), name.rfind('/')) {
        (Some(colon), Some(slash)) if colon > slash => &name[..colon],
        (Some(colon), None) => &name[..colon],
        _ => name,
    }
}

/// Computes the image reference a tag spec applies to `base_name`.
///
/// A fully qualified reference part (containing `:` or `/`) is
/// returned as is. A bare tag replaces the tag of `base_name`.
///
/// # Examples
/// ```
/// use dockwright_utils::container::resolve_reference;
///
/// assert_eq!(resolve_reference("host:port/v1:1", "latest"), "host:port/v1:latest");
/// assert_eq!(resolve_reference("v1", "name@v2:latest"), "v2:latest");
/// ```
#[must_use]
pub fn resolve_reference(base_name: &str, tag_spec: &str) -> String {
    trace!("resolve_reference({base_name}, {tag_spec})");

    let reference = reference_part(tag_spec);

    if is_qualified(reference) {
        reference.to_owned()
    } else {
        format!("{}:{reference}", strip_tag(base_name))
    }
}
