mod macros;

pub mod constants;
pub mod container;
pub mod logging;

pub use container::resolve_reference;

/// Uppercases the first character of a value and leaves
/// the rest untouched.
///
/// A character with a multi-character uppercase form
/// (like `ß`) expands to all of it.
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();

    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
