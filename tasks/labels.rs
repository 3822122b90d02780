use dockwright_recipe::{ConfigError, Result};
use lazy_regex::regex_is_match;
use log::trace;

/// Checks that a label key only uses lowercase alphanumerics, `.` and `-`.
///
/// The key has to match `^[a-z0-9.-]*$` as a whole.
///
/// # Errors
/// Returns [`ConfigError::IllegalLabelKey`] naming the key.
pub fn validate_label_key(key: &str) -> Result<()> {
    trace!("validate_label_key({key})");

    if regex_is_match!(r"^[a-z0-9.-]*$", key) {
        Ok(())
    } else {
        Err(ConfigError::IllegalLabelKey {
            key: key.to_owned(),
        })
    }
}
