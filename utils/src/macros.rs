/// Creates a `String` from anything that
/// can be turned into a string.
///
/// # Examples
/// ```
/// use dockwright_utils::string;
///
/// let value = string!("docker");
/// assert_eq!(value, String::from("docker"));
/// ```
#[macro_export]
macro_rules! string {
    ($str:expr) => {
        ::std::string::String::from($str)
    };
}

/// Creates a `Vec<String>` from a list of values
/// that can each be turned into a string.
///
/// # Examples
/// ```
/// use dockwright_utils::string_vec;
///
/// let tag = "latest";
/// let args = string_vec!["docker", "tag", format!("app:{tag}")];
/// assert_eq!(args, vec!["docker", "tag", "app:latest"]);
/// ```
#[macro_export]
macro_rules! string_vec {
    ($($string:expr),* $(,)?) => {
        {
            vec![
                $($crate::string!($string),)*
            ]
        }
    };
}
