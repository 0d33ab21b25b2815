use regex::Regex;
use std::sync::OnceLock;

fn dir_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{2}-.+$").expect("static pattern is valid"))
}

/// Whether a directory name follows the `NN-name` convention
/// (two digits, a dash, at least one more character).
pub fn is_valid_stack_dir_name(dir_name: &str) -> bool {
    dir_name_pattern().is_match(dir_name)
}

/// Extract the logical stack name: everything after the first dash.
///
/// Returns `None` when there is no dash or nothing follows it.
///
/// ```
/// use composectl::domain::value_objects::stack_dir_name::extract_stack_name;
///
/// assert_eq!(extract_stack_name("01-web"), Some("web"));
/// assert_eq!(extract_stack_name("10-my-app"), Some("my-app"));
/// assert_eq!(extract_stack_name("01-"), None);
/// assert_eq!(extract_stack_name("web"), None);
/// ```
pub fn extract_stack_name(dir_name: &str) -> Option<&str> {
    match dir_name.split_once('-') {
        Some((_, rest)) if !rest.is_empty() => Some(rest),
        _ => None,
    }
}
