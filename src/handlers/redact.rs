use serde_json::Value;

/// Longest argument rendering written to the log, in characters.
pub const MAX_LOGGED_ARGUMENT_CHARS: usize = 500;

/// Suffix appended to a rendering that was cut short.
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Render tool arguments for the log.
///
/// Absent or `null` arguments are logged as `{}`, the mapping the tool
/// actually receives. Arguments may carry pasted source code or secrets, so
/// the serialized form is capped at [`MAX_LOGGED_ARGUMENT_CHARS`] characters.
pub fn loggable_arguments(arguments: Option<&Value>) -> String {
    let serialized = match arguments {
        None | Some(Value::Null) => "{}".to_string(),
        Some(value) => value.to_string(),
    };
    truncate_for_log(&serialized)
}

/// Keep the first [`MAX_LOGGED_ARGUMENT_CHARS`] characters of `text`,
/// appending [`TRUNCATION_MARKER`] only when something was dropped.
pub fn truncate_for_log(text: &str) -> String {
    match text.char_indices().nth(MAX_LOGGED_ARGUMENT_CHARS) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &text[..cut]),
        None => text.to_string(),
    }
}
