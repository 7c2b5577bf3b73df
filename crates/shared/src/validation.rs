//! Common validation utilities.

use validator::ValidationErrors;

/// Flattens field errors into their human-readable messages.
///
/// Messages are sorted and deduplicated so that responses stay stable
/// regardless of the iteration order of the underlying map. Errors declared
/// without a message fall back to `"<field> is invalid"`.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();

    messages.sort();
    messages.dedup();
    messages
}

/// Joins all field error messages into a single line.
pub fn join_error_messages(errors: &ValidationErrors) -> String {
    error_messages(errors).join(", ")
}
