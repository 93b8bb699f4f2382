//! String utilities
//!
//! Naming helpers shared by the generator paths: file stems become request
//! names, directory names become collection names, hyphenated API names
//! become readable labels.

/// Uppercase the first character, leaving the rest unchanged
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Humanize a file stem into a request name
///
/// Underscores and hyphens become spaces; each word is capitalized.
/// `create_auth_token` -> `Create Auth Token`.
pub fn humanize(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn a hyphenated API name into a spaced, capitalized label
///
/// `ai-agents` -> `Ai Agents`.
pub fn pascal_label(name: &str) -> String {
    name.split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}
