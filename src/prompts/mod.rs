//! Prompt templates, one builder per feature.

pub mod analysis;
pub mod chat;
pub mod content;
pub mod planning;
pub mod styles;

/// Longest user-supplied field interpolated into a prompt, in characters.
pub const MAX_FIELD_CHARS: usize = 500;

/// Trims a user field, drops control characters and caps its length.
pub fn clip(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .take(MAX_FIELD_CHARS)
        .collect()
}

pub fn clamp_count(requested: Option<u32>, default: u32, max: u32) -> u32 {
    requested.unwrap_or(default).clamp(1, max)
}
