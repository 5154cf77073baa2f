use thiserror::Error;

/// Errors raised by the picker core.
///
/// The DOM shell reports these to the console; the core never panics on bad
/// input from the host page.
#[derive(Debug, Error)]
pub enum PickerError {
    /// Month outside 0..=11 (cursor form) or 1..=12 (external form)
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The per-field override map could not be decoded
    #[error("Failed to parse configuration override: {0}")]
    ConfigOverride(#[from] serde_json::Error),

    #[error("Could not parse date from '{0}'")]
    UnparseableDate(String),

    /// The host input (or another required element) is not in the document
    #[error("Anchor element not found: {0}")]
    MissingAnchor(String),
}

pub type Result<T> = std::result::Result<T, PickerError>;
