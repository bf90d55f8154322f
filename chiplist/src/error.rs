//! Error types for the chiplist processor catalog.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for all chiplist operations.
///
/// Each variant wraps the error enum of one concern, so callers can match
/// broadly (any store failure) or narrowly (a specific invalid position).
#[derive(Error, Debug)]
pub enum ChiplistError {
    /// Error from a store operation (capacity, position, lifecycle).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A record failed validation before it reached the store.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// Error writing, reading, or parsing the text dump.
    #[error("dump error: {0}")]
    Dump(#[from] DumpError),

    /// Error loading or validating configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by the bounded record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store has been destroyed (or was never created).
    #[error("store is not initialized")]
    Uninitialized,

    /// An insertion was attempted while the store is full.
    #[error("store is full ({capacity} records)")]
    CapacityExceeded {
        /// The fixed capacity of the store.
        capacity: usize,
    },

    /// A position argument fell outside `1..=len`.
    #[error("invalid position {position}: expected 1..={len}")]
    InvalidPosition {
        /// The rejected 1-based position.
        position: usize,
        /// The number of records at the time of the call.
        len: usize,
    },
}

/// Errors raised while validating a processor record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// The model name is empty or whitespace.
    #[error("model name must not be empty")]
    EmptyName,

    /// The model name exceeds the maximum length.
    #[error("model name '{name}' is longer than {max} characters")]
    NameTooLong {
        /// The rejected name.
        name: String,
        /// The maximum number of characters allowed.
        max: usize,
    },

    /// The model name contains a line break.
    #[error("model name must be a single line")]
    MultiLineName,

    /// A clock value is negative, infinite or NaN.
    #[error("invalid {field}: {value} (must be a finite, non-negative GHz value)")]
    InvalidClock {
        /// Which clock field was rejected.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The integrated-graphics flag was not a recognized character.
    #[error("invalid integrated graphics flag '{flag}' (use y, s or n)")]
    InvalidGraphicsFlag {
        /// The rejected input.
        flag: String,
    },
}

/// Errors raised by the flat-text dump.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Failed to create or write the dump file.
    #[error("failed to write dump '{}': {source}", path.display())]
    Write {
        /// The dump file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or read the dump file.
    #[error("failed to read dump '{}': {source}", path.display())]
    Read {
        /// The dump file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The dump text does not follow the nine-line block layout.
    #[error("malformed dump at line {line}: {reason}")]
    Malformed {
        /// 1-based line number where parsing stopped.
        line: usize,
        /// Description of what was expected.
        reason: String,
    },
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config '{}': {source}", path.display())]
    Read {
        /// The config file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the config file as JSON.
    #[error("failed to parse config '{}': {source}", path.display())]
    Parse {
        /// The config file path.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Capacity must be at least one record.
    #[error("invalid capacity: {capacity} (must be > 0)")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },
}

/// Type alias for `Result<T, ChiplistError>`.
pub type Result<T> = std::result::Result<T, ChiplistError>;
