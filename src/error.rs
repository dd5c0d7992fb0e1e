//! Error types
//!
//! Only construction of geometry and loading of configuration can fail.
//! A missing collider is not an error: queries return `None` for it.

/// Errors produced by this crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A point, vector or ray was built from non-finite or degenerate components
    #[error("invalid geometry: {what} ({x}, {y})")]
    InvalidGeometry { what: &'static str, x: f64, y: f64 },
    /// Settings or bounding box specs could not be parsed
    #[error("malformed configuration")]
    Config(#[from] serde_json::Error),
    /// A setting parsed but is out of its allowed range
    #[error("invalid setting {field}: {value}")]
    InvalidSetting { field: &'static str, value: f64 },
    /// Settings file could not be read
    #[error("failed to read configuration file")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
