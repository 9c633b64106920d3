/// Convenience result type used across canvasfit.
pub type CanvasfitResult<T> = Result<T, CanvasfitError>;

/// Top-level error taxonomy used by the layout and configuration APIs.
///
/// Structural problems in visualization data are never reported through this
/// type; they are collected into a [`crate::ValidationReport`] instead.
#[derive(thiserror::Error, Debug)]
pub enum CanvasfitError {
    /// Invalid caller-provided input (empty layouts, bad counts).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid geometric input (negative or non-finite radii, distances, areas).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Inconsistent canvas or mode configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasfitError {
    /// Build a [`CanvasfitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CanvasfitError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`CanvasfitError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CanvasfitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CanvasfitError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
