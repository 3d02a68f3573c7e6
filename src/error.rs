use thiserror::Error;

/// Tensor data handed to the sign calculator did not have the expected
/// symmetric-tensor width. This is a precondition violation: the storage
/// layer guarantees 6-component rows for `Tensor3dFull` fields, so a
/// mismatch means the archive is malformed and processing of it must stop.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("data elements must be symmetric tensors of 6 components, got {found} columns")]
pub struct ShapeError {
    pub found: usize,
}

#[derive(Debug, Error)]
pub enum SignedMisesError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("field output '{0}' not found in frame")]
    MissingField(String),

    #[error("field output '{0}' already exists in frame")]
    DuplicateField(String),

    #[error("field output '{name}' is {found:?}, cannot derive a {invariant} scalar field")]
    InvariantSource {
        name: String,
        found: crate::odb::FieldType,
        invariant: &'static str,
    },

    #[error("unsupported archive extension for '{0}' (expected .json, .bin, .xz or .zst)")]
    UnsupportedExtension(String),

    #[error("failed to read archive '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write archive '{path}': {source}")]
    Save {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary codec error: {0}")]
    Bincode(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, SignedMisesError>;
