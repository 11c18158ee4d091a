use crate::types::DbId;
use crate::validation::FieldViolation;

/// The pipeline stage an error originated from.
///
/// The HTTP boundary derives the status code from this tag; variant
/// fields only shape the response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validation,
    AssetWrite,
    AssetRead,
    Persistence,
    NotFound,
    InvalidRequest,
}

impl Stage {
    /// Stable machine-readable code for response bodies.
    pub fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::AssetWrite => "ASSET_WRITE_ERROR",
            Self::AssetRead => "ASSET_READ_ERROR",
            Self::Persistence => "PERSISTENCE_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidRequest => "INVALID_REQUEST",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Failed to write asset {name}: {source}")]
    AssetWrite {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read asset {name}: {source}")]
    AssetRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Persistence error: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CoreError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Validation(_) => Stage::Validation,
            Self::AssetWrite { .. } => Stage::AssetWrite,
            Self::AssetRead { .. } => Stage::AssetRead,
            Self::Persistence(_) => Stage::Persistence,
            Self::NotFound { .. } => Stage::NotFound,
            Self::InvalidRequest(_) => Stage::InvalidRequest,
        }
    }

    /// Wrap a driver error as a persistence failure.
    pub fn persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Persistence(Box::new(err))
    }

    /// A by-id lookup that matched no row.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
