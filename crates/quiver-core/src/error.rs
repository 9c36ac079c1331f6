//! Error surface shared by value construction, expression building, plan
//! compilation and engine submission.
//!
//! Construction-time failures are raised immediately by the builder that
//! detected them. Plan failures are raised by the compile step. Engine failures
//! pass through with their text preserved.

use crate::{config::ConfigError, db::EngineError, query::PlanError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// ConstructionError
///
/// Local, deterministic failures raised while building literal values or
/// expression trees. Never deferred to submission.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConstructionError {
    #[error("invalid argument `{argument}`: expected {expected}, got {found}")]
    TypeCoercion {
        argument: String,
        expected: &'static str,
        found: String,
    },

    #[error("{0}")]
    Shape(String),

    #[error("invalid argument `{argument}`: value {value} is out of range for {target}")]
    Range {
        argument: String,
        value: String,
        target: &'static str,
    },

    #[error("{0}")]
    Unsupported(String),
}

impl ConstructionError {
    pub(crate) fn type_coercion(
        argument: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeCoercion {
            argument: argument.into(),
            expected,
            found: found.into(),
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    pub(crate) fn range(
        argument: impl Into<String>,
        value: impl fmt::Display,
        target: &'static str,
    ) -> Self {
        Self::Range {
            argument: argument.into(),
            value: value.to_string(),
            target,
        }
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeCoercion { .. } => ErrorKind::TypeCoercion,
            Self::Shape(_) => ErrorKind::Shape,
            Self::Range { .. } => ErrorKind::Range,
            Self::Unsupported(_) => ErrorKind::UnsupportedOperation,
        }
    }
}

///
/// QueryError
///
/// Top-level error returned by every fallible public entry point.
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("{0}")]
    Construction(#[from] ConstructionError),

    #[error("{0}")]
    Plan(#[from] PlanError),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl QueryError {
    /// Stable classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Construction(err) => err.kind(),
            Self::Plan(err) => err.kind(),
            Self::Engine(err) => err.kind(),
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// True when the failure was detected locally, before reaching the engine.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        !matches!(self, Self::Engine(_))
    }
}

///
/// ErrorKind
/// Stable error taxonomy; callers match on this instead of message text.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    TypeCoercion,
    Arity,
    Shape,
    Range,
    UnsupportedOperation,
    CollectorConflict,
    NonPrimitiveSortKey,
    InvalidArgument,
    CollectionNotFound,
    CollectionAlreadyExists,
    DocumentValidation,
    SchemaValidation,
    PermissionDenied,
    CapacityExceeded,
    LsnTimeout,
    Config,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TypeCoercion => "type_coercion",
            Self::Arity => "arity",
            Self::Shape => "shape",
            Self::Range => "range",
            Self::UnsupportedOperation => "unsupported_operation",
            Self::CollectorConflict => "collector_conflict",
            Self::NonPrimitiveSortKey => "non_primitive_sort_key",
            Self::InvalidArgument => "invalid_argument",
            Self::CollectionNotFound => "collection_not_found",
            Self::CollectionAlreadyExists => "collection_already_exists",
            Self::DocumentValidation => "document_validation",
            Self::SchemaValidation => "schema_validation",
            Self::PermissionDenied => "permission_denied",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::LsnTimeout => "lsn_timeout",
            Self::Config => "config",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}
