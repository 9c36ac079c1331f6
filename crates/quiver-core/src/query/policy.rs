//! Plan-shape policy failures raised by the compile step.

use crate::{error::ErrorKind, value::ValueType};
use thiserror::Error as ThisError;

///
/// PlanError
///
/// Submission-time validation failures. Message text mirrors what the engine
/// reports for the same condition so callers can match either source with
/// the same substring.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PlanError {
    #[error(
        "Invalid argument: N-ary expression has too many operands ({count} > {max})"
    )]
    TooManyOperands { count: usize, max: usize },

    #[error("Invalid argument: query has no collector; add topk, sort with limit, limit or count")]
    NoCollector,

    #[error("Invalid argument: multiple collectors: {first} conflicts with {second}")]
    MultipleCollectors {
        first: &'static str,
        second: &'static str,
    },

    #[error("Invalid argument: multiple sort stages")]
    MultipleSorts,

    #[error("Invalid argument: sort must be followed by limit")]
    SortWithoutLimit,

    #[error("Invalid argument: TopK k must be > 0")]
    TopKZero,

    #[error("Invalid argument: limit must be > 0")]
    LimitZero,

    #[error("Invalid argument: {stage} k {k} exceeds the configured maximum {max}")]
    KExceedsMax {
        stage: &'static str,
        k: u64,
        max: u64,
    },

    #[error("Invalid argument: Input to {stage} must produce primitive type, not {found}")]
    NonPrimitiveSortKey {
        stage: &'static str,
        found: ValueType,
    },

    #[error("Invalid argument: {stage} must come before the collector")]
    StageAfterCollector { stage: &'static str },

    #[error("Invalid argument: rerank must follow topk")]
    RerankWithoutTopK,

    #[error("Invalid argument: rerank may only be applied once")]
    DuplicateRerank,

    #[error(
        "Invalid argument: rerank is ambiguous: {candidates} semantic_similarity columns in select; pass query and fields explicitly"
    )]
    AmbiguousRerank { candidates: usize },

    #[error("Invalid argument: {function} requires a {expected} index on field `{field}`")]
    MissingIndex {
        function: &'static str,
        field: String,
        expected: &'static str,
    },

    #[error("Invalid argument: {function} requires at least one keyword index")]
    NoKeywordIndex { function: &'static str },

    #[error("Invalid argument: delete filter cannot use {function}")]
    ScoringInDeleteFilter { function: &'static str },
}

impl PlanError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TooManyOperands { .. } => ErrorKind::Arity,
            Self::NoCollector
            | Self::MultipleCollectors { .. }
            | Self::MultipleSorts
            | Self::SortWithoutLimit
            | Self::StageAfterCollector { .. }
            | Self::RerankWithoutTopK
            | Self::DuplicateRerank => ErrorKind::CollectorConflict,
            Self::NonPrimitiveSortKey { .. } => ErrorKind::NonPrimitiveSortKey,
            Self::TopKZero
            | Self::LimitZero
            | Self::KExceedsMax { .. }
            | Self::AmbiguousRerank { .. }
            | Self::MissingIndex { .. }
            | Self::NoKeywordIndex { .. }
            | Self::ScoringInDeleteFilter { .. } => ErrorKind::InvalidArgument,
        }
    }
}
