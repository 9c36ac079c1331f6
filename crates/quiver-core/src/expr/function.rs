use crate::value::{Matrix, SparseVector, Vector};
use std::fmt;

///
/// FunctionExpr
///
/// Scoring functions evaluated by the engine. Each one depends on an index
/// that the compile step can check when a schema is available.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionExpr {
    Bm25Score,
    VectorDistance {
        field: String,
        query: VectorQuery,
        skip_refine: bool,
    },
    SemanticSimilarity {
        field: String,
        query: String,
    },
    MultiVectorDistance {
        field: String,
        query: Matrix,
        candidates: Option<u32>,
    },
}

impl FunctionExpr {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bm25Score => "bm25_score",
            Self::VectorDistance { .. } => "vector_distance",
            Self::SemanticSimilarity { .. } => "semantic_similarity",
            Self::MultiVectorDistance { .. } => "multi_vector_distance",
        }
    }

    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::Bm25Score => 0x01,
            Self::VectorDistance { .. } => 0x02,
            Self::SemanticSimilarity { .. } => 0x03,
            Self::MultiVectorDistance { .. } => 0x04,
        }
    }

    /// Field the function reads, if it targets one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Bm25Score => None,
            Self::VectorDistance { field, .. }
            | Self::SemanticSimilarity { field, .. }
            | Self::MultiVectorDistance { field, .. } => Some(field),
        }
    }
}

impl fmt::Display for FunctionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bm25Score => f.write_str("bm25_score()"),
            Self::VectorDistance {
                field,
                query,
                skip_refine,
            } => write!(
                f,
                "vector_distance(field={field:?}, query={query}, skip_refine={skip_refine})"
            ),
            Self::SemanticSimilarity { field, query } => {
                write!(f, "semantic_similarity(field={field:?}, query={query:?})")
            }
            Self::MultiVectorDistance {
                field,
                query,
                candidates,
            } => write!(
                f,
                "multi_vector_distance(field={field:?}, query={query}, candidates={candidates:?})"
            ),
        }
    }
}

///
/// VectorQuery
/// Query vector for `vector_distance`.
///

#[derive(Clone, Debug, PartialEq)]
pub enum VectorQuery {
    Dense(Vector),
    Sparse(SparseVector),
}

impl fmt::Display for VectorQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dense(v) => write!(f, "{v}"),
            Self::Sparse(v) => write!(f, "{v}"),
        }
    }
}

impl From<Vector> for VectorQuery {
    fn from(v: Vector) -> Self {
        Self::Dense(v)
    }
}

impl From<SparseVector> for VectorQuery {
    fn from(v: SparseVector) -> Self {
        Self::Sparse(v)
    }
}

impl From<Vec<f32>> for VectorQuery {
    fn from(v: Vec<f32>) -> Self {
        Self::Dense(Vector::F32(v))
    }
}

impl From<Vec<u8>> for VectorQuery {
    fn from(v: Vec<u8>) -> Self {
        Self::Dense(Vector::U8(v))
    }
}
