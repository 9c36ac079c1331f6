//! Scoring function constructors.

use crate::{
    expr::{Expr, FunctionExpr, VectorQuery},
    value::Matrix,
};

/// BM25 keyword relevance of the current document.
#[must_use]
pub const fn bm25_score() -> Expr {
    Expr::Function(FunctionExpr::Bm25Score)
}

/// Distance between `field` and a dense or sparse query vector.
#[must_use]
pub fn vector_distance(field: impl Into<String>, query: impl Into<VectorQuery>) -> Expr {
    vector_distance_with(field, query, false)
}

/// `vector_distance` with explicit control over the refine pass.
#[must_use]
pub fn vector_distance_with(
    field: impl Into<String>,
    query: impl Into<VectorQuery>,
    skip_refine: bool,
) -> Expr {
    Expr::Function(FunctionExpr::VectorDistance {
        field: field.into(),
        query: query.into(),
        skip_refine,
    })
}

/// Similarity between `field` and `query` under the field's semantic index.
#[must_use]
pub fn semantic_similarity(field: impl Into<String>, query: impl Into<String>) -> Expr {
    Expr::Function(FunctionExpr::SemanticSimilarity {
        field: field.into(),
        query: query.into(),
    })
}

/// Token-level distance between a multi-vector `field` and a query matrix.
#[must_use]
pub fn multi_vector_distance(
    field: impl Into<String>,
    query: Matrix,
    candidates: Option<u32>,
) -> Expr {
    Expr::Function(FunctionExpr::MultiVectorDistance {
        field: field.into(),
        query,
        candidates,
    })
}
