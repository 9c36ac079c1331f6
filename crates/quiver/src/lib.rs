//! ## Crate layout
//! - `query`: expression builders, query stages, schema and compiled plans.
//! - `data`: typed literal constructors (vectors, sparse vectors, matrices, lists).
//! - `fns`: scoring functions usable in `select`, `filter` and `topk`.
//! - `db`: the engine boundary and the collection client.
//! - `error`: the error surface and its stable classification.
//!
//! The `prelude` module carries the vocabulary most query code needs.

pub use quiver_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use quiver_core::MAX_NARY_OPERANDS;

///
/// query
/// Expression and query builders.
///

pub mod query {
    pub use quiver_core::{
        expr::{
            BinaryOp, Boolish, Expr, Flexible, Iterable, LOGICAL_KEYWORDS_UNSUPPORTED, NaryOp,
            Numeric, Operand, OperandCategory, Ordered, Stringy, StringyList, TernaryOp,
            TextMatch, UnaryOp, all, any, field, literal, not, r#match,
        },
        query::{
            Collector, PlanFingerprint, Projection, Query, QueryPlan, RerankSpec, Stage, count,
            filter, schema, select, topk,
        },
    };
}

///
/// data
/// Literal value constructors.
///

pub mod data {
    pub use quiver_core::value::{
        List, Matrix, MatrixValueType, MatrixValues, Number, SparseValues, SparseVector, Value,
        ValueType, Vector, binary_vector, bytes, f32_list, f32_sparse_vector, f32_vector,
        f64_list, i8_list, i8_vector, i32_list, i64_list, matrix, string_list, u8_list,
        u8_sparse_vector, u8_vector, u32_list, u64_list,
    };
}

///
/// fns
/// Scoring functions.
///

pub mod fns {
    pub use quiver_core::expr::{
        FunctionExpr, VectorQuery,
        fns::{
            bm25_score, multi_vector_distance, semantic_similarity, vector_distance,
            vector_distance_with,
        },
    };
}

///
/// db
/// Engine boundary and collection client.
///

pub mod db {
    pub use quiver_core::{
        config::{ArityEnforcement, CompileConfig, QueryConfig, ReadConfig},
        db::{
            AsyncEngine, COUNT_FIELD, Client, Collection, CollectionClient, CollectionsClient,
            ConsistencyLevel, DeleteSelector, Document, Engine, EngineError, ID_FIELD, Lsn,
            LsnParseError, QueryTraceEvent, QueryTraceSink, ReadOptions, Rows, document,
        },
    };
}

///
/// error
///

pub mod error {
    pub use quiver_core::{
        config::ConfigError,
        db::EngineError,
        error::{ConstructionError, ErrorKind, QueryError},
        query::PlanError,
    };
}

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        data::{Value, f32_vector, matrix},
        db::{AsyncEngine as _, Engine as _},
        fns::{bm25_score, semantic_similarity, vector_distance},
        query::{
            Expr, Query, RerankSpec, all, any, count, field, filter, literal, not, r#match, select,
            topk,
        },
    };
}
