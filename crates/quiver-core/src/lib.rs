//! Core of the quiver query client: typed values, expression trees, the query
//! builder and its compile step, and the boundary to an external search engine.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod expr;
pub mod query;
pub mod value;

///
/// CONSTANTS
///

/// Maximum operand count of an `all`/`any` node accepted by the engine.
///
/// Construction never checks this; the compile step does when configured to.
pub const MAX_NARY_OPERANDS: usize = 32;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, engines, or clients are re-exported here.
///

pub mod prelude {
    pub use crate::{
        expr::{Expr, all, any, field, fns, literal, not, r#match},
        query::{Query, RerankSpec, count, filter, select, topk},
        value::Value,
    };
}
