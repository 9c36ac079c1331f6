//! Query builder and compile step.
//!
//! Module: query
//! Responsibility: the linear stage list a caller builds, and the compile
//! step that turns it into a validated [`QueryPlan`].
//! Does not own: expression construction, engine transport, or execution.
//! Boundary: stage order and collector rules are checked at compile time,
//! never while the stage list is being built.

mod fingerprint;
mod infer;
mod plan;
mod policy;

pub mod schema;


pub use fingerprint::PlanFingerprint;
pub use plan::{Collector, QueryPlan};
pub use policy::PlanError;
pub use schema::{DataType, FieldIndex, FieldSpec, ListType, Schema, VectorMetric};

pub(crate) use plan::check_delete_filter;

use crate::{
    config::QueryConfig,
    expr::{Expr, field},
};
use std::fmt;

///
/// Query
///
/// Ordered list of stages. Every builder method consumes the query and
/// returns the extended one; a query value never changes after it is built.
///

#[derive(Clone, Debug, Default)]
pub struct Query {
    stages: Vec<Stage>,
}

impl Query {
    #[must_use]
    pub const fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Add output columns. Repeated calls accumulate; a later column with
    /// the same name replaces the earlier one.
    #[must_use]
    pub fn select<P: Into<Projection>>(mut self, items: impl IntoIterator<Item = P>) -> Self {
        self.stages
            .push(Stage::Select(items.into_iter().map(Into::into).collect()));
        self
    }

    /// Add a row predicate. Repeated calls are AND-combined in call order.
    #[must_use]
    pub fn filter(mut self, predicate: impl Into<Expr>) -> Self {
        self.stages.push(Stage::Filter(predicate.into()));
        self
    }

    #[must_use]
    pub fn topk(mut self, by: impl Into<Expr>, k: u64, asc: bool) -> Self {
        self.stages.push(Stage::TopK {
            expr: by.into(),
            k,
            asc,
        });
        self
    }

    /// Order rows by `by`. Must be followed by [`Query::limit`].
    #[must_use]
    pub fn sort(mut self, by: impl Into<Expr>, asc: bool) -> Self {
        self.stages.push(Stage::Sort {
            expr: by.into(),
            asc,
        });
        self
    }

    #[must_use]
    pub fn limit(mut self, k: u64) -> Self {
        self.stages.push(Stage::Limit { k });
        self
    }

    /// Collapse matching rows into a single `_count` row.
    #[must_use]
    pub fn count(mut self) -> Self {
        self.stages.push(Stage::Count);
        self
    }

    #[must_use]
    pub fn rerank(mut self, spec: RerankSpec) -> Self {
        self.stages.push(Stage::Rerank(spec));
        self
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Validate the stage list and produce a plan ready for submission.
    pub fn compile(
        &self,
        config: &QueryConfig,
        schema: Option<&Schema>,
    ) -> Result<QueryPlan, PlanError> {
        plan::compile(&self.stages, config, schema)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Query[")?;
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{stage}")?;
        }
        f.write_str("]")
    }
}

///
/// Stage
///

#[derive(Clone, Debug)]
pub enum Stage {
    Select(Vec<Projection>),
    Filter(Expr),
    TopK { expr: Expr, k: u64, asc: bool },
    Sort { expr: Expr, asc: bool },
    Limit { k: u64 },
    Count,
    Rerank(RerankSpec),
}

impl Stage {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Select(_) => "select",
            Self::Filter(_) => "filter",
            Self::TopK { .. } => "topk",
            Self::Sort { .. } => "sort",
            Self::Limit { .. } => "limit",
            Self::Count => "count",
            Self::Rerank(_) => "rerank",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(items) => {
                f.write_str("Select(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", item.name, item.expr)?;
                }
                f.write_str(")")
            }
            Self::Filter(expr) => write!(f, "Filter({expr})"),
            Self::TopK { expr, k, asc } => write!(f, "TopK(expr={expr}, k={k}, asc={asc})"),
            Self::Sort { expr, asc } => write!(f, "Sort(expr={expr}, asc={asc})"),
            Self::Limit { k } => write!(f, "Limit(k={k})"),
            Self::Count => f.write_str("Count()"),
            Self::Rerank(spec) => write!(f, "Rerank({spec:?})"),
        }
    }
}

///
/// Projection
/// One named output column.
///

#[derive(Clone, Debug)]
pub struct Projection {
    pub name: String,
    pub expr: Expr,
}

impl From<&str> for Projection {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_string(),
            expr: field(name),
        }
    }
}

impl From<String> for Projection {
    fn from(name: String) -> Self {
        let expr = field(name.as_str());
        Self { name, expr }
    }
}

impl<S: Into<String>, E: Into<Expr>> From<(S, E)> for Projection {
    fn from((name, expr): (S, E)) -> Self {
        Self {
            name: name.into(),
            expr: expr.into(),
        }
    }
}

///
/// RerankSpec
///
/// Second-pass reranking of topk candidates. Without an explicit query and
/// field list the query text is taken from the single `semantic_similarity`
/// column in the select list.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RerankSpec {
    pub model: Option<String>,
    pub query: Option<String>,
    pub fields: Vec<String>,
    pub topk_multiple: Option<u32>,
}

impl RerankSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn topk_multiple(mut self, multiple: u32) -> Self {
        self.topk_multiple = Some(multiple);
        self
    }

    pub(crate) const fn is_explicit(&self) -> bool {
        self.query.is_some() && !self.fields.is_empty()
    }
}

// ----------------------------------------------------------------------
// Query entry points
// ----------------------------------------------------------------------

#[must_use]
pub fn select<P: Into<Projection>>(items: impl IntoIterator<Item = P>) -> Query {
    Query::new().select(items)
}

#[must_use]
pub fn filter(predicate: impl Into<Expr>) -> Query {
    Query::new().filter(predicate)
}

#[must_use]
pub fn topk(by: impl Into<Expr>, k: u64, asc: bool) -> Query {
    Query::new().topk(by, k, asc)
}

#[must_use]
pub fn count() -> Query {
    Query::new().count()
}
