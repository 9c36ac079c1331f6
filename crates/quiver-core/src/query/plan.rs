//! Compile step: stage list to validated plan.

use crate::{
    config::{ArityEnforcement, QueryConfig},
    expr::{BinaryOp, Expr, FunctionExpr},
    query::{PlanError, RerankSpec, Schema, Stage, infer::TypeEnv, schema::FieldIndex},
};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

///
/// QueryPlan
///
/// Validated, submission-ready form of a query. The select map is keyed by
/// output column name, so its iteration order is stable.
///

#[derive(Clone, Debug)]
pub struct QueryPlan {
    pub select: BTreeMap<String, Expr>,
    pub filter: Option<Expr>,
    pub collector: Collector,
    pub rerank: Option<RerankSpec>,
}

impl QueryPlan {
    #[must_use]
    pub const fn is_count(&self) -> bool {
        matches!(self.collector, Collector::Count)
    }

    /// Every expression in the plan, in select, filter, collector order.
    pub fn exprs(&self) -> impl Iterator<Item = &Expr> {
        self.select
            .values()
            .chain(self.filter.as_ref())
            .chain(self.collector.sort_key())
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryPlan(collector={}", self.collector)?;
        if let Some(filter) = &self.filter {
            write!(f, ", filter={filter}")?;
        }
        for (name, expr) in &self.select {
            write!(f, ", {name}={expr}")?;
        }
        if self.rerank.is_some() {
            f.write_str(", rerank")?;
        }
        f.write_str(")")
    }
}

///
/// Collector
/// The single stage that decides which rows come back and how many.
///

#[derive(Clone, Debug)]
pub enum Collector {
    TopK { expr: Expr, k: u64, asc: bool },
    SortLimit { expr: Expr, asc: bool, k: u64 },
    Limit { k: u64 },
    Count,
}

impl Collector {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TopK { .. } => "topk",
            Self::SortLimit { .. } => "sort",
            Self::Limit { .. } => "limit",
            Self::Count => "count",
        }
    }

    /// Engine operator name used in key-type errors. The engine executes
    /// topk and sort+limit with the same operator.
    const fn operator(&self) -> &'static str {
        match self {
            Self::TopK { .. } | Self::SortLimit { .. } => "SortWithLimit",
            Self::Limit { .. } => "Limit",
            Self::Count => "Count",
        }
    }

    #[must_use]
    pub const fn sort_key(&self) -> Option<&Expr> {
        match self {
            Self::TopK { expr, .. } | Self::SortLimit { expr, .. } => Some(expr),
            Self::Limit { .. } | Self::Count => None,
        }
    }

    #[must_use]
    pub const fn k(&self) -> Option<u64> {
        match self {
            Self::TopK { k, .. } | Self::SortLimit { k, .. } | Self::Limit { k } => Some(*k),
            Self::Count => None,
        }
    }
}

impl fmt::Display for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopK { expr, k, asc } => write!(f, "TopK(expr={expr}, k={k}, asc={asc})"),
            Self::SortLimit { expr, asc, k } => {
                write!(f, "SortWithLimit(expr={expr}, asc={asc}, k={k})")
            }
            Self::Limit { k } => write!(f, "Limit(k={k})"),
            Self::Count => f.write_str("Count()"),
        }
    }
}

// ----------------------------------------------------------------------
// Compile
// ----------------------------------------------------------------------

///
/// PlanBuilder
/// Accumulates stages in order while enforcing collector placement.
///

#[derive(Default)]
struct PlanBuilder {
    select: BTreeMap<String, Expr>,
    filter: Option<Expr>,
    collector: Option<Collector>,
    pending_sort: Option<(Expr, bool)>,
    rerank: Option<RerankSpec>,
}

impl PlanBuilder {
    // Name of whatever already holds the collector slot.
    fn occupant(&self) -> Option<&'static str> {
        self.collector
            .as_ref()
            .map(Collector::label)
            .or_else(|| self.pending_sort.as_ref().map(|_| "sort"))
    }

    fn ensure_before_collector(&self, stage: &'static str) -> Result<(), PlanError> {
        if self.occupant().is_some() || self.rerank.is_some() {
            return Err(PlanError::StageAfterCollector { stage });
        }

        Ok(())
    }

    fn ensure_free(&self, second: &'static str) -> Result<(), PlanError> {
        match self.occupant() {
            Some(first) => Err(PlanError::MultipleCollectors { first, second }),
            None => Ok(()),
        }
    }

    fn push(&mut self, stage: &Stage, config: &QueryConfig) -> Result<(), PlanError> {
        match stage {
            Stage::Select(items) => {
                self.ensure_before_collector("select")?;
                for item in items {
                    self.select.insert(item.name.clone(), item.expr.clone());
                }
            }
            Stage::Filter(predicate) => {
                self.ensure_before_collector("filter")?;
                self.filter = Some(match self.filter.take() {
                    Some(existing) => existing.and(predicate.clone()),
                    None => predicate.clone(),
                });
            }
            Stage::TopK { expr, k, asc } => {
                self.ensure_free("topk")?;
                if *k == 0 {
                    return Err(PlanError::TopKZero);
                }
                check_max_k(config, "topk", *k)?;
                self.collector = Some(Collector::TopK {
                    expr: expr.clone(),
                    k: *k,
                    asc: *asc,
                });
            }
            Stage::Sort { expr, asc } => {
                if self.pending_sort.is_some()
                    || matches!(self.collector, Some(Collector::SortLimit { .. }))
                {
                    return Err(PlanError::MultipleSorts);
                }
                self.ensure_free("sort")?;
                self.pending_sort = Some((expr.clone(), *asc));
            }
            Stage::Limit { k } => {
                if let Some(first) = self.collector.as_ref().map(Collector::label) {
                    return Err(PlanError::MultipleCollectors {
                        first,
                        second: "limit",
                    });
                }
                if *k == 0 {
                    return Err(PlanError::LimitZero);
                }
                check_max_k(config, "limit", *k)?;
                self.collector = Some(match self.pending_sort.take() {
                    Some((expr, asc)) => Collector::SortLimit { expr, asc, k: *k },
                    None => Collector::Limit { k: *k },
                });
            }
            Stage::Count => {
                self.ensure_free("count")?;
                self.collector = Some(Collector::Count);
            }
            Stage::Rerank(spec) => {
                if self.rerank.is_some() {
                    return Err(PlanError::DuplicateRerank);
                }
                if !matches!(self.collector, Some(Collector::TopK { .. })) {
                    return Err(PlanError::RerankWithoutTopK);
                }
                self.rerank = Some(spec.clone());
            }
        }

        Ok(())
    }

    fn finish(self) -> Result<QueryPlan, PlanError> {
        if self.pending_sort.is_some() {
            return Err(PlanError::SortWithoutLimit);
        }
        let collector = self.collector.ok_or(PlanError::NoCollector)?;

        Ok(QueryPlan {
            select: self.select,
            filter: self.filter,
            collector,
            rerank: self.rerank,
        })
    }
}

pub(super) fn compile(
    stages: &[Stage],
    config: &QueryConfig,
    schema: Option<&Schema>,
) -> Result<QueryPlan, PlanError> {
    let mut builder = PlanBuilder::default();
    for stage in stages {
        builder.push(stage, config)?;
    }
    let plan = builder.finish()?;

    if config.compile.arity_enforcement == ArityEnforcement::Compile {
        for expr in plan.exprs() {
            check_arity(expr, config.compile.max_nary_operands)?;
        }
    }

    check_sort_key(&plan, schema)?;

    if let Some(spec) = &plan.rerank {
        check_rerank(&plan, spec)?;
    }

    if let Some(schema) = schema {
        for expr in plan.exprs() {
            check_indexes(expr, schema)?;
        }
    }

    Ok(plan)
}

/// Validate a delete filter against the query-filter arity rule. Scoring
/// functions and keyword matches have no meaning outside a query.
pub(crate) fn check_delete_filter(expr: &Expr, config: &QueryConfig) -> Result<(), PlanError> {
    let mut scoring = None;
    expr.walk(&mut |node| match node {
        Expr::Function(function) if scoring.is_none() => scoring = Some(function.name()),
        Expr::Match(_) if scoring.is_none() => scoring = Some("match"),
        _ => {}
    });
    if let Some(function) = scoring {
        return Err(PlanError::ScoringInDeleteFilter { function });
    }

    if config.compile.arity_enforcement == ArityEnforcement::Compile {
        check_arity(expr, config.compile.max_nary_operands)?;
    }

    Ok(())
}

fn check_max_k(config: &QueryConfig, stage: &'static str, k: u64) -> Result<(), PlanError> {
    match config.compile.max_k {
        Some(max) if k > max => Err(PlanError::KExceedsMax { stage, k, max }),
        _ => Ok(()),
    }
}

fn check_arity(expr: &Expr, max: usize) -> Result<(), PlanError> {
    let mut widest = 0;
    expr.walk(&mut |node| {
        if let Expr::Nary { exprs, .. } = node {
            widest = widest.max(exprs.len());
        }
    });

    if widest > max {
        return Err(PlanError::TooManyOperands {
            count: widest,
            max,
        });
    }

    Ok(())
}

fn check_sort_key(plan: &QueryPlan, schema: Option<&Schema>) -> Result<(), PlanError> {
    let Some(key) = plan.collector.sort_key() else {
        return Ok(());
    };

    match TypeEnv::new(schema, &plan.select).infer(key) {
        Some(found) if !found.is_sortable() => Err(PlanError::NonPrimitiveSortKey {
            stage: plan.collector.operator(),
            found,
        }),
        _ => Ok(()),
    }
}

// Without an explicit query the reranker borrows the semantic_similarity
// query, so exactly one distinct candidate must exist.
fn check_rerank(plan: &QueryPlan, spec: &RerankSpec) -> Result<(), PlanError> {
    if spec.is_explicit() {
        return Ok(());
    }

    let mut candidates = BTreeSet::new();
    for expr in plan.select.values().chain(plan.collector.sort_key()) {
        expr.walk(&mut |node| {
            if let Expr::Function(FunctionExpr::SemanticSimilarity { field, query }) = node {
                candidates.insert((field.as_str(), query.as_str()));
            }
        });
    }

    if candidates.len() == 1 {
        Ok(())
    } else {
        Err(PlanError::AmbiguousRerank {
            candidates: candidates.len(),
        })
    }
}

fn check_indexes(expr: &Expr, schema: &Schema) -> Result<(), PlanError> {
    let mut result = Ok(());
    expr.walk(&mut |node| {
        if result.is_ok() {
            result = check_node_index(node, schema);
        }
    });

    result
}

fn check_node_index(node: &Expr, schema: &Schema) -> Result<(), PlanError> {
    match node {
        Expr::Function(function) => match function {
            FunctionExpr::Bm25Score => require_any_keyword(schema, "bm25_score"),
            FunctionExpr::VectorDistance { field, .. } => {
                require_index(schema, "vector_distance", field, "vector", |index| {
                    matches!(index, FieldIndex::Vector { .. })
                })
            }
            FunctionExpr::SemanticSimilarity { field, .. } => {
                require_index(schema, "semantic_similarity", field, "semantic", |index| {
                    matches!(index, FieldIndex::Semantic { .. })
                })
            }
            FunctionExpr::MultiVectorDistance { field, .. } => require_index(
                schema,
                "multi_vector_distance",
                field,
                "multi-vector",
                |index| matches!(index, FieldIndex::MultiVector { .. }),
            ),
        },
        Expr::Match(text) => match &text.field {
            Some(field) => require_keyword(schema, "match", field),
            None => require_any_keyword(schema, "match"),
        },
        Expr::Binary { left, op, .. } => {
            let function = match op {
                BinaryOp::MatchAll => "match_all",
                BinaryOp::MatchAny => "match_any",
                _ => return Ok(()),
            };
            left.as_field()
                .map_or(Ok(()), |field| require_keyword(schema, function, field))
        }
        _ => Ok(()),
    }
}

fn require_keyword(schema: &Schema, function: &'static str, field: &str) -> Result<(), PlanError> {
    require_index(schema, function, field, "keyword", |index| {
        matches!(index, FieldIndex::Keyword)
    })
}

fn require_any_keyword(schema: &Schema, function: &'static str) -> Result<(), PlanError> {
    if schema.has_keyword_index() {
        Ok(())
    } else {
        Err(PlanError::NoKeywordIndex { function })
    }
}

fn require_index(
    schema: &Schema,
    function: &'static str,
    field: &str,
    expected: &'static str,
    accepts: impl Fn(&FieldIndex) -> bool,
) -> Result<(), PlanError> {
    if schema.index(field).is_some_and(accepts) {
        return Ok(());
    }

    Err(PlanError::MissingIndex {
        function,
        field: field.to_string(),
        expected,
    })
}
