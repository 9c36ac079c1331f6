//! Engine boundary and collection client.
//!
//! Module: db
//! Responsibility: submit compiled plans, document writes and catalog
//! operations to an external engine, surface its results and failures, and
//! emit trace events.
//! Does not own: storage, indexing, scoring, transport, or retries.
//! Boundary: every query is compiled locally before it reaches the engine;
//! local failures never produce an engine call.

mod client;
mod collections;
mod engine;
mod lsn;
mod trace;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{Client, CollectionClient, Rows};
pub use collections::{Collection, CollectionsClient};
pub use engine::{AsyncEngine, DeleteSelector, Engine, EngineError, ReadOptions};
pub use lsn::{ConsistencyLevel, Lsn, LsnParseError};
pub use trace::{QueryTraceEvent, QueryTraceSink};

use crate::value::Value;
use std::collections::BTreeMap;

/// Column carrying the aggregate of a `count` query.
pub const COUNT_FIELD: &str = "_count";

/// Column carrying the document id.
pub const ID_FIELD: &str = "_id";

/// One stored or returned document, keyed by field name.
pub type Document = BTreeMap<String, Value>;

/// Build a document from `(field, value)` pairs. Later pairs win.
#[must_use]
pub fn document<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Document
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
