//! External engine boundary.
//!
//! The engine stores documents, evaluates plans and assigns LSNs. This crate
//! only submits validated plans and passes engine failures back unchanged.

use crate::{
    db::{Collection, ConsistencyLevel, Document, Lsn},
    error::ErrorKind,
    expr::Expr,
    query::{QueryPlan, Schema},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// EngineError
///
/// Failures reported by the engine. Message payloads are kept verbatim.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EngineError {
    #[error("collection not found")]
    CollectionNotFound,

    #[error("collection already exists")]
    CollectionAlreadyExists,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("document validation error: {0}")]
    DocumentValidation(String),

    #[error("invalid collection schema: {0}")]
    SchemaValidation(String),

    #[error("permission denied")]
    PermissionDenied,

    #[error("capacity exceeded")]
    CapacityExceeded,

    #[error("lsn timeout")]
    LsnTimeout,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("unexpected engine error: {0}")]
    Unexpected(String),
}

impl EngineError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CollectionNotFound => ErrorKind::CollectionNotFound,
            Self::CollectionAlreadyExists => ErrorKind::CollectionAlreadyExists,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::DocumentValidation(_) => ErrorKind::DocumentValidation,
            Self::SchemaValidation(_) => ErrorKind::SchemaValidation,
            Self::PermissionDenied => ErrorKind::PermissionDenied,
            Self::CapacityExceeded => ErrorKind::CapacityExceeded,
            Self::LsnTimeout => ErrorKind::LsnTimeout,
            Self::MalformedResponse(_) | Self::Unexpected(_) => ErrorKind::Internal,
        }
    }
}

///
/// ReadOptions
///
/// `lsn` makes the read wait until that write is visible.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReadOptions {
    pub lsn: Option<Lsn>,
    pub consistency: ConsistencyLevel,
}

impl ReadOptions {
    #[must_use]
    pub const fn new(consistency: ConsistencyLevel) -> Self {
        Self {
            lsn: None,
            consistency,
        }
    }

    #[must_use]
    pub const fn with_lsn(mut self, lsn: Option<Lsn>) -> Self {
        self.lsn = lsn;
        self
    }

    #[must_use]
    pub const fn with_consistency(mut self, consistency: ConsistencyLevel) -> Self {
        self.consistency = consistency;
        self
    }
}

///
/// DeleteSelector
///
/// Documents removed by one delete call: an explicit id list, or every
/// document matching a filter expression at the time the delete is applied.
///

#[derive(Clone, Debug)]
pub enum DeleteSelector {
    Ids(Vec<String>),
    Filter(Expr),
}

impl DeleteSelector {
    #[must_use]
    pub const fn as_filter(&self) -> Option<&Expr> {
        match self {
            Self::Filter(expr) => Some(expr),
            Self::Ids(_) => None,
        }
    }
}

impl From<Expr> for DeleteSelector {
    fn from(expr: Expr) -> Self {
        Self::Filter(expr)
    }
}

impl<S: Into<String>> From<Vec<S>> for DeleteSelector {
    fn from(ids: Vec<S>) -> Self {
        Self::Ids(ids.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for DeleteSelector {
    fn from(ids: [S; N]) -> Self {
        Self::Ids(ids.into_iter().map(Into::into).collect())
    }
}

///
/// Engine
/// Blocking engine transport.
///

pub trait Engine {
    fn query(
        &self,
        collection: &str,
        plan: &QueryPlan,
        options: ReadOptions,
    ) -> Result<Vec<Document>, EngineError>;

    fn upsert(&self, collection: &str, docs: Vec<Document>) -> Result<Lsn, EngineError>;

    fn delete(&self, collection: &str, selector: DeleteSelector) -> Result<Lsn, EngineError>;

    fn get(
        &self,
        collection: &str,
        ids: Vec<String>,
        fields: Option<Vec<String>>,
        options: ReadOptions,
    ) -> Result<BTreeMap<String, Document>, EngineError>;

    fn list_collections(&self) -> Result<Vec<Collection>, EngineError>;

    fn get_collection(&self, name: &str) -> Result<Collection, EngineError>;

    fn create_collection(&self, name: &str, schema: Schema) -> Result<Collection, EngineError>;

    fn delete_collection(&self, name: &str) -> Result<(), EngineError>;
}

///
/// AsyncEngine
/// Non-blocking engine transport.
///

#[async_trait]
pub trait AsyncEngine: Send + Sync {
    async fn query(
        &self,
        collection: &str,
        plan: &QueryPlan,
        options: ReadOptions,
    ) -> Result<Vec<Document>, EngineError>;

    async fn upsert(&self, collection: &str, docs: Vec<Document>) -> Result<Lsn, EngineError>;

    async fn delete(&self, collection: &str, selector: DeleteSelector) -> Result<Lsn, EngineError>;

    async fn get(
        &self,
        collection: &str,
        ids: Vec<String>,
        fields: Option<Vec<String>>,
        options: ReadOptions,
    ) -> Result<BTreeMap<String, Document>, EngineError>;

    async fn list_collections(&self) -> Result<Vec<Collection>, EngineError>;

    async fn get_collection(&self, name: &str) -> Result<Collection, EngineError>;

    async fn create_collection(
        &self,
        name: &str,
        schema: Schema,
    ) -> Result<Collection, EngineError>;

    async fn delete_collection(&self, name: &str) -> Result<(), EngineError>;
}
