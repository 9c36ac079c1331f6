use crate::{
    config::QueryConfig,
    db::{
        AsyncEngine, COUNT_FIELD, CollectionsClient, DeleteSelector, Document, Engine,
        EngineError, Lsn, QueryTraceEvent, QueryTraceSink, ReadOptions,
    },
    error::QueryError,
    query::{PlanFingerprint, Query, QueryPlan, Schema, check_delete_filter},
    value::Value,
};
use derive_more::{Deref, IntoIterator};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, warn};

///
/// Client
///
/// Owns the engine handle, the compile configuration, optional per-collection
/// schemas and an optional trace sink.
///

pub struct Client<E> {
    engine: E,
    config: QueryConfig,
    schemas: BTreeMap<String, Schema>,
    trace: Option<Arc<dyn QueryTraceSink>>,
}

impl<E> Client<E> {
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            config: QueryConfig::default(),
            schemas: BTreeMap::new(),
            trace: None,
        }
    }

    /// Replace the configuration after validating it.
    pub fn with_config(mut self, config: QueryConfig) -> Result<Self, QueryError> {
        config.validate()?;
        self.config = config;

        Ok(self)
    }

    /// Attach a schema used to type and index-check queries on `collection`.
    #[must_use]
    pub fn with_schema(mut self, collection: impl Into<String>, schema: Schema) -> Self {
        self.schemas.insert(collection.into(), schema);
        self
    }

    #[must_use]
    pub fn with_trace_sink(mut self, sink: Arc<dyn QueryTraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn schema(&self, collection: &str) -> Option<&Schema> {
        self.schemas.get(collection)
    }

    /// Catalog operations: list, get, create and delete collections.
    #[must_use]
    pub const fn collections(&self) -> CollectionsClient<'_, E> {
        CollectionsClient::new(self)
    }

    #[must_use]
    pub fn collection(&self, name: impl Into<String>) -> CollectionClient<'_, E> {
        CollectionClient {
            client: self,
            name: name.into(),
        }
    }
}

///
/// CollectionClient
/// Operations scoped to one collection.
///

pub struct CollectionClient<'a, E> {
    client: &'a Client<E>,
    name: String,
}

impl<E> CollectionClient<'_, E> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compile `query` against this collection's schema, if one is attached.
    pub fn compile(&self, query: &Query) -> Result<QueryPlan, QueryError> {
        let schema = self.client.schema(&self.name);
        let plan = query
            .compile(&self.client.config, schema)
            .inspect_err(|err| {
                debug!(collection = %self.name, error = %err, "query rejected before submission");
            })?;

        debug!(
            collection = %self.name,
            fingerprint = %plan.fingerprint().short(),
            stages = query.stages().len(),
            has_schema = schema.is_some(),
            "compiled query plan"
        );

        Ok(plan)
    }

    fn read_options(&self, lsn: Option<Lsn>) -> ReadOptions {
        ReadOptions::new(self.client.config.read.consistency).with_lsn(lsn)
    }

    fn begin(&self, plan: &QueryPlan) -> Submission<'_> {
        Submission::begin(self.client.trace.as_deref(), &self.name, plan)
    }

    /// Id deletes pass through; filter deletes are checked like query filters.
    fn delete_selector(
        &self,
        selector: impl Into<DeleteSelector>,
    ) -> Result<DeleteSelector, QueryError> {
        let selector = selector.into();
        match &selector {
            DeleteSelector::Ids(ids) => {
                debug!(collection = %self.name, ids = ids.len(), "delete");
            }
            DeleteSelector::Filter(expr) => {
                check_delete_filter(expr, &self.client.config).inspect_err(|err| {
                    debug!(collection = %self.name, error = %err, "delete filter rejected");
                })?;
                debug!(collection = %self.name, filter = %expr, "delete by filter");
            }
        }

        Ok(selector)
    }

    fn write_done(
        &self,
        op: &'static str,
        result: Result<Lsn, EngineError>,
    ) -> Result<Lsn, QueryError> {
        match result {
            Ok(lsn) => {
                debug!(collection = %self.name, op, %lsn, "write acknowledged");
                Ok(lsn)
            }
            Err(err) => {
                warn!(collection = %self.name, op, error = %err, "engine rejected write");
                Err(err.into())
            }
        }
    }
}

impl<E: Engine> CollectionClient<'_, E> {
    /// Compile and submit `query`. With `lsn`, the read waits for that write.
    pub fn query(&self, query: &Query, lsn: Option<Lsn>) -> Result<Rows, QueryError> {
        self.query_with(query, self.read_options(lsn))
    }

    pub fn query_with(&self, query: &Query, options: ReadOptions) -> Result<Rows, QueryError> {
        let plan = self.compile(query)?;
        let submission = self.begin(&plan);

        submission.complete(self.client.engine.query(&self.name, &plan, options))
    }

    /// Number of documents in the collection.
    pub fn count(&self, lsn: Option<Lsn>) -> Result<u64, QueryError> {
        let rows = self.query(&Query::new().count(), lsn)?;

        Ok(rows.count_value()?)
    }

    pub fn upsert(&self, docs: impl IntoIterator<Item = Document>) -> Result<Lsn, QueryError> {
        let docs: Vec<Document> = docs.into_iter().collect();
        debug!(collection = %self.name, docs = docs.len(), "upsert");

        self.write_done("upsert", self.client.engine.upsert(&self.name, docs))
    }

    /// Delete by id list or by filter expression. A filter is validated
    /// locally and never reaches the engine when it is rejected.
    pub fn delete(&self, selector: impl Into<DeleteSelector>) -> Result<Lsn, QueryError> {
        let selector = self.delete_selector(selector)?;

        self.write_done("delete", self.client.engine.delete(&self.name, selector))
    }

    /// Fetch documents by id. `fields` restricts the returned columns.
    pub fn get<S: Into<String>>(
        &self,
        ids: impl IntoIterator<Item = S>,
        fields: Option<Vec<String>>,
        lsn: Option<Lsn>,
    ) -> Result<BTreeMap<String, Document>, QueryError> {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();

        Ok(self
            .client
            .engine
            .get(&self.name, ids, fields, self.read_options(lsn))?)
    }
}

impl<E: AsyncEngine> CollectionClient<'_, E> {
    pub async fn query_async(&self, query: &Query, lsn: Option<Lsn>) -> Result<Rows, QueryError> {
        self.query_with_async(query, self.read_options(lsn)).await
    }

    pub async fn query_with_async(
        &self,
        query: &Query,
        options: ReadOptions,
    ) -> Result<Rows, QueryError> {
        let plan = self.compile(query)?;
        let submission = self.begin(&plan);
        let result = self.client.engine.query(&self.name, &plan, options).await;

        submission.complete(result)
    }

    pub async fn count_async(&self, lsn: Option<Lsn>) -> Result<u64, QueryError> {
        let rows = self.query_async(&Query::new().count(), lsn).await?;

        Ok(rows.count_value()?)
    }

    pub async fn upsert_async(
        &self,
        docs: impl IntoIterator<Item = Document>,
    ) -> Result<Lsn, QueryError> {
        let docs: Vec<Document> = docs.into_iter().collect();
        debug!(collection = %self.name, docs = docs.len(), "upsert");
        let result = self.client.engine.upsert(&self.name, docs).await;

        self.write_done("upsert", result)
    }

    pub async fn delete_async(
        &self,
        selector: impl Into<DeleteSelector>,
    ) -> Result<Lsn, QueryError> {
        let selector = self.delete_selector(selector)?;
        let result = self.client.engine.delete(&self.name, selector).await;

        self.write_done("delete", result)
    }

    pub async fn get_async<S: Into<String>>(
        &self,
        ids: impl IntoIterator<Item = S>,
        fields: Option<Vec<String>>,
        lsn: Option<Lsn>,
    ) -> Result<BTreeMap<String, Document>, QueryError> {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let options = self.read_options(lsn);

        Ok(self
            .client
            .engine
            .get(&self.name, ids, fields, options)
            .await?)
    }
}

///
/// Submission
/// Trace and log bracket around one plan submission.
///

struct Submission<'a> {
    sink: Option<&'a dyn QueryTraceSink>,
    collection: &'a str,
    fingerprint: PlanFingerprint,
}

impl<'a> Submission<'a> {
    fn begin(sink: Option<&'a dyn QueryTraceSink>, collection: &'a str, plan: &QueryPlan) -> Self {
        let submission = Self {
            sink,
            collection,
            fingerprint: plan.fingerprint(),
        };
        submission.emit(|collection, fingerprint| QueryTraceEvent::Submit {
            collection,
            fingerprint,
        });

        submission
    }

    fn complete(self, result: Result<Vec<Document>, EngineError>) -> Result<Rows, QueryError> {
        match result {
            Ok(docs) => {
                let rows = u64::try_from(docs.len()).unwrap_or(u64::MAX);
                debug!(
                    collection = self.collection,
                    fingerprint = %self.fingerprint.short(),
                    rows,
                    "query finished"
                );
                self.emit(|collection, fingerprint| QueryTraceEvent::Finish {
                    collection,
                    fingerprint,
                    rows,
                });

                Ok(Rows(docs))
            }
            Err(err) => {
                warn!(
                    collection = self.collection,
                    fingerprint = %self.fingerprint.short(),
                    error = %err,
                    "engine rejected query plan"
                );
                let kind = err.kind();
                self.emit(|collection, fingerprint| QueryTraceEvent::Reject {
                    collection,
                    fingerprint,
                    kind,
                });

                Err(err.into())
            }
        }
    }

    fn emit(&self, event: impl FnOnce(String, PlanFingerprint) -> QueryTraceEvent) {
        if let Some(sink) = self.sink {
            sink.on_event(event(self.collection.to_string(), self.fingerprint));
        }
    }
}

///
/// Rows
/// Documents returned by one query, in engine order.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator, PartialEq)]
pub struct Rows(#[into_iterator(owned, ref)] Vec<Document>);

impl Rows {
    #[must_use]
    pub fn into_inner(self) -> Vec<Document> {
        self.0
    }

    /// Read the `_count` aggregate of a count query.
    pub fn count_value(&self) -> Result<u64, EngineError> {
        let doc = self.0.first().ok_or_else(|| {
            EngineError::MalformedResponse("No documents received for count query".to_string())
        })?;

        match doc.get(COUNT_FIELD) {
            Some(Value::I64(n)) => u64::try_from(*n).map_err(|_| {
                EngineError::MalformedResponse(format!("Negative _count value {n}"))
            }),
            Some(_) => Err(EngineError::MalformedResponse(
                "Invalid _count field data type in count query response".to_string(),
            )),
            None => Err(EngineError::MalformedResponse(
                "Missing _count field in count query response".to_string(),
            )),
        }
    }
}

impl From<Vec<Document>> for Rows {
    fn from(docs: Vec<Document>) -> Self {
        Self(docs)
    }
}
