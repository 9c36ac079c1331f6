//! In-process stand-ins for the engine and trace sink.

use crate::{
    db::{
        AsyncEngine, COUNT_FIELD, Collection, DeleteSelector, Document, Engine, EngineError, Lsn,
        QueryTraceEvent, QueryTraceSink, ReadOptions, document,
    },
    query::{PlanFingerprint, QueryPlan, Schema},
};
use async_trait::async_trait;
use std::{
    collections::{BTreeMap, VecDeque},
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

///
/// Call
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Call {
    Query {
        collection: String,
        fingerprint: PlanFingerprint,
        options: ReadOptions,
    },
    Upsert {
        collection: String,
        docs: usize,
    },
    Delete {
        collection: String,
        ids: Vec<String>,
    },
    DeleteWhere {
        collection: String,
        filter: String,
    },
    Get {
        collection: String,
        ids: Vec<String>,
        fields: Option<Vec<String>>,
    },
    ListCollections,
    GetCollection(String),
    CreateCollection(String),
    DeleteCollection(String),
}

///
/// RecordingEngine
///
/// Records every call and answers queries from a scripted queue. An empty
/// queue answers count plans with a zero count and everything else with no
/// rows. Writes return increasing LSNs starting at 1. Catalog calls work
/// against an in-memory name to schema map; catalog writes share the write
/// failure switch, and `fail_catalog_reads` fails list and get.
///

#[derive(Default)]
pub(crate) struct RecordingEngine {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<VecDeque<Result<Vec<Document>, EngineError>>>,
    write_error: Mutex<Option<EngineError>>,
    read_error: Mutex<Option<EngineError>>,
    catalog: Mutex<BTreeMap<String, Schema>>,
    lsn: AtomicU64,
}

impl RecordingEngine {
    pub(crate) fn respond(&self, response: Result<Vec<Document>, EngineError>) {
        self.responses.lock().expect("responses lock").push_back(response);
    }

    pub(crate) fn fail_writes(&self, err: EngineError) {
        *self.write_error.lock().expect("write error lock") = Some(err);
    }

    pub(crate) fn fail_catalog_reads(&self, err: EngineError) {
        *self.read_error.lock().expect("read error lock") = Some(err);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn answer(
        &self,
        collection: &str,
        plan: &QueryPlan,
        options: ReadOptions,
    ) -> Result<Vec<Document>, EngineError> {
        self.record(Call::Query {
            collection: collection.to_string(),
            fingerprint: plan.fingerprint(),
            options,
        });

        match self.responses.lock().expect("responses lock").pop_front() {
            Some(response) => response,
            None if plan.is_count() => Ok(vec![document([(COUNT_FIELD, 0_i64)])]),
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, call: Call) -> Result<Lsn, EngineError> {
        self.record(call);
        self.check_writes()?;

        Ok(Lsn::new(self.lsn.fetch_add(1, Ordering::SeqCst) + 1))
    }

    fn check_writes(&self) -> Result<(), EngineError> {
        match self.write_error.lock().expect("write error lock").clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn check_reads(&self) -> Result<(), EngineError> {
        match self.read_error.lock().expect("read error lock").clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn remove(&self, collection: &str, selector: DeleteSelector) -> Result<Lsn, EngineError> {
        let collection = collection.to_string();
        self.write(match selector {
            DeleteSelector::Ids(ids) => Call::Delete { collection, ids },
            DeleteSelector::Filter(expr) => Call::DeleteWhere {
                collection,
                filter: expr.to_string(),
            },
        })
    }

    fn list(&self) -> Result<Vec<Collection>, EngineError> {
        self.record(Call::ListCollections);
        self.check_reads()?;

        Ok(self
            .catalog
            .lock()
            .expect("catalog lock")
            .iter()
            .map(|(name, schema)| Collection::new(name.clone(), schema.clone()))
            .collect())
    }

    fn describe(&self, name: &str) -> Result<Collection, EngineError> {
        self.record(Call::GetCollection(name.to_string()));
        self.check_reads()?;

        self.catalog
            .lock()
            .expect("catalog lock")
            .get(name)
            .map(|schema| Collection::new(name, schema.clone()))
            .ok_or(EngineError::CollectionNotFound)
    }

    fn create(&self, name: &str, schema: Schema) -> Result<Collection, EngineError> {
        self.record(Call::CreateCollection(name.to_string()));
        self.check_writes()?;

        let mut catalog = self.catalog.lock().expect("catalog lock");
        if catalog.contains_key(name) {
            return Err(EngineError::CollectionAlreadyExists);
        }
        catalog.insert(name.to_string(), schema.clone());

        Ok(Collection::new(name, schema))
    }

    fn drop_collection(&self, name: &str) -> Result<(), EngineError> {
        self.record(Call::DeleteCollection(name.to_string()));
        self.check_writes()?;

        self.catalog
            .lock()
            .expect("catalog lock")
            .remove(name)
            .map(|_| ())
            .ok_or(EngineError::CollectionNotFound)
    }

    fn lookup(
        &self,
        collection: &str,
        ids: Vec<String>,
        fields: Option<Vec<String>>,
    ) -> BTreeMap<String, Document> {
        self.record(Call::Get {
            collection: collection.to_string(),
            ids: ids.clone(),
            fields,
        });

        ids.into_iter()
            .map(|id| (id.clone(), document([("_id", id)])))
            .collect()
    }
}

impl Engine for RecordingEngine {
    fn query(
        &self,
        collection: &str,
        plan: &QueryPlan,
        options: ReadOptions,
    ) -> Result<Vec<Document>, EngineError> {
        self.answer(collection, plan, options)
    }

    fn upsert(&self, collection: &str, docs: Vec<Document>) -> Result<Lsn, EngineError> {
        self.write(Call::Upsert {
            collection: collection.to_string(),
            docs: docs.len(),
        })
    }

    fn delete(&self, collection: &str, selector: DeleteSelector) -> Result<Lsn, EngineError> {
        self.remove(collection, selector)
    }

    fn get(
        &self,
        collection: &str,
        ids: Vec<String>,
        fields: Option<Vec<String>>,
        _options: ReadOptions,
    ) -> Result<BTreeMap<String, Document>, EngineError> {
        Ok(self.lookup(collection, ids, fields))
    }

    fn list_collections(&self) -> Result<Vec<Collection>, EngineError> {
        self.list()
    }

    fn get_collection(&self, name: &str) -> Result<Collection, EngineError> {
        self.describe(name)
    }

    fn create_collection(&self, name: &str, schema: Schema) -> Result<Collection, EngineError> {
        self.create(name, schema)
    }

    fn delete_collection(&self, name: &str) -> Result<(), EngineError> {
        self.drop_collection(name)
    }
}

#[async_trait]
impl AsyncEngine for RecordingEngine {
    async fn query(
        &self,
        collection: &str,
        plan: &QueryPlan,
        options: ReadOptions,
    ) -> Result<Vec<Document>, EngineError> {
        self.answer(collection, plan, options)
    }

    async fn upsert(&self, collection: &str, docs: Vec<Document>) -> Result<Lsn, EngineError> {
        self.write(Call::Upsert {
            collection: collection.to_string(),
            docs: docs.len(),
        })
    }

    async fn delete(&self, collection: &str, selector: DeleteSelector) -> Result<Lsn, EngineError> {
        self.remove(collection, selector)
    }

    async fn get(
        &self,
        collection: &str,
        ids: Vec<String>,
        fields: Option<Vec<String>>,
        _options: ReadOptions,
    ) -> Result<BTreeMap<String, Document>, EngineError> {
        Ok(self.lookup(collection, ids, fields))
    }

    async fn list_collections(&self) -> Result<Vec<Collection>, EngineError> {
        self.list()
    }

    async fn get_collection(&self, name: &str) -> Result<Collection, EngineError> {
        self.describe(name)
    }

    async fn create_collection(
        &self,
        name: &str,
        schema: Schema,
    ) -> Result<Collection, EngineError> {
        self.create(name, schema)
    }

    async fn delete_collection(&self, name: &str) -> Result<(), EngineError> {
        self.drop_collection(name)
    }
}

///
/// RecordingSink
///

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<QueryTraceEvent>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<QueryTraceEvent> {
        self.events.lock().expect("events lock").clone()
    }
}

impl QueryTraceSink for RecordingSink {
    fn on_event(&self, event: QueryTraceEvent) {
        self.events.lock().expect("events lock").push(event);
    }
}
