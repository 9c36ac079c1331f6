use crate::{
    db::{AsyncEngine, Client, Engine, EngineError},
    error::QueryError,
    query::Schema,
};
use tracing::{debug, warn};

///
/// Collection
///
/// Catalog entry returned by the engine: a collection name and the schema it
/// was created with.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Collection {
    pub name: String,
    pub schema: Schema,
}

impl Collection {
    #[must_use]
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

///
/// CollectionsClient
///
/// Catalog operations. A created collection's schema is not attached to the
/// client; use `Client::with_schema` to have queries checked against it.
///

pub struct CollectionsClient<'a, E> {
    client: &'a Client<E>,
}

impl<'a, E> CollectionsClient<'a, E> {
    pub(super) const fn new(client: &'a Client<E>) -> Self {
        Self { client }
    }
}

fn catalog_done<T>(
    op: &'static str,
    name: &str,
    result: Result<T, EngineError>,
) -> Result<T, QueryError> {
    match result {
        Ok(value) => {
            debug!(collection = name, op, "catalog operation acknowledged");
            Ok(value)
        }
        Err(err) => {
            warn!(collection = name, op, error = %err, "engine rejected catalog operation");
            Err(err.into())
        }
    }
}

impl<E: Engine> CollectionsClient<'_, E> {
    pub fn list(&self) -> Result<Vec<Collection>, QueryError> {
        catalog_done("list", "*", self.client.engine().list_collections())
    }

    pub fn get(&self, name: &str) -> Result<Collection, QueryError> {
        catalog_done("get", name, self.client.engine().get_collection(name))
    }

    pub fn create(&self, name: &str, schema: Schema) -> Result<Collection, QueryError> {
        debug!(collection = name, fields = schema.fields().count(), "create collection");

        catalog_done("create", name, self.client.engine().create_collection(name, schema))
    }

    pub fn delete(&self, name: &str) -> Result<(), QueryError> {
        catalog_done("delete", name, self.client.engine().delete_collection(name))
    }
}

impl<E: AsyncEngine> CollectionsClient<'_, E> {
    pub async fn list_async(&self) -> Result<Vec<Collection>, QueryError> {
        let result = self.client.engine().list_collections().await;

        catalog_done("list", "*", result)
    }

    pub async fn get_async(&self, name: &str) -> Result<Collection, QueryError> {
        let result = self.client.engine().get_collection(name).await;

        catalog_done("get", name, result)
    }

    pub async fn create_async(
        &self,
        name: &str,
        schema: Schema,
    ) -> Result<Collection, QueryError> {
        debug!(collection = name, fields = schema.fields().count(), "create collection");
        let result = self.client.engine().create_collection(name, schema).await;

        catalog_done("create", name, result)
    }

    pub async fn delete_async(&self, name: &str) -> Result<(), QueryError> {
        let result = self.client.engine().delete_collection(name).await;

        catalog_done("delete", name, result)
    }
}
