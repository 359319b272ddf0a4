//! MongoDB access object
//!
//! `Store` wraps a `mongodb::Database` and is handed to every handler
//! through the router state — it is built once at startup and cloned, never
//! reached through a global.
//!
//! # Serialization strategy
//!
//! Documents go through `serde_json::Value` as an intermediate format before
//! BSON, so UUIDs and dates are stored as plain strings and every entity
//! round-trips the same way it appears on the wire. The domain `id` field is
//! renamed to Mongo's `_id` on the way in and back on the way out.

use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Database};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::{AppConfig, DEFAULT_DATABASE};
use crate::error::ApiError;
use crate::models::datetime;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a JSON object into a BSON document, renaming `id` → `_id`.
fn to_document(value: serde_json::Value) -> Result<Document, ApiError> {
    let bson = mongodb::bson::to_bson(&value)
        .map_err(|e| ApiError::Internal(format!("conversion JSON vers BSON impossible: {e}")))?;

    let Bson::Document(mut doc) = bson else {
        return Err(ApiError::Internal(
            "un document JSON était attendu".to_string(),
        ));
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON document back into JSON, renaming `_id` → `id`.
fn from_document(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn id_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Build the `$set` document for a partial update.
///
/// The raw body is merged shallowly: top-level keys overwrite, nested
/// objects are replaced whole. `id`/`_id` are dropped so the identifier can
/// never be rewritten. No validation is applied.
fn set_document(changes: serde_json::Map<String, serde_json::Value>) -> Result<Document, ApiError> {
    let mut set = Document::new();
    for (key, value) in changes {
        if key == "id" || key == "_id" {
            continue;
        }
        let bson = mongodb::bson::to_bson(&value).map_err(|e| {
            ApiError::Internal(format!("conversion JSON vers BSON impossible: {e}"))
        })?;
        set.insert(key, bson);
    }
    Ok(set)
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Handle on the hotel-booking database.
#[derive(Clone, Debug)]
pub struct Store {
    database: Database,
}

impl Store {
    /// Connect to the deployment named by the configuration and ping it.
    ///
    /// The database name comes from the URI path, falling back to
    /// `hotel-booking`.
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(&config.mongodb_uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        database.run_command(doc! { "ping": 1 }).await?;
        Ok(Self { database })
    }

    /// Wrap an existing database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection(name)
    }

    fn encode<T: Serialize>(entity: &T) -> Result<Document, ApiError> {
        let json = serde_json::to_value(entity)
            .map_err(|e| ApiError::Internal(format!("sérialisation impossible: {e}")))?;
        to_document(json)
    }

    fn decode<T: DeserializeOwned>(doc: Document) -> Result<T, ApiError> {
        serde_json::from_value(from_document(doc))
            .map_err(|e| ApiError::Internal(format!("désérialisation impossible: {e}")))
    }

    /// Insert a document and read it back as stored.
    pub async fn insert<T>(&self, collection: &str, id: &Uuid, entity: &T) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
    {
        let doc = Self::encode(entity)?;
        self.collection(collection).insert_one(doc).await?;

        let stored = self
            .collection(collection)
            .find_one(doc! { "_id": id_bson(id) })
            .await?
            .ok_or_else(|| ApiError::Internal("document introuvable après insertion".to_string()))?;

        Self::decode(stored)
    }

    /// One page of documents matching `filter`, in store iteration order.
    pub async fn find_page<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<T>, ApiError> {
        let cursor = self
            .collection(collection)
            .find(filter)
            .skip(skip)
            .limit(limit)
            .await?;

        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.into_iter().map(Self::decode).collect()
    }

    /// All documents matching `filter`, unpaginated.
    pub async fn find_all<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Vec<T>, ApiError> {
        let cursor = self.collection(collection).find(filter).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.into_iter().map(Self::decode).collect()
    }

    /// Number of documents matching `filter`.
    pub async fn count(&self, collection: &str, filter: Document) -> Result<u64, ApiError> {
        Ok(self.collection(collection).count_documents(filter).await?)
    }

    /// `$set`-merge `changes` into the document with the given id and bump
    /// `updatedAt`. Returns the updated document, or `None` when no document
    /// matched. The result is raw JSON: an update can legally push the
    /// document outside the typed model.
    pub async fn update_by_id(
        &self,
        collection: &str,
        id: &Uuid,
        changes: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let mut set = set_document(changes)?;
        set.insert("updatedAt", datetime::format(&Utc::now()));

        let updated = self
            .collection(collection)
            .find_one_and_update(doc! { "_id": id_bson(id) }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated.map(from_document))
    }

    /// Delete the document with the given id. Returns whether a document was
    /// actually removed.
    pub async fn delete_by_id(&self, collection: &str, id: &Uuid) -> Result<bool, ApiError> {
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": id_bson(id) })
            .await?;
        Ok(result.deleted_count > 0)
    }

    /// Run an aggregation pipeline server-side and decode each row.
    pub async fn aggregate<T: DeserializeOwned>(
        &self,
        collection: &str,
        pipeline: Vec<Document>,
    ) -> Result<Vec<T>, ApiError> {
        let cursor = self.collection(collection).aggregate(pipeline).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.into_iter().map(Self::decode).collect()
    }
}
