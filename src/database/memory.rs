// In-process DocumentStore for handler and service tests

use super::DocumentStore;
use crate::models::{InsertAck, WriteAck};
use crate::utils::error::AppError;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails like an unreachable cluster
    pub fn offline() -> Self {
        let store = Self::default();
        store.offline.store(true, Ordering::Relaxed);
        store
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self, collection: &str) -> usize {
        self.documents(collection).len()
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::Relaxed) {
            return Err(AppError::DatabaseError("server selection timeout".to_string()));
        }
        Ok(())
    }
}

fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = document.get(parts.next()?)?;
    for part in parts {
        current = current.as_document()?.get(part)?;
    }
    Some(current)
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(path, expected)| lookup(document, path) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError> {
        self.check_online()?;
        Ok(self
            .documents(collection)
            .into_iter()
            .find(|document| matches(document, &filter)))
    }

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        self.check_online()?;
        Ok(self
            .documents(collection)
            .into_iter()
            .filter(|document| matches(document, &filter))
            .collect())
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<InsertAck, AppError> {
        self.check_online()?;

        let id = document
            .get("_id")
            .cloned()
            .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));
        let mut stored = Document::new();
        stored.insert("_id", id.clone());
        for (key, value) in document {
            if key != "_id" {
                stored.insert(key, value);
            }
        }

        let mut collections = self.collections.lock().unwrap();
        collections.entry(collection.to_string()).or_default().push(stored);

        Ok(InsertAck {
            acknowledged: true,
            inserted_id: crate::utils::json::id_to_string(&id),
        })
    }

    async fn set_fields(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
        upsert: bool,
    ) -> Result<WriteAck, AppError> {
        self.check_online()?;

        let mut collections = self.collections.lock().unwrap();
        let documents = collections.entry(collection.to_string()).or_default();

        if let Some(document) = documents.iter_mut().find(|document| matches(document, &filter)) {
            let changed = fields
                .iter()
                .any(|(key, value)| document.get(key) != Some(value));
            for (key, value) in fields {
                document.insert(key, value);
            }
            return Ok(WriteAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(changed),
                upserted_count: 0,
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(WriteAck {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_count: 0,
                upserted_id: None,
            });
        }

        let id = ObjectId::new();
        let mut created = Document::new();
        created.insert("_id", id);
        for (key, value) in filter.into_iter().chain(fields) {
            if !key.contains('.') {
                created.insert(key, value);
            }
        }
        documents.push(created);

        Ok(WriteAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id.to_hex()),
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_online()
    }
}
