//! Process-local document store.
//!
//! Mirrors the Firestore semantics the services rely on: documents are JSON
//! objects, unordered listings come back in insertion order, and inserts are
//! create-only. Each collection sits behind its own `DashMap` shard lock, so
//! a check-and-insert on one collection is atomic.

use crate::db::FieldFilter;
use crate::error::AppError;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cmp::Ordering;

struct StoredDocument {
    id: String,
    data: serde_json::Value,
}

#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<StoredDocument>>,
}

fn encode<T: Serialize>(doc: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(doc).map_err(|e| AppError::Database(format!("Encode failed: {}", e)))
}

fn decode<T: DeserializeOwned>(data: &serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(data.clone())
        .map_err(|e| AppError::Database(format!("Decode failed: {}", e)))
}

fn compare_field(a: &serde_json::Value, b: &serde_json::Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(serde_json::Value::String(x)), Some(serde_json::Value::String(y))) => x.cmp(y),
        (Some(serde_json::Value::Number(x)), Some(serde_json::Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

impl MemoryStore {
    pub fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, AppError> {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(None);
        };
        docs.iter()
            .find(|doc| doc.id == id)
            .map(|doc| decode(&doc.data))
            .transpose()
    }

    pub fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[FieldFilter],
        order_by: Option<&str>,
    ) -> Result<Vec<T>, AppError> {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matching: Vec<&serde_json::Value> = docs
            .iter()
            .map(|doc| &doc.data)
            .filter(|data| {
                filters
                    .iter()
                    .all(|f| data.get(f.field) == Some(&f.value))
            })
            .collect();

        // Stable sort keeps insertion order for equal keys
        if let Some(field) = order_by {
            matching.sort_by(|a, b| compare_field(a, b, field));
        }

        matching.into_iter().map(decode).collect()
    }

    pub fn insert<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
    ) -> Result<bool, AppError> {
        let data = encode(doc)?;
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|existing| existing.id == id) {
            return Ok(false);
        }
        docs.push(StoredDocument {
            id: id.to_string(),
            data,
        });
        Ok(true)
    }

    pub fn put<T: Serialize>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError> {
        let data = encode(doc)?;
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => existing.data = data,
            None => docs.push(StoredDocument {
                id: id.to_string(),
                data,
            }),
        }
        Ok(())
    }

    pub fn delete(&self, collection: &str, id: &str) {
        if let Some(mut docs) = self.collections.get_mut(collection) {
            docs.retain(|doc| doc.id != id);
        }
    }
}
