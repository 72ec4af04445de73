// Conversions between request JSON and stored BSON documents

use crate::utils::error::{AppError, ValidationError};
use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};

/// Renders a stored document the way clients expect it: ObjectIds as hex
/// strings, dates as RFC 3339, everything else as relaxed extended JSON.
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(date) => date
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::from(date.timestamp_millis())),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn object_to_document(object: Map<String, Value>) -> Result<Document, AppError> {
    Ok(bson::to_document(&object)?)
}

/// Hex form of an engine-assigned identifier.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| ValidationError::new("id", format!("'{}' is not a valid identifier", id)).into())
}
