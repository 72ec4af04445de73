use crate::{
    database::{DocumentStore, USERS},
    models::{UserUpdate, UserUpsert, WriteAck},
    utils::json::{document_to_json, object_to_document},
};
use crate::utils::error::AppError;
use chrono::Utc;
use mongodb::bson::{doc, Document};
use serde_json::{Map, Value};

/// Body fields plus a fresh `timestamp` (epoch millis), ready for `$set`
fn stamped(fields: Map<String, Value>) -> Result<Document, AppError> {
    let mut document = object_to_document(fields)?;
    document.insert("timestamp", Utc::now().timestamp_millis());
    Ok(document)
}

pub async fn get_user(db: &dyn DocumentStore, email: &str) -> Result<Option<Value>, AppError> {
    let user = db.find_one(USERS, doc! { "email": email }).await?;
    Ok(user.map(document_to_json))
}

pub async fn list_users(db: &dyn DocumentStore) -> Result<Vec<Value>, AppError> {
    let users = db.find(USERS, doc! {}).await?;
    Ok(users.into_iter().map(document_to_json).collect())
}

/// Merges the update into the user with this email. Never creates one.
pub async fn update_user(
    db: &dyn DocumentStore,
    email: &str,
    update: UserUpdate,
) -> Result<WriteAck, AppError> {
    let fields = stamped(update.fields)?;
    db.set_fields(USERS, doc! { "email": email }, fields, false).await
}

/// Creates the user on first save, merges fields on every later one.
pub async fn upsert_user(db: &dyn DocumentStore, user: UserUpsert) -> Result<WriteAck, AppError> {
    let filter = doc! { "email": user.email.as_str() };
    let fields = stamped(user.fields)?;
    let ack = db.set_fields(USERS, filter, fields, true).await?;

    if ack.upserted_id.is_some() {
        log::info!("✅ New user saved: {}", user.email);
    }
    Ok(ack)
}
