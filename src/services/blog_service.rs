use crate::{
    database::{DocumentStore, BLOGS},
    models::{BlogFields, InsertAck, WriteAck},
    utils::json::{document_to_json, object_to_document, parse_object_id},
};
use crate::utils::error::AppError;
use mongodb::bson::doc;
use serde_json::Value;

pub async fn create_blog(db: &dyn DocumentStore, blog: BlogFields) -> Result<InsertAck, AppError> {
    let document = object_to_document(blog.fields)?;
    db.insert_one(BLOGS, document).await
}

pub async fn update_blog(db: &dyn DocumentStore, id: &str, blog: BlogFields) -> Result<WriteAck, AppError> {
    let id = parse_object_id(id)?;
    let fields = object_to_document(blog.fields)?;
    db.set_fields(BLOGS, doc! { "_id": id }, fields, false).await
}

pub async fn list_blogs(db: &dyn DocumentStore) -> Result<Vec<Value>, AppError> {
    let blogs = db.find(BLOGS, doc! {}).await?;
    Ok(blogs.into_iter().map(document_to_json).collect())
}
