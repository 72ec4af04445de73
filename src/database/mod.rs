use crate::models::{InsertAck, WriteAck};
use crate::utils::error::AppError;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database};

#[cfg(test)]
pub mod memory;

pub const USERS: &str = "users";
pub const REQUESTS: &str = "requests";
pub const BLOGS: &str = "blogs";

/// Single-collection operations the handlers are built on. Every handler
/// issues at most one of these per request.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError>;

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError>;

    async fn insert_one(&self, collection: &str, document: Document) -> Result<InsertAck, AppError>;

    /// `$set` merge of `fields` into the first document matching `filter`,
    /// creating it from the filter and fields when `upsert` is set.
    async fn set_fields(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
        upsert: bool,
    ) -> Result<WriteAck, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Builds the client. The driver connects lazily, so an unreachable
    /// cluster only shows up on the first command (see `ping`).
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        Ok(Self { client, db })
    }

    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        let cursor = self.collection(collection).find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<InsertAck, AppError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(result.into())
    }

    async fn set_fields(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
        upsert: bool,
    ) -> Result<WriteAck, AppError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .upsert(upsert)
            .await?;
        Ok(result.into())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
