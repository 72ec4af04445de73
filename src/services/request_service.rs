use crate::{
    database::{DocumentStore, REQUESTS},
    models::{DonationUpdate, InsertAck, NewDonationRequest, WriteAck},
    utils::json::{document_to_json, object_to_document, parse_object_id},
};
use crate::utils::error::AppError;
use mongodb::bson::{doc, Document};
use serde_json::Value;

/// Which donation requests a listing returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFilter {
    All,
    Donor(String),
    Requester(String),
}

impl RequestFilter {
    fn to_document(&self) -> Document {
        match self {
            RequestFilter::All => doc! {},
            RequestFilter::Donor(email) => doc! { "userInfo.donorEmail": email.as_str() },
            RequestFilter::Requester(email) => doc! { "requester.email": email.as_str() },
        }
    }
}

pub async fn create_request(
    db: &dyn DocumentStore,
    request: NewDonationRequest,
) -> Result<InsertAck, AppError> {
    let document = object_to_document(request.fields)?;
    let ack = db.insert_one(REQUESTS, document).await?;
    log::info!("🩸 Donation request {} created by {}", ack.inserted_id, request.requester_email);
    Ok(ack)
}

/// Overwrites only `status` and `userInfo`
pub async fn update_donation(
    db: &dyn DocumentStore,
    id: &str,
    update: DonationUpdate,
) -> Result<WriteAck, AppError> {
    let id = parse_object_id(id)?;
    update.validate()?;

    let user_info = object_to_document(update.user_info)?;
    let fields = doc! {
        "status": update.status.as_str(),
        "userInfo": user_info,
    };
    db.set_fields(REQUESTS, doc! { "_id": id }, fields, false).await
}

pub async fn get_request(db: &dyn DocumentStore, id: &str) -> Result<Option<Value>, AppError> {
    let id = parse_object_id(id)?;
    let request = db.find_one(REQUESTS, doc! { "_id": id }).await?;
    Ok(request.map(document_to_json))
}

pub async fn list_requests(db: &dyn DocumentStore, filter: RequestFilter) -> Result<Vec<Value>, AppError> {
    let requests = db.find(REQUESTS, filter.to_document()).await?;
    Ok(requests.into_iter().map(document_to_json).collect())
}
