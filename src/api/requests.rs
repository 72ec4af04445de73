use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};
use crate::{
    database::DocumentStore,
    models::{DonationUpdate, InsertAck, NewDonationRequest, WriteAck},
    services::{
        request_service::{self, RequestFilter},
        session_service::SessionClaims,
    },
    utils::error::AppError,
};

/// Listings keyed by an email in the path belong to that email's session only.
fn ensure_owner(session: &SessionClaims, email: &str) -> Result<(), AppError> {
    if session.email != email {
        log::warn!("🚫 {} tried to read records of {}", session.email, email);
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// POST /request - Create a donation request
#[utoipa::path(
    post,
    path = "/request",
    tag = "Donation Requests",
    responses(
        (status = 200, description = "Insert acknowledged", body = InsertAck),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Missing or invalid session")
    ),
    security(("cookie_auth" = []))
)]
pub async fn create_request(
    db: web::Data<dyn DocumentStore>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let request = NewDonationRequest::try_from(body.into_inner())?;
    log::info!("🩸 POST /request - requester: {}", request.requester_email);

    let ack = request_service::create_request(db.get_ref(), request).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// PATCH /donation/update/{id} - Set status and donor info
#[utoipa::path(
    patch,
    path = "/donation/update/{id}",
    tag = "Donation Requests",
    params(("id" = String, Path, description = "Donation request ObjectId")),
    request_body = DonationUpdate,
    responses(
        (status = 200, description = "Update acknowledged", body = WriteAck),
        (status = 400, description = "Invalid identifier or body"),
        (status = 401, description = "Missing or invalid session")
    ),
    security(("cookie_auth" = []))
)]
pub async fn update_donation(
    db: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
    body: web::Json<DonationUpdate>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PATCH /donation/update/{} - status: {}", id, body.status.as_str());

    let ack = request_service::update_donation(db.get_ref(), &id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// GET /request/{id} - One donation request, `null` when there is none
#[utoipa::path(
    get,
    path = "/request/{id}",
    tag = "Donation Requests",
    params(("id" = String, Path, description = "Donation request ObjectId")),
    responses(
        (status = 200, description = "Request document, or null when absent"),
        (status = 400, description = "Invalid identifier"),
        (status = 401, description = "Missing or invalid session")
    ),
    security(("cookie_auth" = []))
)]
pub async fn get_request(
    db: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔍 GET /request/{}", id);

    let request = request_service::get_request(db.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(request))
}

/// GET /all-requests - Every donation request
#[utoipa::path(
    get,
    path = "/all-requests",
    tag = "Donation Requests",
    responses((status = 200, description = "All donation requests"))
)]
pub async fn list_requests(db: web::Data<dyn DocumentStore>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /all-requests");

    let requests = request_service::list_requests(db.get_ref(), RequestFilter::All).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// GET /my-donation/{email} - Requests this donor has taken on
#[utoipa::path(
    get,
    path = "/my-donation/{email}",
    tag = "Donation Requests",
    params(("email" = String, Path, description = "Donor email, must match the session")),
    responses(
        (status = 200, description = "Requests whose userInfo.donorEmail matches"),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Email belongs to another session")
    ),
    security(("cookie_auth" = []))
)]
pub async fn my_donations(
    db: web::Data<dyn DocumentStore>,
    session: web::ReqData<SessionClaims>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /my-donation/{}", email);
    ensure_owner(&session, &email)?;

    let requests = request_service::list_requests(db.get_ref(), RequestFilter::Donor(email.into_inner())).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// GET /my-requests/{email} - Requests this user has opened
#[utoipa::path(
    get,
    path = "/my-requests/{email}",
    tag = "Donation Requests",
    params(("email" = String, Path, description = "Requester email, must match the session")),
    responses(
        (status = 200, description = "Requests whose requester.email matches"),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Email belongs to another session")
    ),
    security(("cookie_auth" = []))
)]
pub async fn my_requests(
    db: web::Data<dyn DocumentStore>,
    session: web::ReqData<SessionClaims>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /my-requests/{}", email);
    ensure_owner(&session, &email)?;

    let requests =
        request_service::list_requests(db.get_ref(), RequestFilter::Requester(email.into_inner())).await?;
    Ok(HttpResponse::Ok().json(requests))
}
