use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::{services::session_service::SessionManager, utils::error::AppError};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionResponse {
    pub success: bool,
}

/// POST /jwt - Issue a session cookie for the posted user payload
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    responses(
        (status = 200, description = "Session cookie set", body = SessionResponse),
        (status = 400, description = "Payload has no valid email")
    )
)]
pub async fn issue_session(
    sessions: web::Data<SessionManager>,
    payload: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let issued = sessions.issue(payload.into_inner())?;
    log::info!("🔐 POST /jwt - session issued for {}", issued.claims.email);

    Ok(HttpResponse::Ok()
        .cookie(sessions.session_cookie(issued.token))
        .json(SessionResponse { success: true }))
}

/// GET /logout - Clear the session cookie
#[utoipa::path(
    get,
    path = "/logout",
    tag = "Auth",
    responses((status = 200, description = "Session cookie cleared", body = SessionResponse))
)]
pub async fn logout(sessions: web::Data<SessionManager>) -> HttpResponse {
    log::info!("👋 GET /logout - Logout successful");

    HttpResponse::Ok()
        .cookie(sessions.removal_cookie())
        .json(SessionResponse { success: true })
}
