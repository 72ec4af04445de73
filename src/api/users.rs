use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};
use crate::{
    database::DocumentStore,
    models::{UserUpdate, UserUpsert, WriteAck},
    services::user_service,
    utils::error::AppError,
};

/// GET /user/{email} - User profile, `null` when there is none
#[utoipa::path(
    get,
    path = "/user/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User document, or null when absent"),
        (status = 401, description = "Missing or invalid session")
    ),
    security(("cookie_auth" = []))
)]
pub async fn get_user(
    db: web::Data<dyn DocumentStore>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /user/{}", email);

    let user = user_service::get_user(db.get_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// PATCH /users/update/{email} - Change role, status or other profile fields
#[utoipa::path(
    patch,
    path = "/users/update/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Update acknowledged", body = WriteAck),
        (status = 400, description = "Invalid fields"),
        (status = 401, description = "Missing or invalid session")
    ),
    security(("cookie_auth" = []))
)]
pub async fn update_user(
    db: web::Data<dyn DocumentStore>,
    email: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PATCH /users/update/{}", email);

    let update = UserUpdate::try_from(body.into_inner())?;
    let ack = user_service::update_user(db.get_ref(), &email, update).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// PUT /user - Save a user on sign-up or sign-in
#[utoipa::path(
    put,
    path = "/user",
    tag = "Users",
    responses(
        (status = 200, description = "Upsert acknowledged", body = WriteAck),
        (status = 400, description = "Missing or invalid email")
    )
)]
pub async fn save_user(
    db: web::Data<dyn DocumentStore>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let user = UserUpsert::try_from(body.into_inner())?;
    log::info!("📝 PUT /user - email: {}", user.email);

    let ack = user_service::upsert_user(db.get_ref(), user).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// GET /users - Every user
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user documents"),
        (status = 401, description = "Missing or invalid session")
    ),
    security(("cookie_auth" = []))
)]
pub async fn list_users(db: web::Data<dyn DocumentStore>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users");

    let users = user_service::list_users(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(users))
}
