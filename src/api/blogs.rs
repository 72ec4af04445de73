use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};
use crate::{
    database::DocumentStore,
    models::{BlogFields, InsertAck, WriteAck},
    services::blog_service,
    utils::error::AppError,
};

/// PUT /add-blog - Create a blog post
#[utoipa::path(
    put,
    path = "/add-blog",
    tag = "Blogs",
    responses(
        (status = 200, description = "Insert acknowledged", body = InsertAck),
        (status = 400, description = "Empty or invalid body"),
        (status = 401, description = "Missing or invalid session")
    ),
    security(("cookie_auth" = []))
)]
pub async fn create_blog(
    db: web::Data<dyn DocumentStore>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 PUT /add-blog");

    let blog = BlogFields::try_from(body.into_inner())?;
    let ack = blog_service::create_blog(db.get_ref(), blog).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// PATCH /blog/update/{id} - Merge fields into a blog post
#[utoipa::path(
    patch,
    path = "/blog/update/{id}",
    tag = "Blogs",
    params(("id" = String, Path, description = "Blog ObjectId")),
    responses(
        (status = 200, description = "Update acknowledged", body = WriteAck),
        (status = 400, description = "Invalid identifier or body"),
        (status = 401, description = "Missing or invalid session")
    ),
    security(("cookie_auth" = []))
)]
pub async fn update_blog(
    db: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PATCH /blog/update/{}", id);

    let blog = BlogFields::try_from(body.into_inner())?;
    let ack = blog_service::update_blog(db.get_ref(), &id, blog).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// GET /all-blogs
#[utoipa::path(
    get,
    path = "/all-blogs",
    tag = "Blogs",
    responses((status = 200, description = "All blog posts"))
)]
pub async fn list_blogs(db: web::Data<dyn DocumentStore>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /all-blogs");

    let blogs = blog_service::list_blogs(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(blogs))
}
