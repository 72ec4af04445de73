pub mod auth;
pub mod blogs;
pub mod health;
pub mod metrics;
pub mod requests;
pub mod swagger;
pub mod users;

use actix_web::web;
use crate::middleware::AuthMiddleware;
use crate::utils::error::{AppError, ValidationError};

/// Rejects malformed or mistyped JSON bodies with a 400 validation error
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("⚠️  {} {} - rejected body: {}", req.method(), req.path(), err);
        AppError::Validation(ValidationError::new("body", err.to_string())).into()
    })
}

/// Route table. Endpoints wrapped in `AuthMiddleware` need a session cookie.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Liveness, health & metrics
        .route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))

        // Session
        .route("/jwt", web::post().to(auth::issue_session))
        .route("/logout", web::get().to(auth::logout))

        // Users
        .route("/user", web::put().to(users::save_user))
        .service(
            web::resource("/user/{email}")
                .wrap(AuthMiddleware)
                .route(web::get().to(users::get_user)),
        )
        .service(
            web::resource("/users")
                .wrap(AuthMiddleware)
                .route(web::get().to(users::list_users)),
        )
        .service(
            web::resource("/users/update/{email}")
                .wrap(AuthMiddleware)
                .route(web::patch().to(users::update_user)),
        )

        // Donation requests
        .route("/all-requests", web::get().to(requests::list_requests))
        .service(
            web::resource("/request")
                .wrap(AuthMiddleware)
                .route(web::post().to(requests::create_request)),
        )
        .service(
            web::resource("/request/{id}")
                .wrap(AuthMiddleware)
                .route(web::get().to(requests::get_request)),
        )
        .service(
            web::resource("/donation/update/{id}")
                .wrap(AuthMiddleware)
                .route(web::patch().to(requests::update_donation)),
        )
        .service(
            web::resource("/my-donation/{email}")
                .wrap(AuthMiddleware)
                .route(web::get().to(requests::my_donations)),
        )
        .service(
            web::resource("/my-requests/{email}")
                .wrap(AuthMiddleware)
                .route(web::get().to(requests::my_requests)),
        )

        // Blogs
        .route("/all-blogs", web::get().to(blogs::list_blogs))
        .service(
            web::resource("/add-blog")
                .wrap(AuthMiddleware)
                .route(web::put().to(blogs::create_blog)),
        )
        .service(
            web::resource("/blog/update/{id}")
                .wrap(AuthMiddleware)
                .route(web::patch().to(blogs::update_blog)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{memory::MemoryStore, DocumentStore, REQUESTS, USERS};
    use crate::middleware::SecurityHeaders;
    use crate::models::{InsertAck, WriteAck};
    use crate::services::session_service::{SessionManager, SESSION_COOKIE};
    use actix_web::{cookie::Cookie, http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    const SECRET: &str = "test-secret";

    macro_rules! test_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::from($store.clone() as Arc<dyn DocumentStore>))
                    .app_data(web::Data::new(SessionManager::new(SECRET, false)))
                    .app_data(json_config())
                    .wrap(SecurityHeaders)
                    .configure(configure),
            )
            .await
        };
    }

    fn session_for(email: &str) -> Cookie<'static> {
        let sessions = SessionManager::new(SECRET, false);
        let payload = json!({ "email": email }).as_object().cloned().unwrap();
        let issued = sessions.issue(payload).unwrap();
        sessions.session_cookie(issued.token)
    }

    fn donation(requester: &str, donor: &str) -> Value {
        json!({
            "requester": { "email": requester, "name": "Requester" },
            "recipientName": "Karim",
            "hospital": "Chittagong Medical",
            "bloodGroup": "AB-",
            "status": "pending",
            "userInfo": { "donorName": "Donor", "donorEmail": donor },
        })
    }

    #[actix_web::test]
    async fn test_root_is_plain_text_liveness() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("x-content-type-options").unwrap(), "nosniff");

        let body = test::read_body(resp).await;
        assert_eq!(body, web::Bytes::from_static(b"Blood bank is running"));
    }

    #[actix_web::test]
    async fn test_missing_cookie_is_rejected_without_side_effects() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/request")
            .set_json(donation("r@x.com", "d@x.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "unauthorized access");
        assert_eq!(store.count(REQUESTS), 0);
    }

    #[actix_web::test]
    async fn test_tampered_token_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        let forged = SessionManager::new("someone-elses-secret", false)
            .issue(json!({ "email": "a@x.com" }).as_object().cloned().unwrap())
            .unwrap();
        let req = test::TestRequest::get()
            .uri("/users")
            .cookie(Cookie::new(SESSION_COOKIE, forged.token))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_issue_then_revoke_session() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/jwt")
            .set_json(json!({ "email": "a@x.com", "name": "Ayesha" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("cache-control").unwrap(), "no-store");

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.into_owned())
            .unwrap();
        assert_eq!(cookie.http_only(), Some(true));
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "success": true }));

        let req = test::TestRequest::get().uri("/users").cookie(cookie).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cleared = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.into_owned())
            .unwrap();
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.max_age(), Some(actix_web::cookie::time::Duration::ZERO));

        // A browser keeps nothing after an expired cookie; an echoed empty one fails too
        let req = test::TestRequest::get().uri("/users").cookie(cleared).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get().uri("/users").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_session_with_client_audience_is_usable() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/jwt")
            .set_json(json!({ "email": "a@x.com", "aud": "bloodaid" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.into_owned())
            .unwrap();

        let req = test::TestRequest::get().uri("/users").cookie(cookie).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_issue_requires_email() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/jwt")
            .set_json(json!({ "name": "anon" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp.response().cookies().next().is_none());
    }

    #[actix_web::test]
    async fn test_upserting_user_twice_keeps_latest_role() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        for role in ["donor", "admin"] {
            let req = test::TestRequest::put()
                .uri("/user")
                .set_json(json!({ "email": "a@x.com", "role": role }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
        assert_eq!(store.count(USERS), 1);

        let req = test::TestRequest::get()
            .uri("/user/a@x.com")
            .cookie(session_for("a@x.com"))
            .to_request();
        let user: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(user["role"], "admin");
        assert_eq!(user["email"], "a@x.com");
    }

    #[actix_web::test]
    async fn test_missing_user_is_null() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri("/user/nobody@x.com")
            .cookie(session_for("a@x.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, Value::Null);
    }

    #[actix_web::test]
    async fn test_update_role_acknowledges_match() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        let req = test::TestRequest::put()
            .uri("/user")
            .set_json(json!({ "email": "v@x.com", "role": "donor" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::patch()
            .uri("/users/update/v@x.com")
            .cookie(session_for("admin@x.com"))
            .set_json(json!({ "role": "volunteer" }))
            .to_request();
        let ack: WriteAck = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ack.matched_count, 1);
        assert_eq!(ack.modified_count, 1);

        let req = test::TestRequest::patch()
            .uri("/users/update/v@x.com")
            .cookie(session_for("admin@x.com"))
            .set_json(json!({ "role": "overlord" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_request_lifecycle() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);
        let cookie = session_for("r@x.com");

        let req = test::TestRequest::post()
            .uri("/request")
            .cookie(cookie.clone())
            .set_json(donation("r@x.com", "d@x.com"))
            .to_request();
        let ack: InsertAck = test::call_and_read_body_json(&app, req).await;
        assert!(ack.acknowledged);

        let req = test::TestRequest::patch()
            .uri(&format!("/donation/update/{}", ack.inserted_id))
            .cookie(cookie.clone())
            .set_json(json!({
                "status": "done",
                "userInfo": { "donorName": "Donor", "donorEmail": "d@x.com" },
            }))
            .to_request();
        let update: WriteAck = test::call_and_read_body_json(&app, req).await;
        assert_eq!(update.matched_count, 1);

        let req = test::TestRequest::get()
            .uri(&format!("/request/{}", ack.inserted_id))
            .cookie(cookie)
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;

        let mut expected = donation("r@x.com", "d@x.com");
        expected["_id"] = json!(ack.inserted_id);
        expected["status"] = json!("done");
        assert_eq!(fetched, expected);
    }

    #[actix_web::test]
    async fn test_donation_update_rejects_unknown_status_and_fields() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);
        let id = mongodb::bson::oid::ObjectId::new().to_hex();

        for body in [
            json!({ "status": "lost", "userInfo": {} }),
            json!({ "status": "done", "userInfo": {}, "hospital": "x" }),
            json!({ "status": "done" }),
        ] {
            let req = test::TestRequest::patch()
                .uri(&format!("/donation/update/{}", id))
                .cookie(session_for("r@x.com"))
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn test_malformed_identifier_is_bad_request() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri("/request/not-an-object-id")
            .cookie(session_for("r@x.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["field"], "id");
    }

    #[actix_web::test]
    async fn test_my_donation_returns_only_own_records() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        for (requester, donor) in [("r1@x.com", "d@x.com"), ("r2@x.com", "e@x.com"), ("r3@x.com", "d@x.com")] {
            let req = test::TestRequest::post()
                .uri("/request")
                .cookie(session_for(requester))
                .set_json(donation(requester, donor))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri("/my-donation/d@x.com")
            .cookie(session_for("d@x.com"))
            .to_request();
        let mine: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r["userInfo"]["donorEmail"] == "d@x.com"));

        let req = test::TestRequest::get()
            .uri("/my-requests/r2@x.com")
            .cookie(session_for("r2@x.com"))
            .to_request();
        let requested: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(requested.len(), 1);

        let req = test::TestRequest::get()
            .uri("/my-donation/d@x.com")
            .cookie(session_for("e@x.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get().uri("/all-requests").to_request();
        let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 3);
    }

    #[actix_web::test]
    async fn test_blog_create_update_list() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);
        let cookie = session_for("admin@x.com");

        let req = test::TestRequest::put()
            .uri("/add-blog")
            .cookie(cookie.clone())
            .set_json(json!({ "title": "Donate today", "status": "draft" }))
            .to_request();
        let ack: InsertAck = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/blog/update/{}", ack.inserted_id))
            .cookie(cookie)
            .set_json(json!({ "status": "published" }))
            .to_request();
        let update: WriteAck = test::call_and_read_body_json(&app, req).await;
        assert_eq!(update.modified_count, 1);

        let req = test::TestRequest::get().uri("/all-blogs").to_request();
        let blogs: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0]["title"], "Donate today");
        assert_eq!(blogs[0]["status"], "published");
    }

    #[actix_web::test]
    async fn test_operator_keys_are_rejected() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app!(store);

        let req = test::TestRequest::put()
            .uri("/user")
            .set_json(json!({ "email": "a@x.com", "$inc": { "credits": 1 } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.count(USERS), 0);
    }

    #[actix_web::test]
    async fn test_database_failure_is_server_error() {
        let store = Arc::new(MemoryStore::offline());
        let app = test_app!(store);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/all-blogs").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "internal server error");
    }

    #[actix_web::test]
    async fn test_health_reports_database_state() {
        let up = Arc::new(MemoryStore::new());
        let app = test_app!(up);
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "up");

        let down = Arc::new(MemoryStore::offline());
        let app = test_app!(down);
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["database"], "down");
    }

    #[actix_web::test]
    async fn test_cors_preflight_allows_listed_origin() {
        let store = Arc::new(MemoryStore::new());
        let origins = vec!["http://localhost:5173".to_string()];
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(store.clone() as Arc<dyn DocumentStore>))
                .app_data(web::Data::new(SessionManager::new(SECRET, false)))
                .wrap(crate::middleware::cors(&origins))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/request")
            .insert_header(("Origin", "http://localhost:5173"))
            .insert_header(("Access-Control-Request-Method", "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(resp.headers().get("access-control-allow-credentials").unwrap(), "true");
    }
}
