#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::json;
use tasktrack::auth::{AuthResponse, SESSION_COOKIE};
use tasktrack::config::Config;
use tasktrack::db::Database;
use tasktrack::routes::{self, health};
use tasktrack::AppState;

pub async fn test_state() -> web::Data<AppState> {
    let db = Database::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    web::Data::new(AppState::new(db, &Config::default()))
}

/// The application as `main` assembles it, minus CORS.
pub async fn test_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config)),
    )
    .await
}

pub struct TestUser {
    pub id: i64,
    pub token: String,
    pub cookie: Cookie<'static>,
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

pub async fn register_user(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> TestUser {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": password
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(
        resp.status().is_success(),
        "Failed to register {}: {}",
        username,
        resp.status()
    );

    let cookie = session_cookie(&resp).expect("register must set the session cookie");
    let body: AuthResponse = test::read_body_json(resp).await;

    TestUser {
        id: body.user.expect("register returns the user").id,
        token: body.token.expect("register returns the token"),
        cookie,
    }
}
