pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers the `/auth` and `/tasks` scopes. Mount under `/api`.
///
/// Malformed JSON bodies and non-numeric path ids become 400 responses in the
/// common `{success, message}` shape.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login)
                .service(auth::logout)
                .service(auth::me),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::update_task_completion)
                .service(tasks::delete_task),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::BadRequest("Invalid task ID".into()).into())
}
