#![doc = "The `tasktrack` library crate."]
#![doc = ""]
#![doc = "Storage, session authentication, request handlers and error handling for the"]
#![doc = "Tasktrack service. The binary (`main.rs`) builds the actix `App` from these parts."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;
