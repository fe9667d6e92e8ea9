pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
mod hourmin;
pub mod model;
pub mod render;
pub mod routes;
pub mod session;
pub mod shell;
pub mod shells;
pub mod tasks;
pub mod views;
pub mod web;

pub use api::ApiClient;
pub use config::Config;
pub use error::ApiError;
pub use session::Session;
