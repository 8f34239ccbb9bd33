//! API layer - HTTP handlers and middleware
//!
//! Handlers answer reads with JSON page contexts and successful writes with
//! `303 See Other` redirects.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
