//! # Murmur Web
//!
//! HTTP front end for the Murmur board.
//!
//! ## Routes
//!
//! | Route         | Handler                    |
//! |---------------|----------------------------|
//! | `GET /`       | every thread, newest first |
//! | `GET /{id}/`  | one thread with replies    |
//! | `POST /post`  | new thread or reply        |
//! | `GET /assets` | static files               |
//!
//! Client identity comes from the `X-Forwarded-For` and `User-Agent`
//! headers, so the server is meant to run behind a reverse proxy that sets
//! the former.

pub mod config;
pub mod error;
pub mod handlers;
pub mod shutdown;
pub mod templates;

use std::path::Path;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use murmur::Board;
use murmur_store::Store;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub use config::Cli;
pub use error::AppError;
pub use shutdown::ShutdownSignal;

/// Build the application router around a shared board.
pub fn router<S: Store + 'static>(board: Arc<Board<S>>, assets_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(handlers::front_page::<S>))
        .route("/:id/", get(handlers::thread_page::<S>))
        .route("/post", post(handlers::submit::<S>))
        .nest_service("/assets", ServeDir::new(assets_dir.as_ref()))
        // Security headers to prevent common attacks
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(board)
}
