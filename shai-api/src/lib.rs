pub mod error;
pub mod routes;
pub mod scope;

use std::path::Path;

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::routing::{delete, get, post};
use shai_core::Data;
use tower_http::services::ServeDir;
use tracing::info;

pub struct RouteMeta {
    pub method: &'static str,
    pub path: &'static str,
    pub desc: &'static str,
}

pub const ROUTES: &[RouteMeta] = &[
    routes::health::META,
    routes::generate::META,
    routes::agree::META,
    routes::tokens::META,
    routes::history::LIST_META,
    routes::history::CLEAR_META,
    routes::history::REMOVE_META,
];

/// Build the HTTP router. Unmatched paths are served from `web_dir` when
/// given. Anything still unmatched gets a JSON 404.
pub fn router(data: Data, web_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route(routes::health::META.path, get(routes::health::health))
        .route(routes::generate::META.path, post(routes::generate::generate))
        .route(routes::agree::META.path, post(routes::agree::agree))
        .route(routes::tokens::META.path, get(routes::tokens::tokens))
        .route(
            routes::history::LIST_META.path,
            get(routes::history::list_history).delete(routes::history::clear_history),
        )
        .route(
            routes::history::REMOVE_META.path,
            delete(routes::history::remove_history),
        );

    let router = match web_dir {
        Some(dir) => {
            info!(web_dir = %dir.display(), "serving static files");
            router.fallback_service(
                ServeDir::new(dir).not_found_service(routes::not_found.into_service()),
            )
        }
        None => router.fallback(routes::not_found),
    };

    router.with_state(data)
}
