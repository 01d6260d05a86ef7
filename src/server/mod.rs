//! HTTP front end for the store.
//!
//! Routes:
//! - `/app`, `/assets`: static files; `/app` hits are counted
//! - `/api/healthz`, `/api/reset`
//! - `/api/chirps`, `/api/chirps/:id`
//! - `/api/users`, `/api/users/:id`
//! - `/admin/metrics`
//!
//! Store calls block, so handlers run them on tokio's blocking pool.

mod error;
pub mod routes;

pub use error::ApiError;

use crate::filter::ContentFilter;
use crate::store::Store;
use axum::http::Method;
use axum::routing::get;
use axum::{middleware, Router};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// The one store for the process.
    pub store: Arc<Store>,
    /// Applied to post bodies before they are stored.
    pub filter: Arc<ContentFilter>,
    hits: Arc<AtomicUsize>,
}

impl AppState {
    /// State around `store` with the default content filter.
    pub fn new(store: Arc<Store>) -> Self {
        Self::with_filter(store, ContentFilter::default())
    }

    /// State around `store` with a custom content filter.
    pub fn with_filter(store: Arc<Store>, filter: ContentFilter) -> Self {
        Self {
            store,
            filter: Arc::new(filter),
            hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Requests served from `/app` since start (or the last reset).
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn reset_hits(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("hits", &self.hits())
            .finish_non_exhaustive()
    }
}

/// Build the full router. Static files are served from `root`.
pub fn router(state: AppState, root: impl AsRef<Path>) -> Router {
    let root = root.as_ref();

    let app: Router<AppState> = Router::new()
        .nest_service("/app", ServeDir::new(root))
        .route_layer(middleware::from_fn_with_state(state.clone(), routes::count_hits));

    let api: Router<AppState> = Router::new()
        .route("/healthz", get(routes::readiness))
        .route("/reset", get(routes::reset_hits))
        .route("/chirps", get(routes::list_chirps).post(routes::create_chirp))
        .route("/chirps/:id", get(routes::get_chirp))
        .route("/users", get(routes::list_users).post(routes::create_user))
        .route("/users/:id", get(routes::get_user));

    let admin: Router<AppState> =
        Router::new().route("/metrics", get(routes::metrics));

    Router::new()
        .merge(app)
        .nest_service("/assets", ServeDir::new(root.join("assets")))
        .nest("/api", api)
        .nest("/admin", admin)
        .layer(cors())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}
