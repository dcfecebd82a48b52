pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use db::DbPool;
use tower_http::services::{ServeDir, ServeFile};

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub jwt_secret: Arc<String>,
    pub base_path: Arc<String>,
    pub static_dir: Option<Arc<PathBuf>>,
}

pub fn create_app(state: AppState) -> Router {
    let base_path = state.base_path.clone();
    let static_dir = state.static_dir.clone();

    let mut app_routes = Router::new()
        .route("/api/signup", post(handlers::auth::signup))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/protected", get(handlers::auth::protected))
        .route("/api/todos", get(handlers::api::list_all_todos))
        .route("/api/todos", post(handlers::api::create_new_todo))
        .route("/api/todos/{id}", get(handlers::api::get_single_todo))
        .route("/api/todos/{id}", put(handlers::api::update_existing_todo))
        .route(
            "/api/todos/{id}",
            delete(handlers::api::delete_existing_todo),
        )
        .route(
            "/api/todos/complete/{id}",
            put(handlers::api::complete_existing_todo),
        )
        .route("/api/complete", get(handlers::api::list_all_completed))
        .route(
            "/api/complete/{id}",
            delete(handlers::api::delete_existing_completed),
        );

    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir.display(), "serving static frontend");
        let index = ServeFile::new(dir.join("index.html"));
        app_routes = app_routes.fallback_service(ServeDir::new(dir.as_path()).fallback(index));
    }

    let app_routes = app_routes
        .layer(
            tower::ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(tower_http::cors::CorsLayer::permissive())
                .layer(tower_http::compression::CompressionLayer::new()),
        )
        .with_state(state);

    tracing::info!("base_path: {base_path:?}");

    if base_path.is_empty() {
        app_routes
    } else {
        Router::new().nest(&*base_path, app_routes)
    }
}
