use axum::{
    routing::{get, put},
    Router,
};
use tower_http::cors::CorsLayer;

mod health;
pub mod tasks;

pub use health::health;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let task_router = Router::new()
        .route("/", get(tasks::routes::list).post(tasks::routes::create))
        .route(
            "/{id}",
            put(tasks::routes::update).delete(tasks::routes::delete),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/tasks", task_router)
        .layer(CorsLayer::permissive())
}

async fn root() -> &'static str {
    "Welcome to the task scheduling API"
}
