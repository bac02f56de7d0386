mod config;
mod error;
mod routes;
mod state;
mod token;

use std::sync::Arc;

use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use crate::routes::tasks::store::PgTaskStore;
use crate::token::HttpTokenVerifier;

#[tokio::main]
async fn main() {
    let config = config::Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let db = PgPool::connect(&config.database_url)
        .await
        .expect("Error connecting DB");

    sqlx::migrate!()
        .run(&db)
        .await
        .expect("Error running migrations");

    let state = state::AppState {
        store: Arc::new(PgTaskStore::new(db)),
        verifier: Arc::new(HttpTokenVerifier::new(config.token_service_url.clone())),
    };

    let app = routes::routes().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await.unwrap();

    tracing::info!("server is chilling at http://{}", config.addr());

    axum::serve(listener, app).await.unwrap();
}
