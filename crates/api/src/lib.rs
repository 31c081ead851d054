pub mod error;
pub mod routes;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/transcription/file",
            post(routes::transcription::transcribe_file),
        )
        .route(
            "/transcription/directory",
            post(routes::transcription::transcribe_directory),
        )
        .route("/transcript", get(routes::transcript::get_transcript))
        .route("/usage", get(routes::usage::get_usage));

    let health = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
