//! HTTP surface for the sous agents.
//!
//! [`app`] builds the Axum router over a [`ServerState`]. The binary wires a
//! Gemini-backed caller into it; tests can inject any [`AgentCaller`].

mod dto;
mod error;
mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use sous_core::ModelConfig;
use sous_engine::AgentCaller;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use dto::{RecipeDetailsRequest, RecipeSearchRequest, ResultResponse, TranslateRequest};
pub use error::AppError;

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub caller: Arc<dyn AgentCaller>,
    pub model: ModelConfig,
}

impl ServerState {
    pub fn new(caller: Arc<dyn AgentCaller>, model: ModelConfig) -> Self {
        Self { caller, model }
    }
}

/// Builds the router with tracing on the task routes and permissive CORS.
pub fn app(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/translate", post(handlers::translate::translate))
        .route("/search-recipes", post(handlers::recipes::search))
        .route("/give-recipe", post(handlers::recipes::give_recipe))
        .route("/drink-recommendations", post(handlers::recipes::drinks))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
