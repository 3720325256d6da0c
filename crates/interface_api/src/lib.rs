//! HTTP API Layer
//!
//! This crate provides the REST API for the claim triage system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: claim submission, claim queries, report retrieval,
//!   practitioner review, health probes
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! The claim lifecycle worker runs beside the router as a background task,
//! spawned by the server binary.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(store, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use infra_store::ClaimStore;

use crate::config::ApiConfig;
use crate::handlers::{claims, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ClaimStore>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `store` - The claim store shared with the lifecycle worker
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(store: Arc<ClaimStore>, config: ApiConfig) -> Router {
    let state = AppState { store, config };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim).get(claims::list_claims))
        .route("/uncertain", get(claims::list_uncertain_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id/reports/:filename", get(claims::get_report_file))
        .route(
            "/:id/practitioner-review",
            patch(claims::practitioner_review),
        );

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/claims", claims_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
