//! Dashboard HTTP Boundary
//!
//! Thin axum layer the presentation client polls. Each route invokes one
//! adapter and returns its payload as-is; failures become a generic
//! `{"error": ...}` body with status 500 and the cause goes to the log.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::application::Dashboard;
use crate::ports::FetchError;

/// Build the route table over a shared dashboard
pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/api/alpha", get(alpha))
        .route("/api/ammo", get(ammo))
        .route("/api/gear", get(gear))
        .route("/api/spot", get(spot_default))
        .route("/api/spot/:asset", get(spot))
        .route("/api/snapshot/:name", get(snapshot))
        .route("/live", get(liveness))
        .with_state(dashboard)
}

/// Axum-based dashboard server
pub struct DashboardServer {
    dashboard: Arc<Dashboard>,
    bind_addr: String,
}

impl DashboardServer {
    pub fn new(dashboard: Arc<Dashboard>, bind_addr: impl Into<String>) -> Self {
        Self {
            dashboard,
            bind_addr: bind_addr.into(),
        }
    }

    /// Serve until `shutdown` resolves
    #[instrument(skip(self, shutdown), fields(addr = %self.bind_addr))]
    pub async fn run<S>(self, shutdown: S) -> anyhow::Result<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let app = router(Arc::clone(&self.dashboard));
        let listener = tokio::net::TcpListener::bind(&self.bind_addr).await?;

        info!(address = %self.bind_addr, "Dashboard server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Dashboard server stopped");
        Ok(())
    }
}

fn respond<T: Serialize>(result: Result<T, FetchError>, message: &'static str) -> Response {
    match result {
        Ok(payload) => Json(payload).into_response(),
        Err(e) => {
            warn!(source = %e.source_name, error = %e.cause, "Request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
        }
    }
}

async fn alpha(State(dashboard): State<Arc<Dashboard>>) -> Response {
    respond(dashboard.alpha().await, "Failed to scan for alpha")
}

async fn ammo(State(dashboard): State<Arc<Dashboard>>) -> Response {
    Json(dashboard.ammo().await).into_response()
}

async fn gear(State(dashboard): State<Arc<Dashboard>>) -> Response {
    respond(dashboard.gear().await, "Failed to scan gear market")
}

async fn spot_default(State(dashboard): State<Arc<Dashboard>>) -> Response {
    respond(dashboard.spot(None).await, "Failed to fetch spot price")
}

async fn spot(State(dashboard): State<Arc<Dashboard>>, Path(asset): Path<String>) -> Response {
    respond(dashboard.spot(Some(&asset)).await, "Failed to fetch spot price")
}

async fn snapshot(State(dashboard): State<Arc<Dashboard>>, Path(name): Path<String>) -> Response {
    Json(dashboard.snapshot(&name).await).into_response()
}

async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
