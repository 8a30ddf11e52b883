//! Router, handlers and the serve loop.

use crate::error::WebError;
use crate::page::{PageContext, Templates};
use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use brandcast_common::BrandcastError;
use brandcast_engine::BrandEngine;
use brandcast_graphs::{data_uri, ChartRenderer, PngRenderer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<BrandEngine>,
    renderer: Arc<PngRenderer>,
    templates: Arc<Templates>,
}

impl AppState {
    pub fn new(engine: BrandEngine) -> Result<Self, WebError> {
        let renderer = PngRenderer::new(engine.config().chart.clone());
        Ok(Self {
            engine: Arc::new(engine),
            renderer: Arc::new(renderer),
            templates: Arc::new(Templates::new()?),
        })
    }

    pub fn engine(&self) -> &BrandEngine {
        &self.engine
    }
}

/// Submitted analysis form.
#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    pub brand: Option<String>,
    pub comp_brand: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub event_log_loaded: bool,
    pub brands: Vec<String>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(analyze))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let page = PageContext::form(state.engine.config());
    Ok(Html(state.templates.render(&page)?))
}

#[instrument(skip_all)]
async fn analyze(
    State(state): State<AppState>,
    Form(form): Form<AnalyzeForm>,
) -> Result<Html<String>, WebError> {
    let name = form
        .brand
        .filter(|b| !b.trim().is_empty())
        .ok_or_else(|| WebError::BadRequest("brand is required".to_string()))?;
    let config = state.engine.config();
    let brand = config.resolve_brand(&name)?;
    let competitor = config.resolve_competitor(form.comp_brand.as_deref())?;

    let engine = Arc::clone(&state.engine);
    let renderer = Arc::clone(&state.renderer);
    let (report, png) = tokio::task::spawn_blocking(move || {
        let report = engine.analyze(&brand, competitor.as_ref())?;
        let png = report
            .chart
            .as_ref()
            .map(|chart| renderer.render(chart))
            .transpose()?;
        Ok::<_, BrandcastError>((report, png))
    })
    .await??;

    let page = PageContext::from_report(config, &report, png.as_deref().map(data_uri));
    Ok(Html(state.templates.render(&page)?))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        event_log_loaded: state.engine.event_log_loaded(),
        brands: state.engine.config().brands.clone(),
    })
}

/// Binds the configured address and serves until Ctrl-C or SIGTERM.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = state.engine.config().web.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Brandcast dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Ctrl-C handler unavailable: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!("SIGTERM handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received, stopping server");
}
