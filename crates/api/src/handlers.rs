//! API request handlers

use crate::{AppState, SharedState};
use axum::{
    extract::{Path, Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use ghcard_analyzer::{aggregate, synthetic_heatmap, synthetic_monthly_series, AnalyzerError};
use ghcard_card::{
    build_error_layout, build_layout, Canvas, ChartKind, LayoutError, LayoutOptions, RenderError,
    Theme, ERROR_CARD_MESSAGE,
};
use ghcard_collector::CollectorError;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

const CARD_CACHE_CONTROL: &str = "public, max-age=3600";

#[derive(Error, Debug)]
enum StatsError {
    #[error(transparent)]
    Collector(#[from] CollectorError),

    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl StatsError {
    /// Message shown to the caller
    fn public_message(&self) -> String {
        match self {
            StatsError::Collector(e) if e.is_not_found_like() => {
                "User not found or API limit reached".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    theme: Option<String>,
    chart: Option<String>,
    heatmap: Option<String>,
    footer: Option<String>,
}

/// Lenient boolean query flag; unrecognized values fall back to `default`.
fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1" | "yes" | "on") => true,
        Some("false" | "0" | "no" | "off") => false,
        _ => default,
    }
}

/// Usage endpoint
pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "GitHub Stats Generator API",
        "usage": "/stats/{username}?theme=dark&chart=bars&heatmap=false&footer=true",
        "themes": Theme::ALL.iter().map(Theme::as_str).collect::<Vec<_>>(),
        "charts": ["bars", "area"],
    }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Render the stats card for a GitHub user
pub async fn get_stats(
    State(state): State<SharedState>,
    Path(username): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Response {
    match build_card(&state, &username, &query).await {
        Ok(png) => (
            [
                (CONTENT_TYPE, state.renderer.content_type()),
                (CACHE_CONTROL, CARD_CACHE_CONTROL),
            ],
            png,
        )
            .into_response(),
        Err(e) => {
            error!(username = %username, error = %e, "Failed to build stats card");
            error_response(&state, &e).await
        }
    }
}

async fn build_card(
    state: &AppState,
    username: &str,
    query: &StatsQuery,
) -> Result<Vec<u8>, StatsError> {
    let (user, repos) = state.collector.fetch_profile(username).await?;
    let stats = aggregate(&user, &repos)?;

    let (monthly, heatmap) = {
        let mut rng = rand::thread_rng();
        let monthly = synthetic_monthly_series(&mut rng);
        let heatmap = parse_flag(query.heatmap.as_deref(), false)
            .then(|| synthetic_heatmap(&mut rng));
        (monthly, heatmap)
    };

    let options = LayoutOptions {
        theme: Theme::parse(query.theme.as_deref()),
        chart: ChartKind::parse(query.chart.as_deref()),
        heatmap,
        footer: parse_flag(query.footer.as_deref(), true),
    };
    let layout = build_layout(&stats, &monthly, &options, Canvas::CARD)?;

    let renderer = state.renderer.clone();
    let png = tokio::task::spawn_blocking(move || renderer.render(&layout)).await??;

    info!(
        username = %stats.username,
        theme = %options.theme,
        bytes = png.len(),
        "Served stats card"
    );
    Ok(png)
}

async fn error_response(state: &AppState, err: &StatsError) -> Response {
    if state.error_image {
        let layout = build_error_layout(ERROR_CARD_MESSAGE, Canvas::ERROR);
        let renderer = state.renderer.clone();
        let rendered = tokio::task::spawn_blocking(move || renderer.render(&layout))
            .await
            .map_err(StatsError::from)
            .and_then(|png| png.map_err(StatsError::from));

        match rendered {
            Ok(png) => {
                return (
                    StatusCode::NOT_FOUND,
                    [(CONTENT_TYPE, state.renderer.content_type())],
                    png,
                )
                    .into_response()
            }
            Err(e) => error!(error = %e, "Failed to render error card"),
        }
    }

    (
        StatusCode::NOT_FOUND,
        format!("Error: {}", err.public_message()),
    )
        .into_response()
}
