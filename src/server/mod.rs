use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::ingest::StandingsSource;
use crate::presenter::{render_html, render_message, to_json, to_relay};
use crate::refresh::Board;
use crate::standings::RelayPayload;

#[derive(Clone)]
pub struct AppState {
    pub board: Board,
    /// Source scraped live on every /relay request
    pub relay_source: Arc<dyn StandingsSource>,
    pub relay_cache_secs: u64,
    /// Board page reload period
    pub refresh_interval_secs: u64,
}

/// Build the Axum router for the board and the relay.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .max_age(Duration::from_secs(86400));

    Router::new()
        .route("/", get(index_handler))
        .route("/api/standings", get(standings_handler))
        .route("/relay", get(relay_handler))
        .route("/healthz", get(|| async { "ok" }))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serve the board page with the current rows (or fallback message) baked in.
async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snap = state.board.snapshot().await;

    let body = match (&snap.message, &snap.updated) {
        (Some(message), _) => render_message(message),
        (None, None) => render_message("Loading standings…"),
        (None, Some(_)) => render_html(&snap.rows),
    };

    let html = BOARD_HTML
        .replace("{{REFRESH_SECS}}", &state.refresh_interval_secs.to_string())
        .replace("{{UPDATED}}", snap.updated.as_deref().unwrap_or_default())
        .replace("{{ROWS}}", &body);
    Html(html)
}

/// GET /api/standings: last successfully ranked standings
async fn standings_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snap = state.board.snapshot().await;
    Json(to_json(&snap.standings))
}

/// GET /relay: scrape the standings page now and return it as JSON
async fn relay_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.relay_source.fetch_standings().await {
        Ok(standings) => {
            info!("Relay served {} standings rows", standings.len());
            let payload = RelayPayload {
                standings: to_relay(&standings),
            };
            (
                [(
                    header::CACHE_CONTROL,
                    format!("public, max-age={}", state.relay_cache_secs),
                )],
                Json(payload),
            )
                .into_response()
        }
        Err(e) => {
            error!("Relay scrape failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": e.to_string(),
                    "timestamp": Utc::now().to_rfc3339(),
                })),
            )
                .into_response()
        }
    }
}

/// Board page shell. Placeholders are filled in by `index_handler`.
const BOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<meta http-equiv="refresh" content="{{REFRESH_SECS}}">
<title>Conference Standings</title>
<style>
  :root { --bg: #0f1117; --card: #1a1d27; --border: #2a2d3a; --accent: #c5050c; --text: #e0e0e0; --muted: #8888aa; }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; padding: 1.5rem 2rem; }
  header { display: flex; align-items: baseline; gap: 1rem; margin-bottom: 1rem; }
  header h1 { font-size: 1.6rem; font-weight: 700; }
  #timestamp { margin-left: auto; color: var(--muted); font-size: .85rem; }
  .head, .row { display: grid; grid-template-columns: 3rem 1fr 5rem 5rem; align-items: center; padding: .55rem 1rem; }
  .head { color: var(--muted); font-size: .75rem; text-transform: uppercase; border-bottom: 1px solid var(--border); }
  .row { background: var(--card); border-bottom: 1px solid var(--border); font-size: 1.2rem; }
  .row.priority { background: var(--accent); color: #fff; font-weight: 700; }
  .team-cell { display: flex; align-items: center; gap: .5rem; }
  .ap-rank { font-size: .8rem; color: var(--muted); min-width: 1.4rem; text-align: right; }
  .row.priority .ap-rank { color: #fff; }
  .conf, .ovr { text-align: right; font-variant-numeric: tabular-nums; }
  .message { padding-top: 20px; font-size: 24px; opacity: 0.7; }
</style>
</head>
<body>
<header>
  <h1>Conference Standings</h1>
  <span id="timestamp">{{UPDATED}}</span>
</header>
<div class="head"><div>#</div><div>Team</div><div class="conf">Conf</div><div class="ovr">Ovr</div></div>
<div id="table">
{{ROWS}}
</div>
</body>
</html>"#;
