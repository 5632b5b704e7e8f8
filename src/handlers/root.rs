//! Root endpoint handler for the landing page.
//!
//! This module provides the `/` endpoint handler that displays a landing
//! page with all available endpoints and descriptions.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use tracing::{debug, instrument};

use crate::state::SharedState;

/// Handler for the root `/` endpoint.
#[instrument(skip(state))]
pub async fn root_handler(State(state): State<SharedState>) -> impl IntoResponse {
    debug!("Processing / request");

    let version = env!("CARGO_PKG_VERSION");

    let uptime_secs = state.start_time.elapsed().as_secs();
    let hours = uptime_secs / 3600;
    let minutes = (uptime_secs % 3600) / 60;
    let seconds = uptime_secs % 60;
    let uptime_str = format!("{}h {}m {}s", hours, minutes, seconds);

    let es_url = state
        .config
        .elasticsearch_url
        .as_deref()
        .unwrap_or("unknown")
        .to_string();

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Elasticsearch Prometheus Exporter</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
            background: #f5f5f5;
            line-height: 1.6;
        }}
        .container {{
            max-width: 700px;
            margin: 0 auto;
            background: white;
            padding: 40px;
            border-radius: 8px;
            box-shadow: 0 2px 8px rgba(0,0,0,0.1);
        }}
        h1 {{
            color: #333;
            border-bottom: 3px solid #007bff;
            padding-bottom: 15px;
        }}
        .info {{
            background: #e9ecef;
            padding: 15px;
            border-radius: 4px;
            margin: 20px 0;
        }}
        .endpoint-list {{
            list-style: none;
            padding: 0;
        }}
        .endpoint-list li {{
            margin: 15px 0;
            padding: 15px;
            background: #f8f9fa;
            border-left: 4px solid #007bff;
            border-radius: 4px;
        }}
        .endpoint-list a {{
            color: #007bff;
            text-decoration: none;
            font-weight: 600;
        }}
    </style>
</head>
<body>
<div class="container">
    <h1>Elasticsearch Prometheus Exporter</h1>

    <div class="info">
        Version {version} &middot; Uptime {uptime} &middot; Scraping {es_url}
    </div>

    <ul class="endpoint-list">
        <li>
            <a href="/metrics">/metrics</a>
            <div>Prometheus-compatible metrics endpoint (text format / OpenMetrics)</div>
        </li>
        <li>
            <a href="/health">/health</a>
            <div>Readiness check against the backing cluster</div>
        </li>
        <li>
            <a href="/config">/config</a>
            <div>Effective runtime configuration (read-only)</div>
        </li>
    </ul>
</div>
</body>
</html>"#,
        version = version,
        uptime = uptime_str,
        es_url = es_url
    );

    Html(html)
}
