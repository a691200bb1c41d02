use std::fmt::Write as _;

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use named_colors_shared::ColorFilter;
use named_colors_shared::catalog::parse_tag_query;
use serde::Deserialize;

use crate::config::{CATALOG_CACHE_CONTROL, FILTERED_CACHE_CONTROL};
use crate::state::{AppState, ObservabilitySnapshot};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
const MISSING_KEYWORD: &str = "Missing keyword";
const COLOR_NOT_FOUND: &str = "Color not found";

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "colors": state.catalog.len(),
        "observability": {
            "color_requests_total": observability.color_requests_total,
            "neighbor_requests_total": observability.neighbor_requests_total,
            "not_found_total": observability.not_found_total,
            "bad_requests_total": observability.bad_requests_total,
            "not_modified_total": observability.not_modified_total,
        }
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ColorsQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    tags: Option<String>,
}

impl ColorsQuery {
    fn filter(&self) -> Option<ColorFilter> {
        let search = self.search.as_deref().unwrap_or_default();
        let tags = self.tags.as_deref().map(parse_tag_query).unwrap_or_default();
        let filter = ColorFilter::new(search, tags);
        if filter.search().is_empty() && filter.active_tags().is_empty() {
            None
        } else {
            Some(filter)
        }
    }
}

/// Whole catalog from the pre-serialized payload, or the subset matching `search`/`tags`.
pub async fn get_colors(
    State(state): State<AppState>,
    Query(query): Query<ColorsQuery>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    state.observability.record_color_request();

    if let Some(filter) = query.filter() {
        let matches = state.catalog.filter(&filter);
        let body = serde_json::to_vec(&matches).map_err(|e| {
            tracing::error!(error = %e, "failed to serialize filtered colors");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        return Ok(json_bytes_response(
            Bytes::from(body),
            FILTERED_CACHE_CONTROL,
            None,
        ));
    }

    let etag = state.payloads.colors_etag.as_str();
    if if_none_match_matches(&headers, etag) {
        state.observability.record_not_modified();
        return Ok(not_modified_response(CATALOG_CACHE_CONTROL, Some(etag)));
    }

    Ok(json_bytes_response(
        state.payloads.colors_json.clone(),
        CATALOG_CACHE_CONTROL,
        Some(etag),
    ))
}

pub async fn get_color(State(state): State<AppState>, Path(keyword): Path<String>) -> Response {
    state.observability.record_color_request();
    let keyword = match normalize_keyword(&keyword) {
        Ok(keyword) => keyword,
        Err(status) => {
            state.observability.record_bad_request();
            return error_response(status, MISSING_KEYWORD);
        }
    };

    match state.catalog.get(keyword) {
        Some(color) => {
            let mut response = Json(color).into_response();
            response.headers_mut().insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static(CATALOG_CACHE_CONTROL),
            );
            response
        }
        None => {
            state.observability.record_not_found();
            error_response(StatusCode::NOT_FOUND, COLOR_NOT_FOUND)
        }
    }
}

/// Nearest colors around `keyword` on each axis, served from the startup cache.
pub async fn get_neighbors(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Response {
    state.observability.record_neighbor_request();
    let keyword = match normalize_keyword(&keyword) {
        Ok(keyword) => keyword,
        Err(status) => {
            state.observability.record_bad_request();
            return error_response(status, MISSING_KEYWORD);
        }
    };

    match state.payloads.neighbors_json.get(keyword) {
        Some(json) => json_bytes_response(json.clone(), CATALOG_CACHE_CONTROL, None),
        None => {
            tracing::debug!(keyword, "neighbor lookup for unknown color");
            state.observability.record_not_found();
            error_response(StatusCode::NOT_FOUND, COLOR_NOT_FOUND)
        }
    }
}

pub async fn get_tags(State(state): State<AppState>) -> Response {
    json_bytes_response(
        state.payloads.tags_json.clone(),
        CATALOG_CACHE_CONTROL,
        None,
    )
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = render_prometheus_metrics(state.catalog.len(), state.observability.snapshot());

    (
        [
            (header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
}

fn render_prometheus_metrics(catalog_size: usize, observability: ObservabilitySnapshot) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "# HELP named_colors_catalog_size Number of colors in the loaded catalog."
    );
    let _ = writeln!(body, "# TYPE named_colors_catalog_size gauge");
    let _ = writeln!(body, "named_colors_catalog_size {catalog_size}");

    let counters = [
        (
            "named_colors_color_requests_total",
            "Total catalog and single-color API requests.",
            observability.color_requests_total,
        ),
        (
            "named_colors_neighbor_requests_total",
            "Total neighbor report API requests.",
            observability.neighbor_requests_total,
        ),
        (
            "named_colors_not_found_total",
            "Total lookups for keywords absent from the catalog.",
            observability.not_found_total,
        ),
        (
            "named_colors_bad_requests_total",
            "Total lookups rejected for a missing keyword.",
            observability.bad_requests_total,
        ),
        (
            "named_colors_not_modified_total",
            "Total catalog requests answered with 304 Not Modified.",
            observability.not_modified_total,
        ),
    ];
    for (name, help, value) in counters {
        let _ = writeln!(body, "# HELP {name} {help}");
        let _ = writeln!(body, "# TYPE {name} counter");
        let _ = writeln!(body, "{name} {value}");
    }

    body
}

fn normalize_keyword(keyword: &str) -> Result<&str, StatusCode> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(trimmed)
}

fn error_response(status: StatusCode, message: &'static str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn json_bytes_response(body: Bytes, cache_control: &'static str, etag: Option<&str>) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Some(etag) = etag
        && let Ok(etag_header) = HeaderValue::from_str(etag)
    {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

fn not_modified_response(cache_control: &'static str, etag: Option<&str>) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Some(etag) = etag
        && let Ok(etag_header) = HeaderValue::from_str(etag)
    {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

fn normalize_etag(candidate: &str) -> &str {
    candidate.strip_prefix("W/").unwrap_or(candidate).trim()
}

fn if_none_match_matches(headers: &HeaderMap, etag: &str) -> bool {
    let Some(value) = headers.get(header::IF_NONE_MATCH) else {
        return false;
    };
    let Ok(raw) = value.to_str() else {
        return false;
    };

    raw.split(',').any(|candidate| {
        let candidate = candidate.trim();
        candidate == "*" || normalize_etag(candidate) == normalize_etag(etag)
    })
}
