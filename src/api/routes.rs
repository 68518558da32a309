use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{Method, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::AppState;
use crate::api::models::{FunctionSummary, SummarizeQuery, SummarizeRequest, SummarizeResponse};
use crate::error::{AppError, ErrorResponse, Result};
use crate::extractor;
use crate::fetcher;

const INDEX_HTML: &str = include_str!("index.html");

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/summarize",
            get(summarize_query)
                .post(summarize_body)
                .fallback(method_not_allowed),
        )
        // Answers every OPTIONS request itself with 200 plus the allow-origin,
        // allow-methods and allow-headers trio.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(app_state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Server variant: direct fetch, DOM extraction, full `{title, url, summary}`
/// body. Everything past a missing URL collapses to a generic 500; the cause
/// is logged here.
async fn summarize_query(
    State(state): State<AppState>,
    Query(params): Query<SummarizeQuery>,
) -> Response {
    let url = match params.url.filter(|u| !u.is_empty()) {
        Some(url) => url,
        None => return AppError::MissingUrl.into_response(),
    };

    info!(url = %url, "Summarizing URL");
    match summarize_page(&state, &url).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            error!(url = %url, error = %err, "Failed to summarize URL");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "An error occurred while processing the URL".to_string(),
                    details: None,
                }),
            )
                .into_response()
        }
    }
}

async fn summarize_page(state: &AppState, url: &str) -> Result<SummarizeResponse> {
    let parsed =
        url::Url::parse(url).map_err(|e| AppError::Fetch(format!("Invalid URL: {}", e)))?;

    let html = fetcher::fetch_html(url).await?;
    let article = extractor::extract_readable(&html, &parsed)?;
    if article.text.trim().is_empty() {
        return Err(AppError::Extract);
    }

    let summary = state.summarizer.summarize(&article.text).await?;
    Ok(SummarizeResponse {
        title: article.title,
        url: url.to_string(),
        summary,
    })
}

/// Function variant: proxy fetch, tag-stripping extraction, `{summary}` body.
/// Unfetchable content is the caller's fault (400); the rest is ours (500).
/// A missing or malformed JSON body counts as a missing URL so the error
/// body stays JSON.
async fn summarize_body(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    let url = match payload
        .ok()
        .and_then(|Json(req)| req.url)
        .filter(|u| !u.is_empty())
    {
        Some(url) => url,
        None => return AppError::MissingUrl.into_response(),
    };

    info!(url = %url, "Summarizing URL via proxy");
    match summarize_proxied(&state, &url).await {
        Ok(summary) => (StatusCode::OK, Json(FunctionSummary { summary })).into_response(),
        Err(err) => {
            error!(url = %url, error = %err, "Failed to summarize URL via proxy");
            err.into_response()
        }
    }
}

async fn summarize_proxied(state: &AppState, url: &str) -> Result<String> {
    let html = fetcher::fetch_via_proxy(&state.config.proxy_base_url, url).await?;
    let article = extractor::strip_tags(&html);
    if article.text.trim().is_empty() {
        return Err(AppError::Extract);
    }

    state.summarizer.summarize(&article.text).await
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
            details: None,
        }),
    )
        .into_response()
}
