//! Route configuration and setup.

use crate::api_doc;
use crate::handlers;
use crate::middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header::CACHE_CONTROL, HeaderName, HeaderValue, Method, Request, Response},
    routing::{get, post},
    Json, Router,
};
use bistro_core::{
    constants::{PUBLIC_ASSET_MAX_AGE_SECS, UPLOADS_URL_PREFIX},
    Config,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{fs::ServeFileSystemResponseBody, ServeDir};
use tower_http::set_header::SetResponseHeader;
use tower_http::trace::TraceLayer;
use utoipa_rapidoc::RapiDoc;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    let public_cache_control =
        HeaderValue::from_str(&format!("public, max-age={}", PUBLIC_ASSET_MAX_AGE_SECS))?;
    // Misses fall through as 404 and must not be cached.
    let public_assets = SetResponseHeader::overriding(
        ServeDir::new(&config.public_dir),
        CACHE_CONTROL,
        move |response: &Response<ServeFileSystemResponseBody>| {
            response
                .status()
                .is_success()
                .then(|| public_cache_control.clone())
        },
    );

    let app = Router::new()
        .route(
            "/api/business",
            post(handlers::business::register_business),
        )
        .route("/menu", get(handlers::menu::get_menu))
        .route("/live", get(handlers::health::liveness_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(api_doc::get_openapi_spec()) }),
        )
        .merge(RapiDoc::new("/api/openapi.json").path("/docs"))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&config.uploads_dir))
        .fallback_service(public_assets)
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new().allow_origin(origins)
    };

    Ok(cors
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([request_id]))
}
