use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower::{ServiceBuilder, ServiceExt};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::middleware::admin_guard;
use crate::state::AppState;

/// Full application: proxy endpoints, guarded dashboard assets, global layers.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Public
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(rate_routes())
        // Session-gated proxies
        .merge(booking_routes())
        .merge(payment_routes())
        // Dashboard pages and assets; unknown API paths answer in JSON
        .fallback(fallback)
        // Global middleware, outermost first
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(middleware::from_fn(admin_guard)),
        )
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/logout", post(auth::logout))
}

fn booking_routes() -> Router<AppState> {
    use handlers::bookings;

    Router::new()
        .route("/api/bookings", get(bookings::list_bookings))
        // An empty id still reaches the handler so it can answer 400
        .route("/api/bookings/", get(bookings::booking_detail))
        .route("/api/bookings/:booking_id", get(bookings::booking_detail))
}

fn payment_routes() -> Router<AppState> {
    Router::new().route("/api/payments", get(handlers::payments::list_payments))
}

fn rate_routes() -> Router<AppState> {
    Router::new().route("/api/exchange-rate", get(handlers::exchange_rate::exchange_rate))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn fallback(State(state): State<AppState>, request: Request) -> Response {
    let path = request.uri().path();
    if path == "/api" || path.starts_with("/api/") {
        return ApiError::not_found("Not found").into_response();
    }

    let assets = ServeDir::new(&state.config.server.assets_dir).append_index_html_on_directories(true);
    match assets.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}
