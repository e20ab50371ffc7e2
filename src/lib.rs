//! Campus Sentinel
//!
//! Backend for the campus security dashboard: merges per-entity activity
//! from five record sources into one timeline and predicts where an entity
//! is likely to be next.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CAMPUS SENTINEL                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  API      │  │  Auth     │  │  Timeline Aggregator    │ │
//! │  │  (Axum)   │  │  (JWT)    │  │  Activity Predictor     │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │                ┌─────────────┐                             │
//! │                │ PostgreSQL  │                             │
//! │                └─────────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod predictor;
pub mod timeline;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use predictor::CampusPredictor;
use timeline::{PgCampusRecords, TimelineAggregator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub config: config::Config,
    pub predictor: Arc<CampusPredictor>,
}

impl AppState {
    pub fn new(pool: sqlx::PgPool, config: config::Config) -> Self {
        let predictor = CampusPredictor::default().with_campus_offset(config.campus_offset());

        Self {
            pool,
            config,
            predictor: Arc::new(predictor),
        }
    }

    /// Timeline aggregator over the shared pool
    pub fn timeline(&self) -> TimelineAggregator<PgCampusRecords> {
        TimelineAggregator::new(PgCampusRecords::new(self.pool.clone()))
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/health/ready", get(handlers::health::ready));

    // Dashboard routes (user JWT auth)
    let api_routes = Router::new()
        .route("/api/v1/dashboard/summary", get(handlers::dashboard::summary))

        // Profiles
        .route("/api/v1/profiles/:entity_id", get(handlers::profiles::get))
        .route("/api/v1/search", get(handlers::profiles::search))

        // Alerts
        .route("/api/v1/alerts", get(handlers::alerts::list))

        // Timeline
        .route("/api/v1/entities/:entity_id/timeline", get(handlers::timeline::get))

        // Predictions
        .route("/api/v1/predict", post(handlers::predict::predict_entity))
        .route("/api/v1/predict/activity", post(handlers::predict::predict_activity))

        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_user_auth
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(auth_enabled: bool) -> Router {
        let config = config::Config::for_tests(auth_enabled);
        let pool = db::lazy_pool(&config.database_url);
        create_router(AppState::new(pool, config))
    }

    fn token(secret: &str) -> String {
        let claims = json!({
            "sub": "user-1",
            "aud": "authenticated",
            "role": "authenticated",
            "exp": chrono::Utc::now().timestamp() + 3600,
        });
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(t) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app(true).oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "campus-sentinel");
    }

    #[tokio::test]
    async fn test_api_requires_token() {
        let response = app(true).oneshot(get_req("/api/v1/alerts")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bad = Request::builder()
            .uri("/api/v1/entities/e1/timeline")
            .header(header::AUTHORIZATION, format!("Bearer {}", token("wrong-secret")))
            .body(Body::empty())
            .unwrap();
        let response = app(true).oneshot(bad).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Invalid token");
    }

    #[tokio::test]
    async fn test_query_validation() {
        for uri in [
            "/api/v1/alerts?hours=0",
            "/api/v1/alerts?hours=500",
            "/api/v1/search?q=",
            "/api/v1/entities/e1/timeline?limit=0",
            "/api/v1/entities/e1/timeline?from=2024-01-02T10:00:00Z&to=2024-01-01T10:00:00Z",
        ] {
            let response = app(false).oneshot(get_req(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_predict_activity_with_token() {
        let body = json!({
            "entity_id": "e1",
            "entity_type": "staff",
            "current_time": "2024-01-02T08:00:00Z",
            "historical_activities": []
        });

        let response = app(true)
            .oneshot(post_json("/api/v1/predict/activity", body, Some(&token("test-secret"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let out = body_json(response).await;
        assert_eq!(out["predicted_location"], "Office Building");
        assert_eq!(out["predicted_activity"], "swipe");
        assert_eq!(out["confidence"], 0.5);
    }

    #[tokio::test]
    async fn test_predict_activity_accepts_unknown_entity_type() {
        let body = json!({
            "entity_id": "e1",
            "entity_type": "alumni",
            "current_time": "2024-01-02T08:00:00Z"
        });

        let response = app(false)
            .oneshot(post_json("/api/v1/predict/activity", body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["predicted_location"], "Main Library");
    }

    #[tokio::test]
    async fn test_predict_requires_entity_id() {
        let response = app(false)
            .oneshot(post_json("/api/v1/predict", json!({ "entity_id": "  " }), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
