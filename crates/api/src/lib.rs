//! Credit Risk API Server
//!
//! REST API serving the applicant form schema and credit risk assessments.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use risk_assessment::AssessmentContext;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod config;
mod error;
pub mod rate_limit;
pub mod routes;

pub use config::{load_config, AppConfig, LoggingConfig, ServerConfig};
pub use error::{ApiError, ErrorResponse};
pub use rate_limit::RateLimitConfig;

/// Application state shared across handlers
pub struct AppState {
    /// Loaded artifacts and validation rules
    pub context: AssessmentContext,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Completed assessments since startup
    pub assessments: AtomicU64,
    /// Prometheus handle, absent when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(context: AssessmentContext, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            context,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            assessments: AtomicU64::new(0),
            metrics,
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelStatus,
    pub assessment_count: u64,
}

/// Loaded model
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub name: String,
    pub path: String,
}

/// Create the application router
pub fn create_router(
    state: Arc<AppState>,
    rate_limit: &RateLimitConfig,
) -> Result<Router, ApiError> {
    let mut submissions = Router::new().route(
        "/api/v1/assessments",
        post(routes::assessments::create_assessment),
    );
    if rate_limit.enabled {
        let config = rate_limit::create_governor_config(rate_limit)?;
        info!(
            "Rate limiting submissions (per_second={}, burst={})",
            rate_limit.per_second, rate_limit.burst_size
        );
        submissions = submissions.layer(GovernorLayer { config });
    }

    Ok(Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/form", get(routes::form::get_form))
        .route("/metrics", get(metrics_handler))
        .merge(submissions)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state))
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let engine = state.context.engine();
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().timestamp().max(0) as u64,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelStatus {
            name: engine.model_name(),
            path: engine.model_path().to_string(),
        },
        assessment_count: state.assessments.load(Ordering::Relaxed),
    };

    Json(response)
}

/// Prometheus scrape endpoint
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Initialize logging
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    }
}

/// Install the global Prometheus recorder
pub fn install_metrics() -> Result<PrometheusHandle, ApiError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ApiError::Metrics(e.to_string()))?;

    metrics::describe_counter!("assessments_total", "Completed assessments by risk label");
    metrics::describe_counter!(
        "assessment_rejections_total",
        "Submissions rejected or failed, by reason"
    );
    metrics::describe_histogram!(
        "assessment_duration_seconds",
        metrics::Unit::Seconds,
        "End-to-end assessment time"
    );

    Ok(handle)
}

/// Run the server
pub async fn run_server(
    config: AppConfig,
    context: AssessmentContext,
    metrics: Option<PrometheusHandle>,
) -> Result<(), ApiError> {
    let state = Arc::new(AppState::new(context, metrics));
    let app = create_router(state, &config.rate_limit)?;

    info!("Starting API server on {}", config.server.addr);

    let listener = tokio::net::TcpListener::bind(&config.server.addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use applicant_validator::ValidationConfig;
    use axum::body::Body;
    use axum::http::{header, Request};
    use risk_assessment::ArtifactPaths;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../fixtures")
            .join(name)
    }

    fn test_router() -> Router {
        let paths = ArtifactPaths {
            encoders: fixture("label_encoders.json"),
            scaler: fixture("scaler.json"),
            model: fixture("logistic_model.json"),
        };
        let context = AssessmentContext::load(&paths, ValidationConfig::default()).unwrap();
        let state = Arc::new(AppState::new(context, None));
        create_router(state, &RateLimitConfig::default()).unwrap()
    }

    fn scenario_a() -> Value {
        json!({
            "age": 30,
            "sex": "male",
            "job": 2,
            "housing": "own",
            "saving_accounts": "moderate",
            "checking_account": "little",
            "credit_amount": 5000,
            "duration": 12,
            "purpose": "car"
        })
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn submit(router: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/assessments")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(test_router(), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["assessment_count"], 0);
        assert_eq!(body["model"]["name"], "logistic");
    }

    #[tokio::test]
    async fn test_form_schema() {
        let (status, body) = get(test_router(), "/api/v1/form").await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["numeric"][0]["name"], "Age");
        assert_eq!(body["numeric"][0]["min"], 18);
        assert_eq!(body["numeric"][0]["max"], 100);
        assert_eq!(body["select"].as_array().unwrap().len(), 5);
        assert_eq!(body["job_levels"].as_array().unwrap().len(), 4);
        assert_eq!(body["defaults"]["age"], 30);
        assert_eq!(body["quick_tips"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_low_risk_submission() {
        let (status, body) = submit(test_router(), scenario_a()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], 0);
        assert_eq!(body["risk"], "low");
        assert_eq!(body["outcome"]["headline"], "Low Risk Profile");
        assert!(body["summary"]
            .as_str()
            .unwrap()
            .starts_with("Low Risk Profile\n"));
    }

    #[tokio::test]
    async fn test_job_as_text_accepted() {
        let mut form = scenario_a();
        form["job"] = json!("2");
        let (status, body) = submit(test_router(), form).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["risk"], "low");
    }

    #[tokio::test]
    async fn test_unknown_category_rejected() {
        let mut form = scenario_a();
        form["saving_accounts"] = json!("bogus");
        let (status, body) = submit(test_router(), form).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "Saving accounts");
        assert_eq!(
            body["error"],
            "Invalid value for Saving accounts. Please select a valid option."
        );
    }

    #[tokio::test]
    async fn test_out_of_range_age_rejected() {
        let mut form = scenario_a();
        form["age"] = json!(17);
        let (status, body) = submit(test_router(), form).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "Age");
    }

    #[tokio::test]
    async fn test_missing_field_rejected() {
        let mut form = scenario_a();
        form.as_object_mut().unwrap().remove("duration");
        let (status, body) = submit(test_router(), form).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "Duration");
    }

    #[tokio::test]
    async fn test_mistyped_field_gets_json_error() {
        let mut form = scenario_a();
        form["age"] = json!("thirty");
        let (status, body) = submit(test_router(), form).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("thirty"));
        assert!(body.get("field").is_none());
    }

    #[tokio::test]
    async fn test_unparseable_body_gets_json_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/assessments")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"age\": 30,"))
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let (status, _) = get(test_router(), "/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_rate_limit_rejected() {
        let paths = ArtifactPaths {
            encoders: fixture("label_encoders.json"),
            scaler: fixture("scaler.json"),
            model: fixture("logistic_model.json"),
        };
        let context = AssessmentContext::load(&paths, ValidationConfig::default()).unwrap();
        let state = Arc::new(AppState::new(context, None));
        let config = RateLimitConfig {
            enabled: true,
            per_second: 0,
            burst_size: 5,
        };
        assert!(matches!(
            create_router(state, &config),
            Err(ApiError::RateLimit(_))
        ));
    }
}
