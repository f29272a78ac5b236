//! # API REST
//!
//! REST API implementation for ImplantX.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, API-key checks)
//!
//! Uses `api-shared` for common types and utilities. The server binary lives in the workspace
//! root (`implantx-run`).

#![warn(rust_2018_idioms)]

pub mod config;

pub use config::{ConfigError, RestConfig, DEFAULT_REST_ADDR};

use api_shared::auth::{self, API_KEY_HEADER};
use api_shared::{AssessmentRes, ErrorRes, HealthRes, HealthService, QuestionnaireAnswers, TablesRes};
use axum::{
    extract::{rejection::QueryRejection, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use implantx_core::{AssessmentService, ReportTier};
use questionnaire::Questionnaire;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Application state for the REST API server
///
/// Holds the configuration resolved at startup and the assessment service. Both are immutable
/// and shared across handlers.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<RestConfig>,
    service: AssessmentService,
}

impl AppState {
    pub fn new(cfg: RestConfig) -> Self {
        Self {
            cfg: Arc::new(cfg),
            service: AssessmentService::new(),
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TierQuery {
    /// Report tier, `free` unless stated.
    tier: Option<ReportTier>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, create_assessment, tables),
    components(schemas(
        HealthRes,
        AssessmentRes,
        ErrorRes,
        TablesRes,
        QuestionnaireAnswers,
        implantx_core::Report,
        implantx_core::ReportTier,
        implantx_core::FreeSummary,
        implantx_core::FullReport,
        implantx_core::AssessmentResult,
        implantx_core::Classification,
        implantx_core::Severity,
        implantx_core::Dimension,
        implantx_core::RiskFactor,
        implantx_core::ProtectiveFactor,
        implantx_core::Recommendation,
        implantx_core::Synergy,
        implantx_core::TreatmentTimeline,
        implantx_core::TreatmentPhase,
        implantx_core::report::TimelinePhase,
        implantx_core::DeductionRow,
        implantx_core::SynergyRow,
        implantx_core::ClassificationBand,
    ))
)]
pub struct ApiDoc;

/// Build the REST router.
///
/// `/assessments` sits behind the API-key check; health, tables and the documentation stay
/// open.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/assessments", post(create_assessment))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route("/health", get(health))
        .route("/tables", get(tables))
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Err(err) = auth::validate_api_key(provided, state.cfg.api_key()) {
        tracing::warn!("Rejected request to {}: {}", req.uri().path(), err);
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorRes::message(err.to_string())),
        ));
    }

    Ok(next.run(req).await)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/assessments",
    params(TierQuery),
    request_body = QuestionnaireAnswers,
    responses(
        (status = 200, description = "Assessment report", body = AssessmentRes),
        (status = 400, description = "Malformed or invalid answers", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes)
    )
)]
/// Assess a completed questionnaire
///
/// The body is parsed strictly: unknown keys, wrong types, missing answers and unknown tokens
/// are all rejected with the offending field. Nothing is stored.
async fn create_assessment(
    State(state): State<AppState>,
    query: Result<Query<TierQuery>, QueryRejection>,
    body: String,
) -> Result<Json<AssessmentRes>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::warn!("Invalid assessment query: {}", rejection);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: rejection.body_text(),
                field: Some("tier".into()),
            }),
        )
    })?;
    let tier = query.tier.unwrap_or_default();

    let answers = Questionnaire::load_json(&body).map_err(|e| {
        tracing::warn!("Invalid questionnaire submission: {}", e);
        (StatusCode::BAD_REQUEST, Json(ErrorRes::from(&e)))
    })?;

    let res = AssessmentRes::new(state.service.assess(&answers, tier));
    tracing::info!(
        assessment_id = %res.assessment_id,
        classification = %res.report.classification(),
        "assessment served"
    );
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/tables",
    responses(
        (status = 200, description = "Scoring policy in force", body = TablesRes)
    )
)]
/// Publish the scoring tables
async fn tables() -> Json<TablesRes> {
    Json(TablesRes::current())
}
