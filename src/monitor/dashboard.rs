//! Web dashboard API
//!
//! HTTP endpoints for running predictions and browsing the ones made so far.
//! Presentation is left to whatever client consumes the JSON.

use crate::error::{Error, Result};
use crate::estimator::{HeuristicRevenueEstimator, VariationSource};
use crate::ml::{ModelEstimate, MovieFeatures, RevenueModel, TrainingReport};
use crate::report::{benchmarks, Analysis, BenchmarkMovie, Comparison, Financials, Recommendation, RiskWarning, Verdict};
use crate::types::{serialize_explanations, Adjustment, PredictionRequest};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Dashboard state shared across handlers
pub struct DashboardState {
    estimator: HeuristicRevenueEstimator,
    variation: Mutex<Box<dyn VariationSource + Send>>,
    model: Option<RevenueModel>,
    history_limit: usize,
    pub metrics: RwLock<DashboardMetrics>,
    pub history: RwLock<VecDeque<PredictionRecord>>,
}

/// Aggregate counters over all predictions served
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardMetrics {
    pub total_predictions: u64,
    pub blockbusters: u64,
    pub profitable: u64,
    pub break_even: u64,
    pub flops: u64,
    /// Running mean ROI percentage of heuristic predictions
    pub average_roi_pct: Decimal,
    pub model_predictions: u64,
    pub last_updated: DateTime<Utc>,
}

/// Body of `POST /predict`
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequestBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub request: PredictionRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerdictView {
    pub tier: Verdict,
    pub label: &'static str,
    pub message: &'static str,
}

impl From<Verdict> for VerdictView {
    fn from(tier: Verdict) -> Self {
        Self {
            tier,
            label: tier.label(),
            message: tier.message(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WarningView {
    pub kind: RiskWarning,
    pub title: &'static str,
    pub message: &'static str,
}

impl From<RiskWarning> for WarningView {
    fn from(kind: RiskWarning) -> Self {
        Self {
            kind,
            title: kind.title(),
            message: kind.message(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub kind: Recommendation,
    pub headline: &'static str,
    pub summary: &'static str,
    pub steps: &'static [&'static str],
}

impl From<Recommendation> for RecommendationView {
    fn from(kind: Recommendation) -> Self {
        Self {
            kind,
            headline: kind.headline(),
            summary: kind.summary(),
            steps: kind.steps(),
        }
    }
}

/// One served heuristic prediction
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub request: PredictionRequest,
    pub predicted_revenue_millions: f64,
    pub variation: f64,
    pub floored: bool,
    #[serde(serialize_with = "serialize_explanations")]
    pub explanations: Vec<Adjustment>,
    pub adjustments: Vec<Adjustment>,
    pub financials: Financials,
    pub verdict: VerdictView,
    pub warnings: Vec<WarningView>,
    pub recommendation: RecommendationView,
    pub comparison: Option<Comparison>,
}

impl From<Analysis> for PredictionRecord {
    fn from(analysis: Analysis) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            title: analysis.title,
            request: analysis.request,
            predicted_revenue_millions: analysis.result.predicted_revenue_millions,
            variation: analysis.result.variation,
            floored: analysis.result.floored,
            explanations: analysis.result.adjustments.clone(),
            adjustments: analysis.result.adjustments,
            financials: analysis.financials,
            verdict: analysis.verdict.into(),
            warnings: analysis.warnings.into_iter().map(WarningView::from).collect(),
            recommendation: analysis.recommendation.into(),
            comparison: analysis.comparison,
        }
    }
}

/// Error response for API handlers
#[derive(Debug)]
pub enum ApiError {
    Prediction(Error),
    ModelUnavailable,
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError::Prediction(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Prediction(e) => {
                let status = match e {
                    Error::UnknownGenre(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            ApiError::ModelUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "No trained model loaded; start the dashboard with a dataset".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!("dashboard request failed: {}", message);
        } else {
            tracing::warn!("dashboard request rejected: {}", message);
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl DashboardState {
    /// Create new dashboard state
    pub fn new(
        estimator: HeuristicRevenueEstimator,
        variation: Box<dyn VariationSource + Send>,
        history_limit: usize,
    ) -> Self {
        let metrics = DashboardMetrics {
            last_updated: Utc::now(),
            ..Default::default()
        };

        Self {
            estimator,
            variation: Mutex::new(variation),
            model: None,
            history_limit: history_limit.max(1),
            metrics: RwLock::new(metrics),
            history: RwLock::new(VecDeque::new()),
        }
    }

    /// Serve trained-model predictions as well
    pub fn with_model(mut self, model: RevenueModel) -> Self {
        self.model = Some(model);
        self
    }

    pub fn estimator(&self) -> &HeuristicRevenueEstimator {
        &self.estimator
    }

    /// Run the estimator and build the full analysis
    pub fn analyze(&self, title: Option<String>, request: PredictionRequest) -> Result<Analysis> {
        request.validate()?;
        let result = {
            let mut variation = self.variation.lock();
            self.estimator.predict(&request, &mut *variation)?
        };
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| request.genre.clone());
        Analysis::new(title, request, result)
    }

    /// Store a served prediction and update the counters
    pub async fn record_prediction(&self, record: PredictionRecord) {
        let mut history = self.history.write().await;
        history.push_front(record.clone());
        history.truncate(self.history_limit);

        let mut metrics = self.metrics.write().await;
        metrics.total_predictions += 1;
        match record.verdict.tier {
            Verdict::BlockbusterHit => metrics.blockbusters += 1,
            Verdict::Profitable => metrics.profitable += 1,
            Verdict::BreakEven => metrics.break_even += 1,
            Verdict::Flop => metrics.flops += 1,
        }

        let n = Decimal::from(metrics.total_predictions);
        let average = metrics.average_roi_pct;
        match record
            .financials
            .roi_pct
            .checked_sub(average)
            .and_then(|delta| delta.checked_div(n))
            .and_then(|step| average.checked_add(step))
        {
            Some(updated) => metrics.average_roi_pct = updated,
            None => tracing::warn!(roi = %record.financials.roi_pct, "ROI out of range, average unchanged"),
        }
        metrics.last_updated = Utc::now();
    }

    pub async fn record_model_prediction(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.model_predictions += 1;
        metrics.last_updated = Utc::now();
    }
}

// ============ HTTP API Handlers ============

/// Health check
async fn health_check() -> &'static str {
    "OK"
}

async fn get_genres(State(state): State<Arc<DashboardState>>) -> Response {
    Json(state.estimator.genres()).into_response()
}

async fn get_benchmarks() -> Json<Vec<BenchmarkMovie>> {
    Json(benchmarks::catalog())
}

/// Run a heuristic prediction
async fn predict(
    State(state): State<Arc<DashboardState>>,
    Json(body): Json<PredictRequestBody>,
) -> std::result::Result<Json<PredictionRecord>, ApiError> {
    let analysis = state.analyze(body.title, body.request)?;
    let record = PredictionRecord::from(analysis);

    tracing::info!(
        id = %record.id,
        title = %record.title,
        revenue = record.predicted_revenue_millions,
        verdict = record.verdict.label,
        "prediction served"
    );

    state.record_prediction(record.clone()).await;
    Ok(Json(record))
}

/// Recent predictions, newest first
async fn get_history(State(state): State<Arc<DashboardState>>) -> Json<Vec<PredictionRecord>> {
    let history = state.history.read().await;
    Json(history.iter().cloned().collect())
}

async fn get_metrics(State(state): State<Arc<DashboardState>>) -> Json<DashboardMetrics> {
    let metrics = state.metrics.read().await;
    Json(metrics.clone())
}

/// Dashboard summary response
#[derive(Serialize)]
struct DashboardSummary {
    metrics: DashboardMetrics,
    recent_predictions: Vec<PredictionRecord>,
    model_loaded: bool,
}

async fn get_summary(State(state): State<Arc<DashboardState>>) -> Json<DashboardSummary> {
    let metrics = state.metrics.read().await.clone();
    let history = state.history.read().await;

    Json(DashboardSummary {
        metrics,
        recent_predictions: history.iter().take(10).cloned().collect(),
        model_loaded: state.model.is_some(),
    })
}

/// Trained-model prediction
async fn model_predict(
    State(state): State<Arc<DashboardState>>,
    Json(features): Json<MovieFeatures>,
) -> std::result::Result<Json<ModelEstimate>, ApiError> {
    let model = state.model.as_ref().ok_or(ApiError::ModelUnavailable)?;
    let estimate = model.estimate(&features)?;
    state.record_model_prediction().await;
    Ok(Json(estimate))
}

async fn model_report(
    State(state): State<Arc<DashboardState>>,
) -> std::result::Result<Json<TrainingReport>, ApiError> {
    let model = state.model.as_ref().ok_or(ApiError::ModelUnavailable)?;
    Ok(Json(model.report().clone()))
}

/// Create dashboard router
pub fn create_router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/genres", get(get_genres))
        .route("/benchmarks", get(get_benchmarks))
        .route("/predict", post(predict))
        .route("/history", get(get_history))
        .route("/metrics", get(get_metrics))
        .route("/summary", get(get_summary))
        .route("/model", get(model_report))
        .route("/model/predict", post(model_predict))
        .with_state(state)
}

/// Start dashboard server
pub async fn start_dashboard(state: Arc<DashboardState>, host: &str, port: u16) -> Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Dashboard server starting on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
