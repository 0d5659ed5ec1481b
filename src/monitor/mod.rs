//! Web dashboard front-end

pub mod dashboard;

pub use dashboard::{
    create_router, start_dashboard, ApiError, DashboardMetrics, DashboardState, PredictionRecord,
    PredictRequestBody,
};
