//! Trained-model revenue estimation
//!
//! The data-driven counterpart of the heuristic estimator:
//! - Dataset loading, release filtering and median fill
//! - Gradient-boosted regression trees
//! - Log-scale revenue model with `train` / `predict`

pub mod boosting;
pub mod dataset;
pub mod predictor;


pub use boosting::{BoostingConfig, GradientBoostedRegressor, RegressionTree};
pub use dataset::{FeatureMedians, MovieDataset, MovieFeatures, MovieRecord, FEATURE_NAMES};
pub use predictor::{ModelEstimate, RevenueModel, TrainingReport};
