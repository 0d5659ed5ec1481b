//! Trained revenue model
//!
//! Fits the booster on `ln(1 + gross)` and inverts with `exp(x) - 1` when
//! predicting, so errors are relative rather than absolute.
//!
//! Usage:
//! ```ignore
//! let dataset = MovieDataset::load("movies.csv")?;
//! let model = RevenueModel::train(&dataset, &BoostingConfig::default())?;
//! let gross = model.predict(&features)?;
//! ```

use super::boosting::{BoostingConfig, GradientBoostedRegressor};
use super::dataset::{FeatureMedians, FeatureRow, MovieDataset, MovieFeatures};
use crate::error::{Error, Result};
use crate::report::{Financials, Verdict};
use serde::Serialize;
use std::path::Path;

const DOLLARS_PER_MILLION: f64 = 1_000_000.0;

/// Summary of a training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    /// Rows read from the dataset before filtering
    pub rows_loaded: usize,
    /// Rows used for fitting
    pub rows_kept: usize,
    pub medians: FeatureMedians,
    pub trees: usize,
    /// In-sample R² on the log scale
    pub r2_log: f64,
    /// In-sample mean absolute error, dollars
    pub mae: f64,
}

/// Model prediction with the same derived figures as the heuristic path
#[derive(Debug, Clone, Serialize)]
pub struct ModelEstimate {
    pub features: MovieFeatures,
    /// Predicted gross in dollars
    pub predicted_gross: f64,
    /// Figures in millions
    pub financials: Financials,
    pub verdict: Verdict,
}

/// Gradient-boosted revenue model
#[derive(Debug, Clone)]
pub struct RevenueModel {
    booster: GradientBoostedRegressor,
    report: TrainingReport,
}

impl RevenueModel {
    /// Load, clean and fit in one step
    pub fn train_from_path(path: impl AsRef<Path>, config: &BoostingConfig) -> Result<Self> {
        let dataset = MovieDataset::load(path)?;
        Self::train(&dataset, config)
    }

    pub fn train(dataset: &MovieDataset, config: &BoostingConfig) -> Result<Self> {
        let rows: Vec<FeatureRow> = dataset.records().iter().map(|r| r.features).collect();
        let targets: Vec<f64> = dataset.records().iter().map(|r| r.gross.ln_1p()).collect();

        tracing::info!(
            rows = rows.len(),
            trees = config.n_estimators,
            learning_rate = config.learning_rate,
            max_depth = config.max_depth,
            "training revenue model"
        );

        let booster = GradientBoostedRegressor::fit(&rows, &targets, config)?;

        let fitted: Vec<f64> = rows.iter().map(|row| booster.predict(row)).collect();
        let r2_log = r_squared(&targets, &fitted);
        let mae = dataset
            .records()
            .iter()
            .zip(&fitted)
            .map(|(record, score)| (record.gross - score.exp_m1()).abs())
            .sum::<f64>()
            / rows.len() as f64;

        let report = TrainingReport {
            rows_loaded: dataset.rows_loaded(),
            rows_kept: dataset.len(),
            medians: dataset.medians(),
            trees: booster.n_trees(),
            r2_log,
            mae,
        };
        tracing::info!(r2_log, mae, "revenue model trained");

        Ok(Self { booster, report })
    }

    /// Predicted gross in dollars, never negative
    pub fn predict(&self, features: &MovieFeatures) -> Result<f64> {
        if !features.is_finite() {
            return Err(Error::InvalidInput(format!(
                "model features must be finite numbers: {:?}",
                features
            )));
        }
        let score = self.booster.predict(&features.to_row());
        Ok(score.exp_m1().max(0.0))
    }

    /// Prediction plus profit figures and verdict
    pub fn estimate(&self, features: &MovieFeatures) -> Result<ModelEstimate> {
        if features.budget <= 0.0 {
            return Err(Error::InvalidInput("Budget must be positive".to_string()));
        }
        let predicted_gross = self.predict(features)?;
        let financials = Financials::from_millions(
            features.budget / DOLLARS_PER_MILLION,
            predicted_gross / DOLLARS_PER_MILLION,
        )?;
        let verdict = Verdict::classify(&financials);

        Ok(ModelEstimate {
            features: *features,
            predicted_gross,
            financials,
            verdict,
        })
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    pub fn training_rows(&self) -> usize {
        self.report.rows_kept
    }
}

/// Coefficient of determination; 0 when the targets have no variance
pub fn r_squared(actual: &[f64], fitted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = actual.iter().zip(fitted).map(|(y, f)| (y - f).powi(2)).sum();
    if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else {
        0.0
    }
}
