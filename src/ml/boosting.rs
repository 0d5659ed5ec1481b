//! Gradient-boosted regression trees
//!
//! Squared-loss boosting: start from the target mean, then repeatedly fit a
//! shallow tree to the residuals and add it with shrinkage.

use super::dataset::{FeatureRow, FEATURE_COUNT};
use crate::config::ModelConfig;
use crate::error::{Error, Result};

/// Minimum SSE reduction for a split to be worth making
const MIN_GAIN: f64 = 1e-12;

/// Booster hyperparameters
#[derive(Debug, Clone, PartialEq)]
pub struct BoostingConfig {
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self::from(&ModelConfig::default())
    }
}

impl From<&ModelConfig> for BoostingConfig {
    fn from(config: &ModelConfig) -> Self {
        Self {
            n_estimators: config.n_estimators,
            learning_rate: config.learning_rate,
            max_depth: config.max_depth,
            min_samples_leaf: config.min_samples_leaf,
        }
    }
}

impl BoostingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(Error::Model("n_estimators must be at least 1".to_string()));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::Model(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if self.max_depth == 0 {
            return Err(Error::Model("max_depth must be at least 1".to_string()));
        }
        if self.min_samples_leaf == 0 {
            return Err(Error::Model("min_samples_leaf must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf(f64),
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, row: &FeatureRow) -> f64 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Least-squares regression tree
#[derive(Debug, Clone)]
pub struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    pub fn fit(rows: &[FeatureRow], targets: &[f64], max_depth: usize, min_samples_leaf: usize) -> Self {
        let indices: Vec<usize> = (0..rows.len()).collect();
        Self {
            root: grow(rows, targets, indices, max_depth, min_samples_leaf),
        }
    }

    pub fn predict(&self, row: &FeatureRow) -> f64 {
        self.root.predict(row)
    }
}

fn mean_of(targets: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64
}

fn grow(rows: &[FeatureRow], targets: &[f64], indices: Vec<usize>, depth: usize, min_leaf: usize) -> Node {
    if depth == 0 || indices.len() < min_leaf.saturating_mul(2) {
        return Node::Leaf(mean_of(targets, &indices));
    }

    let Some(split) = best_split(rows, targets, &indices, min_leaf) else {
        return Node::Leaf(mean_of(targets, &indices));
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| rows[i][split.feature] <= split.threshold);

    Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(grow(rows, targets, left, depth - 1, min_leaf)),
        right: Box::new(grow(rows, targets, right, depth - 1, min_leaf)),
    }
}

/// Exhaustive search over features and midpoints between distinct values
fn best_split(rows: &[FeatureRow], targets: &[f64], indices: &[usize], min_leaf: usize) -> Option<SplitCandidate> {
    let n = indices.len();
    let total: f64 = indices.iter().map(|&i| targets[i]).sum();
    let parent_score = total * total / n as f64;

    let mut best: Option<SplitCandidate> = None;
    let mut order = indices.to_vec();

    for feature in 0..FEATURE_COUNT {
        order.sort_by(|&a, &b| rows[a][feature].total_cmp(&rows[b][feature]));

        let mut left_sum = 0.0;
        for pos in 1..n {
            left_sum += targets[order[pos - 1]];

            let (lo, hi) = (rows[order[pos - 1]][feature], rows[order[pos]][feature]);
            if pos < min_leaf || n - pos < min_leaf || lo == hi {
                continue;
            }

            let right_sum = total - left_sum;
            let score = left_sum * left_sum / pos as f64 + right_sum * right_sum / (n - pos) as f64;
            let gain = score - parent_score;

            if gain > MIN_GAIN && best.as_ref().map_or(true, |b| gain > b.gain) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (lo + hi) / 2.0,
                    gain,
                });
            }
        }
    }

    best
}

/// Additive ensemble of regression trees
#[derive(Debug, Clone)]
pub struct GradientBoostedRegressor {
    base_score: f64,
    learning_rate: f64,
    trees: Vec<RegressionTree>,
}

impl GradientBoostedRegressor {
    pub fn fit(rows: &[FeatureRow], targets: &[f64], config: &BoostingConfig) -> Result<Self> {
        config.validate()?;
        if rows.is_empty() {
            return Err(Error::Model("cannot fit on an empty training set".to_string()));
        }
        if rows.len() != targets.len() {
            return Err(Error::Model(format!(
                "{} feature rows but {} targets",
                rows.len(),
                targets.len()
            )));
        }

        let base_score = targets.iter().sum::<f64>() / targets.len() as f64;
        let mut predictions = vec![base_score; targets.len()];
        let mut trees = Vec::with_capacity(config.n_estimators);

        for round in 0..config.n_estimators {
            let residuals: Vec<f64> = targets
                .iter()
                .zip(&predictions)
                .map(|(y, p)| y - p)
                .collect();

            let tree = RegressionTree::fit(rows, &residuals, config.max_depth, config.min_samples_leaf);
            for (pred, row) in predictions.iter_mut().zip(rows) {
                *pred += config.learning_rate * tree.predict(row);
            }
            trees.push(tree);

            if (round + 1) % 50 == 0 {
                let mse = targets
                    .iter()
                    .zip(&predictions)
                    .map(|(y, p)| (y - p).powi(2))
                    .sum::<f64>()
                    / targets.len() as f64;
                tracing::debug!(round = round + 1, mse, "boosting progress");
            }
        }

        Ok(Self {
            base_score,
            learning_rate: config.learning_rate,
            trees,
        })
    }

    pub fn predict(&self, row: &FeatureRow) -> f64 {
        self.base_score
            + self
                .trees
                .iter()
                .map(|t| self.learning_rate * t.predict(row))
                .sum::<f64>()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
