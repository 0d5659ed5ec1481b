//! Heuristic box-office revenue estimator
//!
//! Revenue starts at the production budget and passes through a fixed chain
//! of multipliers:
//!
//! ```text
//! budget → rating → genre → season → star → sequel → budget risk → genre risk
//!        → × N(1.0, σ) → max(·, 0.3 × budget)
//! ```
//!
//! Every step records one explanation sentence. The random perturbation is
//! supplied by the caller so tests can pin it.

pub mod genres;
pub mod variation;

#[cfg(test)]
mod tests;

pub use genres::{GenreProfile, GenreTable, RiskLevel};
pub use variation::{FixedVariation, NormalVariation, ScriptedVariation, VariationSource};

use crate::error::Result;
use crate::types::{Adjustment, Factor, PredictionRequest, PredictionResult, Season};

/// Predicted revenue never falls below this share of the budget
pub const FLOOR_RATIO: f64 = 0.3;

/// Only genre with its own budget ceiling
pub const ROMANCE: &str = "Romance";

/// Rule-table revenue estimator
#[derive(Debug, Clone, Default)]
pub struct HeuristicRevenueEstimator {
    genres: GenreTable,
}

impl HeuristicRevenueEstimator {
    pub fn new(genres: GenreTable) -> Self {
        Self { genres }
    }

    pub fn with_defaults() -> Self {
        Self::new(GenreTable::standard())
    }

    pub fn genres(&self) -> &GenreTable {
        &self.genres
    }

    /// Predict revenue for one request.
    ///
    /// Fails only with `Error::UnknownGenre`, before any randomness is consumed.
    pub fn predict<V>(&self, request: &PredictionRequest, variation: &mut V) -> Result<PredictionResult>
    where
        V: VariationSource + ?Sized,
    {
        let adjustments = self.adjustments(request)?;

        let base_revenue = adjustments
            .iter()
            .fold(request.budget_millions, |revenue, a| revenue * a.multiplier);

        let variation = variation.draw();
        let perturbed = base_revenue * variation;
        let floor = request.budget_millions * FLOOR_RATIO;
        let floored = perturbed < floor;
        let predicted = perturbed.max(floor);

        tracing::debug!(
            genre = %request.genre,
            budget = request.budget_millions,
            base_revenue,
            variation,
            predicted,
            floored,
            "heuristic prediction"
        );

        Ok(PredictionResult {
            predicted_revenue_millions: predicted,
            adjustments,
            base_revenue_millions: base_revenue,
            variation,
            floored,
        })
    }

    /// The seven deterministic adjustments, in application order
    pub fn adjustments(&self, request: &PredictionRequest) -> Result<Vec<Adjustment>> {
        let genre = self.genres.get(&request.genre)?;

        Ok(vec![
            rating_effect(request.quality_rating),
            Adjustment::new(
                Factor::Genre,
                genre.multiplier,
                format!("{} movies typically make {:?}x budget", genre.name, genre.multiplier),
            ),
            season_effect(request.season),
            star_effect(request.has_star),
            sequel_effect(request.is_sequel),
            budget_risk(request.budget_millions, request.quality_rating),
            genre_risk(&genre.name, request.budget_millions),
        ])
    }
}

/// Rating bands, highest first; the last band has no lower bound
fn rating_effect(rating: f64) -> Adjustment {
    let (multiplier, text) = if rating >= 8.0 {
        (3.0, "Great movies attract more viewers")
    } else if rating >= 7.0 {
        (2.0, "Good quality brings steady audience")
    } else if rating >= 6.0 {
        (1.3, "Average movies struggle to attract viewers")
    } else if rating >= 5.0 {
        (0.9, "Poor quality significantly hurts box office")
    } else {
        (0.6, "Very poor quality leads to box office disaster")
    };
    Adjustment::new(Factor::Rating, multiplier, text)
}

fn season_effect(season: Season) -> Adjustment {
    let (multiplier, text) = match season {
        Season::Summer => (1.4, "Summer releases get 40% more viewers"),
        Season::Holiday => (1.3, "Holiday season boosts attendance"),
        Season::Other => (0.9, "Off-season releases have fewer viewers"),
    };
    Adjustment::new(Factor::Season, multiplier, text)
}

fn star_effect(has_star: bool) -> Adjustment {
    if has_star {
        Adjustment::new(Factor::Star, 1.2, "Famous actors help but cannot save bad movies")
    } else {
        Adjustment::new(Factor::Star, 1.0, "No big stars - needs strong marketing")
    }
}

fn sequel_effect(is_sequel: bool) -> Adjustment {
    if is_sequel {
        Adjustment::new(Factor::Sequel, 1.3, "Sequels have some built-in audience")
    } else {
        Adjustment::new(Factor::Sequel, 1.0, "Original movie - needs to build audience")
    }
}

/// Big budgets need matching quality. The harsher tier is checked first and at most one applies.
fn budget_risk(budget: f64, rating: f64) -> Adjustment {
    let (multiplier, text) = if budget > 200.0 && rating < 7.5 {
        (0.6, "Huge budget needs excellent quality to succeed")
    } else if budget > 100.0 && rating < 7.0 {
        (0.7, "Big budget with average quality = High risk")
    } else {
        (1.0, "Budget matches quality expectations")
    };
    Adjustment::new(Factor::BudgetRisk, multiplier, text)
}

/// Evaluated independently of `budget_risk`
fn genre_risk(genre: &str, budget: f64) -> Adjustment {
    let (multiplier, text) = if genre == ROMANCE {
        if budget > 50.0 {
            (0.6, "Romance genre cannot sustain big budgets")
        } else {
            (1.0, "Romance works best with smaller budgets")
        }
    } else {
        (1.0, "Genre has reasonable box office potential")
    };
    Adjustment::new(Factor::GenreRisk, multiplier, text)
}
