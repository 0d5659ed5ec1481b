//! Core types shared by the estimator and its presenters

use crate::error::{Error, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Release window bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Season {
    Summer,
    Holiday,
    /// Catch-all for any unrecognized label
    Other,
}

impl Season {
    /// Labels offered to users, in menu order
    pub const CHOICES: [Season; 3] = [Season::Summer, Season::Holiday, Season::Other];

    /// Parse a release window label. Only the exact labels `Summer` and
    /// `Holiday` are recognized; anything else is `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Summer" => Season::Summer,
            "Holiday" => Season::Holiday,
            _ => Season::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Holiday => "Holiday",
            Season::Other => "Other Season",
        }
    }
}

impl From<String> for Season {
    fn from(label: String) -> Self {
        Season::from_label(&label)
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.label().to_string()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The seven factors explained for every prediction, in computation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Rating,
    Genre,
    Season,
    Star,
    Sequel,
    BudgetRisk,
    GenreRisk,
}

impl Factor {
    pub const ALL: [Factor; 7] = [
        Factor::Rating,
        Factor::Genre,
        Factor::Season,
        Factor::Star,
        Factor::Sequel,
        Factor::BudgetRisk,
        Factor::GenreRisk,
    ];

    /// Explanation key
    pub fn key(&self) -> &'static str {
        match self {
            Factor::Rating => "rating",
            Factor::Genre => "genre",
            Factor::Season => "season",
            Factor::Star => "star",
            Factor::Sequel => "sequel",
            Factor::BudgetRisk => "budget_risk",
            Factor::GenreRisk => "genre_risk",
        }
    }

    /// Key rendered for humans, e.g. `budget_risk` -> `Budget Risk`
    pub fn title(&self) -> &'static str {
        match self {
            Factor::Rating => "Rating",
            Factor::Genre => "Genre",
            Factor::Season => "Season",
            Factor::Star => "Star",
            Factor::Sequel => "Sequel",
            Factor::BudgetRisk => "Budget Risk",
            Factor::GenreRisk => "Genre Risk",
        }
    }
}

/// Inputs for one heuristic prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Production budget in millions; callers ensure it is positive
    pub budget_millions: f64,
    /// Genre name, matched exactly against the genre table
    pub genre: String,
    /// Expected quality rating, nominally 1-10 (not clamped)
    pub quality_rating: f64,
    pub season: Season,
    #[serde(default)]
    pub has_star: bool,
    #[serde(default)]
    pub is_sequel: bool,
}

impl PredictionRequest {
    pub fn new(
        budget_millions: f64,
        genre: impl Into<String>,
        quality_rating: f64,
        season: Season,
        has_star: bool,
        is_sequel: bool,
    ) -> Self {
        Self {
            budget_millions,
            genre: genre.into(),
            quality_rating,
            season,
            has_star,
            is_sequel,
        }
    }

    /// Input checks performed by presenters before calling the estimator.
    ///
    /// The estimator itself only rejects unknown genres.
    pub fn validate(&self) -> Result<()> {
        if !self.budget_millions.is_finite() || self.budget_millions <= 0.0 {
            return Err(Error::InvalidInput("Budget must be positive".to_string()));
        }
        if !(1.0..=10.0).contains(&self.quality_rating) {
            return Err(Error::InvalidInput(
                "Rating must be between 1 and 10".to_string(),
            ));
        }
        Ok(())
    }
}

/// One step of the multiplier chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub factor: Factor,
    pub multiplier: f64,
    pub explanation: String,
}

impl Adjustment {
    pub fn new(factor: Factor, multiplier: f64, explanation: impl Into<String>) -> Self {
        Self {
            factor,
            multiplier,
            explanation: explanation.into(),
        }
    }
}

/// Output of one heuristic prediction
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Final revenue in millions, never below 30% of budget
    pub predicted_revenue_millions: f64,
    /// One entry per factor, in computation order
    pub adjustments: Vec<Adjustment>,
    /// Revenue after all multipliers, before the random perturbation
    pub base_revenue_millions: f64,
    /// The perturbation drawn for this prediction
    pub variation: f64,
    /// Whether the floor clamp replaced the perturbed revenue
    pub floored: bool,
}

impl PredictionResult {
    /// Ordered explanation mapping
    pub fn explanations(&self) -> Explanations<'_> {
        Explanations(&self.adjustments)
    }

    pub fn explanation(&self, factor: Factor) -> Option<&str> {
        self.adjustments
            .iter()
            .find(|a| a.factor == factor)
            .map(|a| a.explanation.as_str())
    }

    pub fn multiplier(&self, factor: Factor) -> Option<f64> {
        self.adjustments
            .iter()
            .find(|a| a.factor == factor)
            .map(|a| a.multiplier)
    }
}

/// Borrowed view of the explanations, serialized as an ordered JSON object
#[derive(Debug, Clone, Copy)]
pub struct Explanations<'a>(&'a [Adjustment]);

impl<'a> Explanations<'a> {
    pub fn iter(&self) -> impl Iterator<Item = (Factor, &'a str)> + 'a {
        let adjustments: &'a [Adjustment] = self.0;
        adjustments.iter().map(|a| (a.factor, a.explanation.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `serialize_with` helper writing adjustments as an ordered `{key: explanation}` object
pub fn serialize_explanations<S: Serializer>(
    adjustments: &[Adjustment],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    Explanations(adjustments).serialize(serializer)
}

impl Serialize for Explanations<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for adjustment in self.0 {
            map.serialize_entry(adjustment.factor.key(), &adjustment.explanation)?;
        }
        map.end()
    }
}
