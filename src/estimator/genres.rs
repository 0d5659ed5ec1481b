//! Genre reference table

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Box-office risk tag, informational only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::VeryLow => "Very Low",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        };
        f.write_str(label)
    }
}

/// Static data for one genre
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreProfile {
    pub name: String,
    /// Revenue-to-budget scaling factor
    pub multiplier: f64,
    pub risk: RiskLevel,
    pub description: String,
}

impl GenreProfile {
    pub fn new(name: &str, multiplier: f64, risk: RiskLevel, description: &str) -> Self {
        Self {
            name: name.to_string(),
            multiplier,
            risk,
            description: description.to_string(),
        }
    }
}

/// Immutable genre lookup, kept in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GenreTable {
    profiles: Vec<GenreProfile>,
}

impl GenreTable {
    /// Build a table, rejecting duplicate names and non-positive multipliers
    pub fn new(profiles: Vec<GenreProfile>) -> Result<Self> {
        for (i, profile) in profiles.iter().enumerate() {
            if !(profile.multiplier.is_finite() && profile.multiplier > 0.0) {
                return Err(Error::InvalidInput(format!(
                    "Genre {} has non-positive multiplier {}",
                    profile.name, profile.multiplier
                )));
            }
            if profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(Error::InvalidInput(format!(
                    "Genre {} listed twice",
                    profile.name
                )));
            }
        }
        Ok(Self { profiles })
    }

    /// The nine supported genres
    pub fn standard() -> Self {
        use RiskLevel::*;
        Self {
            profiles: vec![
                GenreProfile::new("Action", 1.8, Medium, "Global appeal, good ROI"),
                GenreProfile::new("Adventure", 1.7, Medium, "Family friendly, stable"),
                GenreProfile::new("Animation", 2.0, Low, "Best for families, great ROI"),
                GenreProfile::new("Comedy", 1.3, High, "Domestic focus, mixed results"),
                GenreProfile::new("Drama", 1.1, VeryHigh, "Niche audience, risky"),
                GenreProfile::new("Horror", 2.5, VeryLow, "Best ROI, low budget works"),
                GenreProfile::new("Romance", 0.8, VeryHigh, "Limited audience, high risk"),
                GenreProfile::new("Sci-Fi", 1.6, Medium, "Global but expensive"),
                GenreProfile::new("Thriller", 1.2, Medium, "Adult audience, steady"),
            ],
        }
    }

    /// Exact-name lookup
    pub fn get(&self, name: &str) -> Result<&GenreProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UnknownGenre(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.iter().any(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenreProfile> {
        self.profiles.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    /// 1-based menu choice
    pub fn by_position(&self, choice: usize) -> Option<&GenreProfile> {
        choice.checked_sub(1).and_then(|i| self.profiles.get(i))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for GenreTable {
    fn default() -> Self {
        Self::standard()
    }
}
