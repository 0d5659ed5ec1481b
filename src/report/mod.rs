//! Presenter-side analysis of a prediction
//!
//! Turns an estimator result into the figures and canned guidance shown to
//! users: cost breakdown, profit and ROI, a verdict tier, risk warnings,
//! recommended actions and real-world comparisons. Shared by the console
//! and the web dashboard.

pub mod benchmarks;

#[cfg(test)]
mod tests;

pub use benchmarks::{BenchmarkGroup, BenchmarkMovie};

use crate::error::{Error, Result};
use crate::estimator::ROMANCE;
use crate::types::{PredictionRequest, PredictionResult};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Marketing spend as a share of the production budget
pub const MARKETING_RATIO: Decimal = dec!(0.5);

/// Cost and return figures, in millions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Financials {
    pub budget: Decimal,
    pub marketing_cost: Decimal,
    pub total_cost: Decimal,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub roi_pct: Decimal,
}

impl Financials {
    /// Fails with `InvalidInput` when the amounts are too large for exact arithmetic
    pub fn new(budget: Decimal, revenue: Decimal) -> Result<Self> {
        let overflow = || Error::InvalidInput(format!("budget {} is too large to evaluate", budget));

        let marketing_cost = budget.checked_mul(MARKETING_RATIO).ok_or_else(overflow)?;
        let total_cost = budget.checked_add(marketing_cost).ok_or_else(overflow)?;
        let profit = revenue.checked_sub(total_cost).ok_or_else(overflow)?;
        let roi_pct = if total_cost.is_zero() {
            Decimal::ZERO
        } else {
            profit
                .checked_div(total_cost)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or_else(overflow)?
        };

        Ok(Self {
            budget,
            marketing_cost,
            total_cost,
            revenue,
            profit,
            roi_pct,
        })
    }

    pub fn from_millions(budget: f64, revenue: f64) -> Result<Self> {
        Self::new(to_decimal(budget, "budget")?, to_decimal(revenue, "revenue")?)
    }
}

fn to_decimal(value: f64, what: &str) -> Result<Decimal> {
    Decimal::from_f64(value)
        .ok_or_else(|| Error::InvalidInput(format!("{} is not a representable amount: {}", what, value)))
}

/// Outcome tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    BlockbusterHit,
    Profitable,
    BreakEven,
    Flop,
}

impl Verdict {
    pub fn classify(financials: &Financials) -> Self {
        let Financials { budget, profit, .. } = *financials;
        // A bar that overflows can never be cleared
        let blockbuster_bar = budget.checked_mul(dec!(1.5));
        let break_even_bar = budget.checked_mul(dec!(-0.3));

        if blockbuster_bar.is_some_and(|bar| profit > bar) {
            Verdict::BlockbusterHit
        } else if profit > Decimal::ZERO {
            Verdict::Profitable
        } else if break_even_bar.is_some_and(|bar| profit > bar) {
            Verdict::BreakEven
        } else {
            Verdict::Flop
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::BlockbusterHit => "BLOCKBUSTER HIT",
            Verdict::Profitable => "PROFITABLE",
            Verdict::BreakEven => "BREAK-EVEN",
            Verdict::Flop => "BOX OFFICE FLOP",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::BlockbusterHit => "Exceptional success! Similar to major Hollywood hits.",
            Verdict::Profitable => "Good investment! Should make solid profit.",
            Verdict::BreakEven => "Might break even or small loss. Needs careful management.",
            Verdict::Flop => "High risk of significant losses. Major changes needed.",
        }
    }

    pub fn is_profitable(&self) -> bool {
        matches!(self, Verdict::BlockbusterHit | Verdict::Profitable)
    }
}

/// Warning shown before running a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskWarning {
    /// Big budget paired with an average or poor rating
    HighRisk,
    /// Big-budget romance
    GenreRisk,
    /// Cheap, well-made horror
    GreatPotential,
}

impl RiskWarning {
    /// All warnings that apply to a request, in display order
    pub fn assess(request: &PredictionRequest) -> Vec<RiskWarning> {
        let mut warnings = Vec::new();
        if request.budget_millions > 100.0 && request.quality_rating < 7.0 {
            warnings.push(RiskWarning::HighRisk);
        }
        if request.genre == ROMANCE && request.budget_millions > 50.0 {
            warnings.push(RiskWarning::GenreRisk);
        }
        if request.budget_millions < 20.0 && request.genre == "Horror" && request.quality_rating > 7.0 {
            warnings.push(RiskWarning::GreatPotential);
        }
        warnings
    }

    pub fn title(&self) -> &'static str {
        match self {
            RiskWarning::HighRisk => "HIGH RISK DETECTED",
            RiskWarning::GenreRisk => "GENRE RISK DETECTED",
            RiskWarning::GreatPotential => "Great Potential!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskWarning::HighRisk => {
                "Big budget with average/poor rating often leads to HUGE LOSSES. \
                 Movies like John Carter, Radhe Shyam, Acharya failed this way."
            }
            RiskWarning::GenreRisk => {
                "Romance genre with big budget is VERY RISKY. \
                 Romance movies rarely recover big investments. Radhe Shyam lost $70M this way."
            }
            RiskWarning::GreatPotential => {
                "Low-budget horror with good quality can be very profitable. Similar to Get Out success."
            }
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, RiskWarning::GreatPotential)
    }
}

/// Recommended course of action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    GoForIt,
    GoodProject,
    MajorChanges,
}

impl Recommendation {
    pub fn for_profit(profit: Decimal) -> Self {
        if profit > dec!(100) {
            Recommendation::GoForIt
        } else if profit > Decimal::ZERO {
            Recommendation::GoodProject
        } else {
            Recommendation::MajorChanges
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Recommendation::GoForIt => "Go For It!",
            Recommendation::GoodProject => "Good Project",
            Recommendation::MajorChanges => "MAJOR CHANGES NEEDED!",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Recommendation::GoForIt => "Your movie shows excellent profit potential.",
            Recommendation::GoodProject => "Your movie should make money. Be smart about it.",
            Recommendation::MajorChanges => "Your movie will likely lose money. URGENT changes required.",
        }
    }

    pub fn steps(&self) -> &'static [&'static str] {
        match self {
            Recommendation::GoForIt => &[
                "Start production immediately",
                "Plan strong marketing campaign",
                "Consider international release",
                "Think about sequel potential",
            ],
            Recommendation::GoodProject => &[
                "Manage budget carefully",
                "Focus marketing on right audience",
                "Consider partners to reduce risk",
                "Track expenses closely",
            ],
            Recommendation::MajorChanges => &[
                "REDUCE BUDGET by 40-60% immediately",
                "IMPROVE QUALITY to 7.5+ rating",
                "CONSIDER GENRE CHANGE to Action/Horror",
                "MOVE TO SUMMER release window",
                "ADD A-LIST DIRECTOR for better execution",
                "FOCUS ON GLOBAL APPEAL, not niche audience",
            ],
        }
    }
}

/// Real movies with a similar outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub heading: &'static str,
    pub movies: Vec<BenchmarkMovie>,
}

impl Comparison {
    /// None when the outcome is a modest loss
    pub fn for_profit(profit: Decimal) -> Option<Self> {
        if profit < dec!(-50) {
            Some(Self {
                heading: "Similar to MAJOR BOX OFFICE FLOPS",
                movies: benchmarks::named(&["Radhe Shyam", "John Carter", "Acharya"]),
            })
        } else if profit > Decimal::ZERO {
            Some(Self {
                heading: "Similar to successful movies",
                movies: benchmarks::named(&["Black Panther", "Get Out"]),
            })
        } else {
            None
        }
    }
}

/// Everything a presenter shows for one heuristic prediction
#[derive(Debug, Clone)]
pub struct Analysis {
    pub title: String,
    pub request: PredictionRequest,
    pub result: PredictionResult,
    pub financials: Financials,
    pub verdict: Verdict,
    pub warnings: Vec<RiskWarning>,
    pub recommendation: Recommendation,
    pub comparison: Option<Comparison>,
}

impl Analysis {
    pub fn new(title: impl Into<String>, request: PredictionRequest, result: PredictionResult) -> Result<Self> {
        let financials = Financials::from_millions(request.budget_millions, result.predicted_revenue_millions)?;
        let verdict = Verdict::classify(&financials);
        let warnings = RiskWarning::assess(&request);
        let recommendation = Recommendation::for_profit(financials.profit);
        let comparison = Comparison::for_profit(financials.profit);

        Ok(Self {
            title: title.into(),
            request,
            result,
            financials,
            verdict,
            warnings,
            recommendation,
            comparison,
        })
    }
}

/// `$1,234M` style amount, rounded to whole millions
pub fn format_millions(value: Decimal) -> String {
    format!("${}M", group_thousands(value.round_dp(0)))
}

/// `+12.3%` style percentage
pub fn format_pct(value: Decimal) -> String {
    let rounded = value.round_dp(1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{:.1}%", rounded)
    } else {
        format!("+{:.1}%", rounded.abs())
    }
}

fn group_thousands(value: Decimal) -> String {
    let digits = value.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value.is_sign_negative() && !value.is_zero() {
        grouped.insert(0, '-');
    }
    grouped
}
