//! Real-world box-office reference points

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BenchmarkGroup {
    Blockbusters,
    #[serde(rename = "Surprise Hits")]
    SurpriseHits,
    #[serde(rename = "Major Flops")]
    MajorFlops,
}

impl BenchmarkGroup {
    pub const ALL: [BenchmarkGroup; 3] = [
        BenchmarkGroup::Blockbusters,
        BenchmarkGroup::SurpriseHits,
        BenchmarkGroup::MajorFlops,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BenchmarkGroup::Blockbusters => "Blockbusters",
            BenchmarkGroup::SurpriseHits => "Surprise Hits",
            BenchmarkGroup::MajorFlops => "Major Flops",
        }
    }
}

/// A released movie, figures in millions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkMovie {
    pub name: &'static str,
    pub group: BenchmarkGroup,
    pub budget: Decimal,
    pub revenue: Decimal,
    pub profit: Decimal,
}

impl BenchmarkMovie {
    /// Profit relative to production budget, in percent
    pub fn roi_pct(&self) -> Decimal {
        if self.budget.is_zero() {
            return Decimal::ZERO;
        }
        self.profit / self.budget * Decimal::ONE_HUNDRED
    }
}

/// All reference movies, grouped in display order
pub fn catalog() -> Vec<BenchmarkMovie> {
    use BenchmarkGroup::*;
    let movie = |name: &'static str, group, budget, revenue, profit| BenchmarkMovie {
        name,
        group,
        budget,
        revenue,
        profit,
    };

    vec![
        movie("Avatar", Blockbusters, dec!(237), dec!(2923), dec!(2686)),
        movie("Avengers: Endgame", Blockbusters, dec!(356), dec!(2798), dec!(2442)),
        movie("Black Panther", Blockbusters, dec!(200), dec!(1347), dec!(1147)),
        movie("Get Out", SurpriseHits, dec!(4.5), dec!(255), dec!(250)),
        movie("Paranormal Activity", SurpriseHits, dec!(0.015), dec!(193), dec!(193)),
        movie("John Carter", MajorFlops, dec!(263), dec!(284), dec!(-200)),
        movie("The Lone Ranger", MajorFlops, dec!(225), dec!(261), dec!(-150)),
        movie("Radhe Shyam", MajorFlops, dec!(150), dec!(80), dec!(-70)),
        movie("Acharya", MajorFlops, dec!(140), dec!(60), dec!(-80)),
    ]
}

pub fn in_group(group: BenchmarkGroup) -> Vec<BenchmarkMovie> {
    catalog().into_iter().filter(|m| m.group == group).collect()
}

/// Look up movies by name, preserving the requested order
pub fn named(names: &[&str]) -> Vec<BenchmarkMovie> {
    let all = catalog();
    names
        .iter()
        .filter_map(|name| all.iter().find(|m| m.name == *name).cloned())
        .collect()
}
