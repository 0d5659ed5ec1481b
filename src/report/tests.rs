//! Tests for presenter-side analysis

use super::*;
use crate::estimator::{FixedVariation, HeuristicRevenueEstimator};
use crate::types::Season;
use rust_decimal_macros::dec;

#[test]
fn test_financials() {
    let f = Financials::new(dec!(100), dec!(450)).unwrap();
    assert_eq!(f.marketing_cost, dec!(50));
    assert_eq!(f.total_cost, dec!(150));
    assert_eq!(f.profit, dec!(300));
    assert_eq!(f.roi_pct, dec!(200));
}

#[test]
fn test_financials_loss() {
    let f = Financials::new(dec!(150), dec!(75)).unwrap();
    assert_eq!(f.total_cost, dec!(225));
    assert_eq!(f.profit, dec!(-150));
    assert!(f.roi_pct < dec!(-66) && f.roi_pct > dec!(-67));
}

#[test]
fn test_financials_rejects_non_finite() {
    assert!(Financials::from_millions(f64::INFINITY, 10.0).is_err());
    assert!(Financials::from_millions(10.0, f64::NAN).is_err());
    let f = Financials::from_millions(10.0, 40.0).unwrap();
    assert_eq!(f.profit, dec!(25));
}

#[test]
fn test_financials_reject_overflowing_budget() {
    let err = Financials::new(Decimal::MAX, Decimal::ONE).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(ref msg) if msg.contains("too large")));

    // representable as Decimal, but total cost is not
    assert!(matches!(Financials::from_millions(7e28, 1.0), Err(Error::InvalidInput(_))));
}

#[test]
fn test_huge_budget_analysis_is_an_error() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let request = PredictionRequest::new(7e28, "Romance", 1.0, Season::Other, false, false);
    request.validate().unwrap();
    let result = estimator.predict(&request, &mut FixedVariation::neutral()).unwrap();

    assert!(matches!(Analysis::new("Too Big", request, result), Err(Error::InvalidInput(_))));
}

#[test]
fn test_verdict_with_extreme_figures() {
    let huge_profit = Financials {
        budget: Decimal::MAX,
        marketing_cost: Decimal::ZERO,
        total_cost: Decimal::ZERO,
        revenue: Decimal::MAX,
        profit: Decimal::MAX,
        roi_pct: Decimal::ZERO,
    };
    assert_eq!(Verdict::classify(&huge_profit), Verdict::Profitable);
}

#[test]
fn test_verdict_tiers() {
    // budget 100 → total cost 150
    let cases = [
        (dec!(400), Verdict::BlockbusterHit), // profit 250 > 150
        (dec!(300), Verdict::Profitable),     // profit 150, not > 150
        (dec!(151), Verdict::Profitable),
        (dec!(150), Verdict::BreakEven),      // profit 0
        (dec!(121), Verdict::BreakEven),      // profit -29 > -30
        (dec!(120), Verdict::Flop),           // profit -30, not > -30
        (dec!(30), Verdict::Flop),
    ];

    for (revenue, expected) in cases {
        let f = Financials::new(dec!(100), revenue).unwrap();
        assert_eq!(Verdict::classify(&f), expected, "revenue {}", revenue);
    }
}

#[test]
fn test_verdict_labels() {
    assert_eq!(Verdict::BlockbusterHit.label(), "BLOCKBUSTER HIT");
    assert_eq!(Verdict::Flop.label(), "BOX OFFICE FLOP");
    assert!(Verdict::Profitable.is_profitable());
    assert!(!Verdict::BreakEven.is_profitable());
    assert_eq!(serde_json::to_string(&Verdict::BreakEven).unwrap(), "\"BREAK_EVEN\"");
}

#[test]
fn test_risk_warnings() {
    let radhe = PredictionRequest::new(150.0, "Romance", 5.8, Season::Other, true, false);
    assert_eq!(
        RiskWarning::assess(&radhe),
        vec![RiskWarning::HighRisk, RiskWarning::GenreRisk]
    );

    let get_out = PredictionRequest::new(4.5, "Horror", 7.7, Season::Other, false, false);
    let warnings = RiskWarning::assess(&get_out);
    assert_eq!(warnings, vec![RiskWarning::GreatPotential]);
    assert!(warnings[0].is_positive());

    let safe = PredictionRequest::new(60.0, "Action", 7.0, Season::Summer, false, false);
    assert!(RiskWarning::assess(&safe).is_empty());
}

#[test]
fn test_recommendation_tiers() {
    assert_eq!(Recommendation::for_profit(dec!(101)), Recommendation::GoForIt);
    assert_eq!(Recommendation::for_profit(dec!(100)), Recommendation::GoodProject);
    assert_eq!(Recommendation::for_profit(dec!(0.5)), Recommendation::GoodProject);
    assert_eq!(Recommendation::for_profit(Decimal::ZERO), Recommendation::MajorChanges);
    assert_eq!(Recommendation::MajorChanges.steps().len(), 6);
    assert!(Recommendation::GoForIt.steps().contains(&"Start production immediately"));
}

#[test]
fn test_comparisons() {
    let flops = Comparison::for_profit(dec!(-51)).unwrap();
    let names: Vec<&str> = flops.movies.iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["Radhe Shyam", "John Carter", "Acharya"]);

    let hits = Comparison::for_profit(dec!(5)).unwrap();
    let names: Vec<&str> = hits.movies.iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["Black Panther", "Get Out"]);

    assert!(Comparison::for_profit(dec!(-50)).is_none());
    assert!(Comparison::for_profit(Decimal::ZERO).is_none());
}

#[test]
fn test_benchmark_catalog() {
    let all = benchmarks::catalog();
    assert_eq!(all.len(), 9);
    assert_eq!(benchmarks::in_group(BenchmarkGroup::Blockbusters).len(), 3);
    assert_eq!(benchmarks::in_group(BenchmarkGroup::SurpriseHits).len(), 2);
    assert_eq!(benchmarks::in_group(BenchmarkGroup::MajorFlops).len(), 4);

    let radhe = benchmarks::named(&["Radhe Shyam"]).remove(0);
    assert_eq!(radhe.roi_pct().round(), dec!(-47));
}

#[test]
fn test_analysis_for_radhe_shyam() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let request = PredictionRequest::new(150.0, "Romance", 5.8, Season::Other, true, false);
    let result = estimator.predict(&request, &mut FixedVariation::neutral()).unwrap();

    let analysis = Analysis::new("Radhe Shyam", request, result).unwrap();

    // revenue ≈ 48.99, total cost 225
    assert_eq!(analysis.financials.total_cost, dec!(225));
    assert!(analysis.financials.profit < dec!(-176) && analysis.financials.profit > dec!(-177));
    assert_eq!(analysis.verdict, Verdict::Flop);
    assert_eq!(analysis.recommendation, Recommendation::MajorChanges);
    assert_eq!(analysis.warnings.len(), 2);
    assert_eq!(analysis.comparison.unwrap().movies.len(), 3);
}

#[test]
fn test_format_millions() {
    assert_eq!(format_millions(dec!(48.9888)), "$49M");
    assert_eq!(format_millions(dec!(1234567.4)), "$1,234,567M");
    assert_eq!(format_millions(dec!(999)), "$999M");
    assert_eq!(format_millions(dec!(-176.01)), "$-176M");
    assert_eq!(format_millions(dec!(-0.2)), "$0M");
    assert_eq!(format_millions(dec!(1000)), "$1,000M");
}

#[test]
fn test_format_pct() {
    assert_eq!(format_pct(dec!(12.34)), "+12.3%");
    assert_eq!(format_pct(dec!(-78.23)), "-78.2%");
    assert_eq!(format_pct(Decimal::ZERO), "+0.0%");
}
