//! Tests for the heuristic estimator

use super::*;
use crate::config::EstimatorConfig;
use crate::error::Error;
use crate::types::{Factor, PredictionRequest, Season};

fn request(budget: f64, genre: &str, rating: f64) -> PredictionRequest {
    PredictionRequest::new(budget, genre, rating, Season::Summer, false, false)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_end_to_end_radhe_shyam() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let req = PredictionRequest::new(150.0, "Romance", 5.8, Season::Other, true, false);

    let result = estimator.predict(&req, &mut FixedVariation::neutral()).unwrap();

    // 150 × 0.9 × 0.8 × 0.9 × 1.2 × 1.0 × 0.7 × 0.6
    let expected = 150.0 * 0.9 * 0.8 * 0.9 * 1.2 * 1.0 * 0.7 * 0.6;
    assert_eq!(result.predicted_revenue_millions, expected);
    assert!(approx_eq(result.predicted_revenue_millions, 48.9888));
    assert!(!result.floored);

    let multipliers: Vec<f64> = result.adjustments.iter().map(|a| a.multiplier).collect();
    assert_eq!(multipliers, vec![0.9, 0.8, 0.9, 1.2, 1.0, 0.7, 0.6]);
}

#[test]
fn test_deterministic_product_with_neutral_draw() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let req = PredictionRequest::new(40.0, "Action", 8.5, Season::Holiday, true, true);

    let result = estimator.predict(&req, &mut FixedVariation::neutral()).unwrap();

    let expected = 40.0 * 3.0 * 1.8 * 1.3 * 1.2 * 1.3 * 1.0 * 1.0;
    assert_eq!(result.predicted_revenue_millions, expected);
    assert_eq!(result.base_revenue_millions, expected);
    assert_eq!(result.variation, 1.0);
}

#[test]
fn test_variation_scales_result() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let req = request(10.0, "Horror", 7.5);

    let result = estimator.predict(&req, &mut FixedVariation(1.15)).unwrap();

    assert!(approx_eq(result.predicted_revenue_millions, result.base_revenue_millions * 1.15));
    assert_eq!(result.variation, 1.15);
}

#[test]
fn test_floor_clamp() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    // 100 × 0.6 × 0.8 × 0.9 × 0.6 = 25.92, below the 30.0 floor
    let req = PredictionRequest::new(100.0, "Romance", 3.0, Season::Other, false, false);

    let result = estimator.predict(&req, &mut FixedVariation::neutral()).unwrap();

    assert_eq!(result.predicted_revenue_millions, 30.0);
    assert!(result.floored);
    assert!(result.base_revenue_millions < 30.0);
}

#[test]
fn test_floor_holds_for_extreme_draws() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let mut draws = ScriptedVariation::new(vec![-1.0, 0.0, 0.01, 0.5, 1.0, 1.6]).unwrap();

    for genre in estimator.genres().names().map(str::to_string).collect::<Vec<_>>() {
        for &budget in &[1.0, 45.0, 120.0, 300.0] {
            for &rating in &[1.0, 4.9, 6.0, 7.4, 9.9] {
                let req = PredictionRequest::new(budget, genre.clone(), rating, Season::Other, false, false);
                let result = estimator.predict(&req, &mut draws).unwrap();
                assert!(result.predicted_revenue_millions >= budget * FLOOR_RATIO);
            }
        }
    }
}

#[test]
fn test_every_genre_is_accepted() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    assert_eq!(estimator.genres().len(), 9);

    for profile in estimator.genres().iter() {
        let req = request(50.0, &profile.name, 7.0);
        let result = estimator.predict(&req, &mut FixedVariation::neutral()).unwrap();

        let text = result.explanation(Factor::Genre).unwrap();
        assert!(text.contains(&profile.name));
        assert!(text.contains(&format!("{:.1}x", profile.multiplier)));
        assert_eq!(result.multiplier(Factor::Genre), Some(profile.multiplier));
    }
}

#[test]
fn test_genre_explanation_text() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let result = estimator
        .predict(&request(50.0, "Animation", 7.0), &mut FixedVariation::neutral())
        .unwrap();
    assert_eq!(
        result.explanation(Factor::Genre),
        Some("Animation movies typically make 2.0x budget")
    );
}

#[test]
fn test_unknown_genre_rejected_without_draw() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let mut mock = variation::MockVariationSource::new();
    mock.expect_draw().never();

    for genre in ["Western", "action", "", "Sci Fi"] {
        let err = estimator.predict(&request(50.0, genre, 7.0), &mut mock).unwrap_err();
        assert!(matches!(err, Error::UnknownGenre(ref g) if g == genre));
    }
}

#[test]
fn test_exactly_one_draw_per_prediction() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let mut mock = variation::MockVariationSource::new();
    mock.expect_draw().times(1).return_const(1.0);

    let result = estimator.predict(&request(20.0, "Drama", 6.5), &mut mock).unwrap();
    assert_eq!(result.variation, 1.0);
}

#[test]
fn test_rating_bands() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let cases = [
        (9.5, 3.0),
        (8.0, 3.0),
        (7.9999, 2.0),
        (7.5, 2.0),
        (7.0, 2.0),
        (6.5, 1.3),
        (6.0, 1.3),
        (5.5, 0.9),
        (5.0, 0.9),
        (4.99, 0.6),
        (3.0, 0.6),
        (-2.0, 0.6),
        (12.0, 3.0),
    ];

    for (rating, expected) in cases {
        let adjustments = estimator.adjustments(&request(10.0, "Comedy", rating)).unwrap();
        assert_eq!(adjustments[0].factor, Factor::Rating);
        assert_eq!(adjustments[0].multiplier, expected, "rating {}", rating);
    }
}

#[test]
fn test_season_multipliers() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    for (season, expected) in [(Season::Summer, 1.4), (Season::Holiday, 1.3), (Season::Other, 0.9)] {
        let req = PredictionRequest::new(10.0, "Comedy", 7.0, season, false, false);
        let result = estimator.predict(&req, &mut FixedVariation::neutral()).unwrap();
        assert_eq!(result.multiplier(Factor::Season), Some(expected));
    }

    let req = PredictionRequest::new(10.0, "Comedy", 7.0, Season::from_label("Monsoon"), false, false);
    let result = estimator.predict(&req, &mut FixedVariation::neutral()).unwrap();
    assert_eq!(
        result.explanation(Factor::Season),
        Some("Off-season releases have fewer viewers")
    );
}

#[test]
fn test_star_and_sequel_always_explained() {
    let estimator = HeuristicRevenueEstimator::with_defaults();

    let plain = estimator.predict(&request(10.0, "Thriller", 7.0), &mut FixedVariation::neutral()).unwrap();
    assert_eq!(plain.multiplier(Factor::Star), Some(1.0));
    assert_eq!(plain.multiplier(Factor::Sequel), Some(1.0));
    assert_eq!(plain.explanation(Factor::Star), Some("No big stars - needs strong marketing"));
    assert_eq!(plain.explanation(Factor::Sequel), Some("Original movie - needs to build audience"));

    let req = PredictionRequest::new(10.0, "Thriller", 7.0, Season::Summer, true, true);
    let boosted = estimator.predict(&req, &mut FixedVariation::neutral()).unwrap();
    assert_eq!(boosted.multiplier(Factor::Star), Some(1.2));
    assert_eq!(boosted.multiplier(Factor::Sequel), Some(1.3));
}

#[test]
fn test_budget_penalty_priority() {
    let estimator = HeuristicRevenueEstimator::with_defaults();

    // Only the >200 rule holds
    let huge = estimator.adjustments(&request(250.0, "Action", 7.0)).unwrap();
    assert_eq!(huge[5].multiplier, 0.6);
    assert_eq!(huge[5].explanation, "Huge budget needs excellent quality to succeed");

    // Both rules hold, the harsher one wins
    let both = estimator.adjustments(&request(250.0, "Action", 6.0)).unwrap();
    assert_eq!(both[5].multiplier, 0.6);

    // Only the >100 rule holds
    let big = estimator.adjustments(&request(150.0, "Action", 6.0)).unwrap();
    assert_eq!(big[5].multiplier, 0.7);
    assert_eq!(big[5].explanation, "Big budget with average quality = High risk");

    // Thresholds are strict
    let at_limit = estimator.adjustments(&request(200.0, "Action", 7.0)).unwrap();
    assert_eq!(at_limit[5].multiplier, 1.0);
    let hundred = estimator.adjustments(&request(100.0, "Action", 5.0)).unwrap();
    assert_eq!(hundred[5].multiplier, 1.0);
    assert_eq!(hundred[5].explanation, "Budget matches quality expectations");

    let good = estimator.adjustments(&request(250.0, "Action", 7.5)).unwrap();
    assert_eq!(good[5].multiplier, 1.0);
}

#[test]
fn test_romance_penalty_independent_of_budget_risk() {
    let estimator = HeuristicRevenueEstimator::with_defaults();

    let result = estimator
        .predict(&request(80.0, "Romance", 8.0), &mut FixedVariation::neutral())
        .unwrap();
    assert_eq!(result.multiplier(Factor::BudgetRisk), Some(1.0));
    assert_eq!(result.multiplier(Factor::GenreRisk), Some(0.6));
    assert_eq!(
        result.explanation(Factor::GenreRisk),
        Some("Romance genre cannot sustain big budgets")
    );
    assert_eq!(result.predicted_revenue_millions, 80.0 * 3.0 * 0.8 * 1.4 * 1.0 * 1.0 * 1.0 * 0.6);

    // Both penalties stack
    let stacked = estimator.adjustments(&request(250.0, "Romance", 6.0)).unwrap();
    assert_eq!(stacked[5].multiplier, 0.6);
    assert_eq!(stacked[6].multiplier, 0.6);
}

#[test]
fn test_genre_risk_messages() {
    let estimator = HeuristicRevenueEstimator::with_defaults();

    let small_romance = estimator.adjustments(&request(50.0, "Romance", 7.0)).unwrap();
    assert_eq!(small_romance[6].multiplier, 1.0);
    assert_eq!(small_romance[6].explanation, "Romance works best with smaller budgets");

    let drama = estimator.adjustments(&request(80.0, "Drama", 7.0)).unwrap();
    assert_eq!(drama[6].multiplier, 1.0);
    assert_eq!(drama[6].explanation, "Genre has reasonable box office potential");
}

#[test]
fn test_explanation_order() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let result = estimator
        .predict(&request(10.0, "Sci-Fi", 6.2), &mut FixedVariation::neutral())
        .unwrap();

    let factors: Vec<Factor> = result.explanations().iter().map(|(f, _)| f).collect();
    assert_eq!(factors, Factor::ALL.to_vec());
}

#[test]
fn test_seeded_variation_is_reproducible() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let req = request(60.0, "Adventure", 7.2);

    let mut a = NormalVariation::seeded(0.15, 42).unwrap();
    let mut b = NormalVariation::seeded(0.15, 42).unwrap();

    for _ in 0..5 {
        let ra = estimator.predict(&req, &mut a).unwrap();
        let rb = estimator.predict(&req, &mut b).unwrap();
        assert_eq!(ra.predicted_revenue_millions, rb.predicted_revenue_millions);
    }
}

#[test]
fn test_normal_variation_statistics() {
    let mut source = NormalVariation::seeded(0.15, 7).unwrap();
    let draws: Vec<f64> = (0..5000).map(|_| source.draw()).collect();

    let mean = draws.iter().sum::<f64>() / draws.len() as f64;
    let variance = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / draws.len() as f64;

    assert!((mean - 1.0).abs() < 0.01, "mean {}", mean);
    assert!((variance.sqrt() - 0.15).abs() < 0.01, "std {}", variance.sqrt());
}

#[test]
fn test_invalid_std_dev_rejected() {
    assert!(matches!(NormalVariation::seeded(-0.1, 1), Err(Error::Distribution(_))));
    assert!(matches!(NormalVariation::seeded(f64::NAN, 1), Err(Error::Distribution(_))));
    assert!(matches!(NormalVariation::seeded(f64::INFINITY, 1), Err(Error::Distribution(_))));
}

#[test]
fn test_negative_std_dev_from_config_rejected() {
    let config = EstimatorConfig {
        variation_std_dev: -0.15,
        seed: Some(7),
    };
    assert!(matches!(NormalVariation::from_config(&config), Err(Error::Distribution(_))));
}

#[test]
fn test_zero_std_dev_is_constant() {
    let mut variation = NormalVariation::seeded(0.0, 3).unwrap();
    for _ in 0..10 {
        assert_eq!(variation.draw(), 1.0);
    }
}

#[test]
fn test_scripted_variation_cycles() {
    let mut scripted = ScriptedVariation::new(vec![0.9, 1.1]).unwrap();
    assert_eq!(scripted.draw(), 0.9);
    assert_eq!(scripted.draw(), 1.1);
    assert_eq!(scripted.draw(), 0.9);
    assert_eq!(scripted.consumed(), 3);
    assert!(ScriptedVariation::new(vec![]).is_err());
}

#[test]
fn test_boxed_source() {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let mut boxed: Box<dyn VariationSource + Send> = Box::new(FixedVariation(2.0));
    let result = estimator.predict(&request(10.0, "Horror", 8.0), &mut boxed).unwrap();
    assert_eq!(result.variation, 2.0);
}

#[test]
fn test_custom_genre_table() {
    let table = GenreTable::new(vec![GenreProfile::new("Western", 1.5, RiskLevel::High, "Dusty")]).unwrap();
    let estimator = HeuristicRevenueEstimator::new(table);

    let result = estimator
        .predict(&request(10.0, "Western", 7.0), &mut FixedVariation::neutral())
        .unwrap();
    assert_eq!(result.multiplier(Factor::Genre), Some(1.5));
    assert!(estimator.predict(&request(10.0, "Action", 7.0), &mut FixedVariation::neutral()).is_err());
}

#[test]
fn test_genre_explanation_keeps_full_multiplier() {
    let table = GenreTable::new(vec![
        GenreProfile::new("Western", 1.25, RiskLevel::High, "Dusty"),
        GenreProfile::new("Musical", 3.0, RiskLevel::Medium, "Loud"),
    ])
    .unwrap();
    let estimator = HeuristicRevenueEstimator::new(table);

    let western = estimator
        .predict(&request(10.0, "Western", 7.0), &mut FixedVariation::neutral())
        .unwrap();
    assert_eq!(
        western.explanation(Factor::Genre),
        Some("Western movies typically make 1.25x budget")
    );

    let musical = estimator
        .predict(&request(10.0, "Musical", 7.0), &mut FixedVariation::neutral())
        .unwrap();
    assert_eq!(
        musical.explanation(Factor::Genre),
        Some("Musical movies typically make 3.0x budget")
    );
}

#[test]
fn test_genre_table_validation() {
    let dup = GenreTable::new(vec![
        GenreProfile::new("Drama", 1.1, RiskLevel::High, ""),
        GenreProfile::new("Drama", 1.2, RiskLevel::High, ""),
    ]);
    assert!(dup.is_err());

    let zero = GenreTable::new(vec![GenreProfile::new("Drama", 0.0, RiskLevel::High, "")]);
    assert!(zero.is_err());
}

#[test]
fn test_genre_menu_positions() {
    let table = GenreTable::standard();
    assert_eq!(table.by_position(1).map(|g| g.name.as_str()), Some("Action"));
    assert_eq!(table.by_position(9).map(|g| g.name.as_str()), Some("Thriller"));
    assert!(table.by_position(0).is_none());
    assert!(table.by_position(10).is_none());
    assert_eq!(table.get("Horror").unwrap().risk, RiskLevel::VeryLow);
    assert_eq!(RiskLevel::VeryHigh.to_string(), "Very High");
}
