use chrono::{Duration, TimeZone, Utc};
use rand::{SeedableRng, rngs::StdRng};

use super::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn predicted_price_stays_within_drift_bounds() {
    let predictor = RandomWalkPredictor::new();
    let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
    let mut rng = seeded_rng();

    for _ in 0..500 {
        let outcome = predictor
            .predict_with_rng(100., PredictionHorizon::OneDay, now, &mut rng)
            .unwrap();

        let drift = (outcome.predicted_price - 100.).abs();
        assert!(drift >= 0.5, "drift {drift} below minimum");
        assert!(drift <= 5.0, "drift {drift} above maximum");
    }
}

#[test]
fn confidence_stays_within_bounds() {
    let predictor = RandomWalkPredictor::new();
    let now = Utc::now();
    let mut rng = seeded_rng();

    for _ in 0..500 {
        let outcome = predictor
            .predict_with_rng(250., PredictionHorizon::SevenDays, now, &mut rng)
            .unwrap();

        let confidence = outcome.confidence.as_f64();
        assert!((0.65..=0.95).contains(&confidence));
    }
}

#[test]
fn prediction_date_matches_horizon() {
    let predictor = RandomWalkPredictor::new();
    let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
    let mut rng = seeded_rng();

    for horizon in PredictionHorizon::ALL {
        let outcome = predictor
            .predict_with_rng(100., horizon, now, &mut rng)
            .unwrap();

        assert_eq!(outcome.horizon, horizon);
        assert_eq!(
            outcome.prediction_date,
            now + Duration::days(horizon.as_days())
        );
    }
}

#[test]
fn outcome_carries_the_model_version() {
    let predictor = RandomWalkPredictor::new();
    let mut rng = seeded_rng();

    let outcome = predictor
        .predict_with_rng(100., PredictionHorizon::OneDay, Utc::now(), &mut rng)
        .unwrap();

    assert_eq!(outcome.model_version, predictor.model_version());
}

#[test]
fn rejects_non_positive_prices() {
    let predictor = RandomWalkPredictor::new();
    let mut rng = seeded_rng();

    for price in [0., -1., f64::NAN, f64::INFINITY] {
        let res = predictor.predict_with_rng(price, PredictionHorizon::OneDay, Utc::now(), &mut rng);
        assert!(res.is_err(), "price {price} must be rejected");
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let predictor = RandomWalkPredictor::new();
    let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();

    let a = predictor
        .predict_with_rng(100., PredictionHorizon::ThirtyDays, now, &mut seeded_rng())
        .unwrap();
    let b = predictor
        .predict_with_rng(100., PredictionHorizon::ThirtyDays, now, &mut seeded_rng())
        .unwrap();

    assert_eq!(a.predicted_price, b.predicted_price);
    assert_eq!(a.confidence, b.confidence);
}
