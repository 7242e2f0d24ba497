use super::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

mod evaluate {
    use super::*;

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(AssetStatsEvaluator::evaluate(&[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn non_finite_close_is_an_error() {
        let closes = [100., f64::NAN];
        assert_eq!(
            AssetStatsEvaluator::evaluate(&closes),
            Err(StatsError::NonFiniteClose { index: 1 })
        );
    }

    #[test]
    fn non_positive_close_is_an_error() {
        let closes = [100., 0.];
        assert_eq!(
            AssetStatsEvaluator::evaluate(&closes),
            Err(StatsError::NonPositiveClose { index: 1, value: 0. })
        );
    }

    #[test]
    fn short_series_yields_no_values() {
        let closes = [100., 101.];
        let values = AssetStatsEvaluator::evaluate(&closes).unwrap();

        assert_eq!(values.ma_50, None);
        assert_eq!(values.ma_200, None);
        assert_eq!(values.rsi, None);
        // Two closes produce a single return, below the volatility minimum
        assert_eq!(values.volatility, None);
    }

    #[test]
    fn windows_fill_independently() {
        // 60 closes: enough for MA-50, RSI and volatility, not for MA-200
        let closes: Vec<f64> = (1..=60).map(|i| 100. + i as f64).collect();
        let values = AssetStatsEvaluator::evaluate(&closes).unwrap();

        assert!(values.ma_50.is_some());
        assert_eq!(values.ma_200, None);
        assert!(values.rsi.is_some());
        assert!(values.volatility.is_some());
    }

    #[test]
    fn full_series_fills_everything() {
        let closes: Vec<f64> = (1..=AssetStatsEvaluator::FULL_WINDOW)
            .map(|i| 100. + (i % 7) as f64)
            .collect();
        let values = AssetStatsEvaluator::evaluate(&closes).unwrap();

        assert!(values.ma_50.is_some());
        assert!(values.ma_200.is_some());
        assert!(values.rsi.is_some());
        assert!(values.volatility.is_some());
    }
}

mod moving_average {
    use super::*;

    #[test]
    fn ma_50_of_constant_series_is_the_constant() {
        let closes = [42.; 50];
        let values = AssetStatsEvaluator::evaluate(&closes).unwrap();
        assert_close(values.ma_50.unwrap(), 42.);
    }

    #[test]
    fn ma_50_uses_only_the_trailing_window() {
        // 50 ones followed by 50 threes: the trailing window is all threes
        let closes: Vec<f64> = std::iter::repeat_n(1., 50)
            .chain(std::iter::repeat_n(3., 50))
            .collect();
        let values = AssetStatsEvaluator::evaluate(&closes).unwrap();
        assert_close(values.ma_50.unwrap(), 3.);
    }
}

mod rsi {
    use super::*;

    #[test]
    fn all_gains_is_one_hundred() {
        let closes: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let values = AssetStatsEvaluator::evaluate(&closes).unwrap();
        assert_close(values.rsi.unwrap(), 100.);
    }

    #[test]
    fn balanced_gains_and_losses_is_fifty() {
        // 14 deltas alternating +1/-1: average gain equals average loss
        let mut closes = vec![10.];
        for i in 0..14 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last + 1. } else { last - 1. });
        }

        let values = AssetStatsEvaluator::evaluate(&closes).unwrap();
        assert_close(values.rsi.unwrap(), 50.);
    }

    #[test]
    fn needs_a_full_seed_window() {
        // 14 closes produce only 13 deltas
        let closes: Vec<f64> = (1..=14).map(|i| i as f64).collect();
        let values = AssetStatsEvaluator::evaluate(&closes).unwrap();
        assert_eq!(values.rsi, None);
    }
}

mod volatility {
    use super::*;

    #[test]
    fn constant_series_has_zero_volatility() {
        let closes = [100.; 10];
        let values = AssetStatsEvaluator::evaluate(&closes).unwrap();
        assert_close(values.volatility.unwrap(), 0.);
    }

    #[test]
    fn known_small_series() {
        // Returns: +0.1, -0.1, +0.1
        let closes = [100., 110., 99., 108.9];
        let values = AssetStatsEvaluator::evaluate(&closes).unwrap();

        let returns = [0.1, -0.1, 0.1];
        let mean: f64 = returns.iter().sum::<f64>() / 3.;
        let variance: f64 = returns.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / 3.;
        assert!((values.volatility.unwrap() - variance.sqrt()).abs() < 1e-6);
    }
}
