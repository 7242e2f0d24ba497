use super::*;

mod prediction_horizon {
    use super::*;

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(PredictionHorizon::OneDay.to_string(), "1D");
        assert_eq!(PredictionHorizon::SevenDays.to_string(), "7D");
        assert_eq!(PredictionHorizon::ThirtyDays.to_string(), "30D");
    }

    #[test]
    fn parses_wire_format() {
        assert_eq!(
            "1D".parse::<PredictionHorizon>().unwrap(),
            PredictionHorizon::OneDay
        );
        assert_eq!(
            "30D".parse::<PredictionHorizon>().unwrap(),
            PredictionHorizon::ThirtyDays
        );
    }

    #[test]
    fn rejects_unknown_horizon() {
        assert!("2W".parse::<PredictionHorizon>().is_err());
        assert!("".parse::<PredictionHorizon>().is_err());
    }

    #[test]
    fn as_days() {
        assert_eq!(PredictionHorizon::OneDay.as_days(), 1);
        assert_eq!(PredictionHorizon::SevenDays.as_days(), 7);
        assert_eq!(PredictionHorizon::ThirtyDays.as_days(), 30);
    }
}

mod asset_kind {
    use super::*;

    #[test]
    fn round_trips_through_strings() {
        assert_eq!(AssetKind::Stock.to_string(), "STOCK");
        assert_eq!("CRYPTO".parse::<AssetKind>().unwrap(), AssetKind::Crypto);
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!("BOND".parse::<AssetKind>().is_err());
    }
}

mod subscription_plan {
    use super::*;

    #[test]
    fn default_is_free() {
        assert_eq!(SubscriptionPlan::default(), SubscriptionPlan::Free);
    }

    #[test]
    fn free_tier_excludes_thirty_days() {
        let allowed = SubscriptionPlan::Free.allowed_horizons();
        assert!(allowed.contains(&PredictionHorizon::OneDay));
        assert!(allowed.contains(&PredictionHorizon::SevenDays));
        assert!(!allowed.contains(&PredictionHorizon::ThirtyDays));
    }

    #[test]
    fn premium_tier_sees_everything() {
        assert_eq!(
            SubscriptionPlan::Premium.allowed_horizons(),
            &PredictionHorizon::ALL
        );
    }

    #[test]
    fn parses_lowercase() {
        assert_eq!(
            "premium".parse::<SubscriptionPlan>().unwrap(),
            SubscriptionPlan::Premium
        );
    }
}

mod confidence_score {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(ConfidenceScore::try_from(0.).unwrap().as_f64(), 0.);
        assert_eq!(ConfidenceScore::try_from(1.).unwrap().as_f64(), 1.);
        assert_eq!(ConfidenceScore::try_from(0.73).unwrap().as_f64(), 0.73);
    }

    #[test]
    fn rejects_out_of_bounds() {
        assert!(ConfidenceScore::try_from(-0.01).is_err());
        assert!(ConfidenceScore::try_from(1.01).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(ConfidenceScore::try_from(f64::NAN).is_err());
        assert!(ConfidenceScore::try_from(f64::INFINITY).is_err());
    }
}

mod sentiment_score {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(SentimentScore::try_from(0.).is_ok());
        assert!(SentimentScore::try_from(1.).is_ok());
    }

    #[test]
    fn rejects_legacy_negative_scores() {
        // The original data source emitted [-1, 1]; the platform stores [0, 1] only.
        assert!(SentimentScore::try_from(-0.5).is_err());
    }
}

mod ticker_symbol {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let ticker = TickerSymbol::try_from(" aapl ").unwrap();
        assert_eq!(ticker.as_str(), "AAPL");
    }

    #[test]
    fn accepts_class_share_separators() {
        assert!(TickerSymbol::try_from("BRK.B").is_ok());
        assert!(TickerSymbol::try_from("BTC-USD").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(TickerSymbol::try_from("   ").is_err());
    }

    #[test]
    fn rejects_too_long() {
        assert!(TickerSymbol::try_from("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(TickerSymbol::try_from("AA PL").is_err());
        assert!(TickerSymbol::try_from("AAPL$").is_err());
    }
}
