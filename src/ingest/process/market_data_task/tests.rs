use chrono::TimeZone;

use super::*;

fn crypto_quote(json: &str) -> CryptoQuote {
    serde_json::from_str(json).expect("must deserialize quote")
}

fn stock_quote(json: &str) -> StockQuote {
    serde_json::from_str(json).expect("must deserialize quote")
}

mod crypto_day_entry {
    use super::*;

    fn bucket() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn derives_open_from_24h_change() {
        let quote = crypto_quote(
            r#"{"price": 110.0, "percent_change_24h": 10.0, "volume_24h": 5000.5, "market_cap": 1.0}"#,
        );

        let entry = MarketDataTask::crypto_day_entry(bucket(), 110., &quote);

        assert!((entry.open - 100.).abs() < 1e-9);
        assert_eq!(entry.close, 110.);
        assert_eq!(entry.high, 110.);
        assert!((entry.low - 100.).abs() < 1e-9);
        assert_eq!(entry.volume, 5000);
        assert!(entry.is_ohlc_consistent());
    }

    #[test]
    fn negative_change_inverts_the_envelope() {
        let quote = crypto_quote(r#"{"price": 90.0, "percent_change_24h": -10.0}"#);

        let entry = MarketDataTask::crypto_day_entry(bucket(), 90., &quote);

        assert!((entry.open - 100.).abs() < 1e-9);
        assert_eq!(entry.low, 90.);
        assert!(entry.high > entry.low);
        assert!(entry.is_ohlc_consistent());
    }

    #[test]
    fn missing_change_collapses_to_a_flat_entry() {
        let quote = crypto_quote(r#"{"price": 50.0}"#);

        let entry = MarketDataTask::crypto_day_entry(bucket(), 50., &quote);

        assert_eq!(entry.open, 50.);
        assert_eq!(entry.high, 50.);
        assert_eq!(entry.low, 50.);
        assert_eq!(entry.volume, 0);
        assert!(entry.is_ohlc_consistent());
    }

    #[test]
    fn pathological_change_falls_back_to_the_price() {
        // A -100% change would make the derived open infinite
        let quote = crypto_quote(r#"{"price": 10.0, "percent_change_24h": -100.0}"#);

        let entry = MarketDataTask::crypto_day_entry(bucket(), 10., &quote);

        assert_eq!(entry.open, 10.);
        assert!(entry.is_ohlc_consistent());
    }
}

mod stock_day_entry {
    use super::*;

    #[test]
    fn maps_the_session_quote() {
        let quote =
            stock_quote(r#"{"c": 227.5, "h": 229.8, "l": 224.8, "o": 226.5, "pc": 224.1, "t": 1}"#);

        let entry = MarketDataTask::stock_day_entry(&quote);

        assert_eq!(entry.open, 226.5);
        assert_eq!(entry.close, 227.5);
        assert_eq!(entry.high, 229.8);
        assert_eq!(entry.low, 224.8);
        assert!(entry.is_ohlc_consistent());
    }

    #[test]
    fn clamps_a_stale_envelope() {
        // Session high below the current price: the entry is clamped instead of rejected
        let quote =
            stock_quote(r#"{"c": 231.0, "h": 229.8, "l": 224.8, "o": 226.5, "pc": 224.1, "t": 1}"#);

        let entry = MarketDataTask::stock_day_entry(&quote);

        assert_eq!(entry.high, 231.0);
        assert!(entry.is_ohlc_consistent());
    }
}
