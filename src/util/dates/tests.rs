use super::*;
use chrono::TimeZone;

mod floor_day {
    use super::*;

    #[test]
    fn already_at_midnight() {
        let time = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        assert_eq!(time.floor_day(), time);
    }

    #[test]
    fn floors_intraday_time() {
        let time = Utc.with_ymd_and_hms(2026, 8, 1, 14, 30, 59).unwrap();
        assert_eq!(
            time.floor_day(),
            Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn handles_year_boundary() {
        let time = Utc.with_ymd_and_hms(2026, 1, 1, 23, 59, 59).unwrap();
        assert_eq!(
            time.floor_day(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
        );
    }
}

mod is_round_day {
    use super::*;

    #[test]
    fn midnight_is_round() {
        let time = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        assert!(time.is_round_day());
    }

    #[test]
    fn intraday_is_not_round() {
        let time = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 1).unwrap();
        assert!(!time.is_round_day());
    }
}
