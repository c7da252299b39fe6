//! Tests for clocks and calendar quarters

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::{Clock, FixedClock, Quarter, SystemClock};

mod quarters {
    use super::*;

    #[test]
    fn test_every_month_maps_to_its_quarter() {
        let expected = [
            Quarter::Q1, Quarter::Q1, Quarter::Q1,
            Quarter::Q2, Quarter::Q2, Quarter::Q2,
            Quarter::Q3, Quarter::Q3, Quarter::Q3,
            Quarter::Q4, Quarter::Q4, Quarter::Q4,
        ];
        for (index, quarter) in expected.iter().enumerate() {
            let month = index as u32 + 1;
            let date = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();
            assert_eq!(Quarter::of_date(date), *quarter, "month {}", month);
        }
    }

    #[test]
    fn test_quarter_of_instant_uses_utc_date() {
        let last_moment_of_q1 = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        assert_eq!(Quarter::of_instant(last_moment_of_q1), Quarter::Q1);
    }

    #[test]
    fn test_quarter_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Quarter::Q2).unwrap(), "\"Q2\"");
        let parsed: Quarter = serde_json::from_str("\"Q4\"").unwrap();
        assert_eq!(parsed, Quarter::Q4);
    }
}

mod clocks {
    use super::*;

    #[test]
    fn test_fixed_clock_never_advances() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_is_monotone_enough() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
