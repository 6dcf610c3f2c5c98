//! Day arithmetic for expiration dates.
//!
//! An expiration date denotes midnight UTC at the start of that day. Days left
//! is the signed distance from `now` to that instant, rounded up to whole days,
//! so any partial day counts as a full one.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// `ceil((expiration - now) / 1 day)`.
pub fn days_until(expiration: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expires_at = expiration.and_time(NaiveTime::MIN).and_utc();
    let millis = (expires_at - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// Strictly in the future and within `alert_days`. Already expired items are excluded.
pub fn is_expiring_soon(expiration: NaiveDate, now: DateTime<Utc>, alert_days: i64) -> bool {
    let days = days_until(expiration, now);
    days > 0 && days <= alert_days
}

/// Display form of the remaining shelf life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DaysLeft {
    Days(i64),
    Expired,
}

impl DaysLeft {
    pub fn from_days(days: i64) -> Self {
        if days > 0 {
            DaysLeft::Days(days)
        } else {
            DaysLeft::Expired
        }
    }

    pub fn compute(expiration: NaiveDate, now: DateTime<Utc>) -> Self {
        Self::from_days(days_until(expiration, now))
    }
}

impl core::fmt::Display for DaysLeft {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DaysLeft::Days(d) => write!(f, "{d} days"),
            DaysLeft::Expired => f.write_str("Expired"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn partial_days_round_up() {
        let now = noon(2024, 1, 1);
        assert_eq!(days_until(date(2024, 1, 2), now), 1);
        assert_eq!(days_until(date(2024, 1, 31), now), 30);
        assert_eq!(days_until(date(2024, 2, 1), now), 31);
    }

    #[test]
    fn today_and_past_are_not_positive() {
        let now = noon(2024, 1, 1);
        // Midnight today is 12h in the past -> ceil(-0.5) = 0.
        assert_eq!(days_until(date(2024, 1, 1), now), 0);
        assert_eq!(days_until(date(2023, 12, 31), now), -1);
    }

    #[test]
    fn exact_midnight_is_exact() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(days_until(date(2024, 1, 1), now), 0);
        assert_eq!(days_until(date(2024, 1, 4), now), 3);
    }

    #[test]
    fn expiring_soon_window_is_inclusive_of_the_last_day() {
        let now = noon(2024, 1, 1);
        assert!(is_expiring_soon(date(2024, 1, 31), now, 30));
        assert!(!is_expiring_soon(date(2024, 2, 1), now, 30));
        assert!(!is_expiring_soon(date(2024, 1, 1), now, 30));
        assert!(!is_expiring_soon(date(2023, 6, 1), now, 30));
    }

    #[test]
    fn days_left_display() {
        assert_eq!(DaysLeft::from_days(5).to_string(), "5 days");
        assert_eq!(DaysLeft::from_days(0), DaysLeft::Expired);
        assert_eq!(DaysLeft::from_days(-3).to_string(), "Expired");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: days_until is the smallest whole number of days d such that
        /// now + d days reaches the expiration instant.
        #[test]
        fn days_until_is_a_ceiling(offset_secs in -400i64 * 86_400..400i64 * 86_400) {
            let exp = date(2024, 6, 15);
            let midnight = exp.and_time(NaiveTime::MIN).and_utc();
            let now = midnight - Duration::seconds(offset_secs);
            let d = days_until(exp, now);
            prop_assert!(now + Duration::days(d) >= midnight);
            prop_assert!(now + Duration::days(d - 1) < midnight);
        }
    }
}
