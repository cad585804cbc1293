//! Coarse relative age of a todo, for "3 hours ago" style labels.

use chrono::{DateTime, Utc};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Largest whole unit elapsed between creation and now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeAge {
    /// Less than a minute, or in the future.
    JustNow,
    Minutes(i64),
    Hours(i64),
    Days(i64),
    Weeks(i64),
    /// 30-day months.
    Months(i64),
    /// 365-day years.
    Years(i64),
}

pub fn relative_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> RelativeAge {
    let elapsed = (now - created_at).num_milliseconds();
    if elapsed < MINUTE_MS {
        RelativeAge::JustNow
    } else if elapsed < HOUR_MS {
        RelativeAge::Minutes(elapsed / MINUTE_MS)
    } else if elapsed < DAY_MS {
        RelativeAge::Hours(elapsed / HOUR_MS)
    } else if elapsed < WEEK_MS {
        RelativeAge::Days(elapsed / DAY_MS)
    } else if elapsed < MONTH_MS {
        RelativeAge::Weeks(elapsed / WEEK_MS)
    } else if elapsed < YEAR_MS {
        RelativeAge::Months(elapsed / MONTH_MS)
    } else {
        RelativeAge::Years(elapsed / YEAR_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::{relative_age, RelativeAge};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn picks_largest_whole_unit() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let cases = [
            (Duration::seconds(59), RelativeAge::JustNow),
            (Duration::minutes(3), RelativeAge::Minutes(3)),
            (Duration::hours(2), RelativeAge::Hours(2)),
            (Duration::days(1), RelativeAge::Days(1)),
            (Duration::days(13), RelativeAge::Weeks(1)),
            (Duration::days(31), RelativeAge::Months(1)),
            (Duration::days(800), RelativeAge::Years(2)),
        ];
        for (ago, expected) in cases {
            assert_eq!(relative_age(now - ago, now), expected, "ago={ago}");
        }
    }

    #[test]
    fn future_timestamps_are_just_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(
            relative_age(now + Duration::hours(1), now),
            RelativeAge::JustNow
        );
    }
}
