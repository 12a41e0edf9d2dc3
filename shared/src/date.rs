//! Time helpers
//!
//! Turns listing timestamps into the short labels shown on cards
//! ("Today", "3 days ago", ...).

use chrono::{DateTime, Utc};

// =========================================================
// Relative labels
// =========================================================

/// Label for when an ad was posted, relative to `now`.
///
/// Calendar days are compared in UTC, so an ad posted late yesterday is
/// "Yesterday" even if fewer than 24 hours have passed.
pub fn posted_label(posted: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now.date_naive() - posted.date_naive()).num_days();
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=13 => "1 week ago".to_string(),
        14..=29 => format!("{} weeks ago", days / 7),
        _ => posted.format("%d %b %Y").to_string(),
    }
}

/// Long form used on the ad details page, e.g. `"01 Oct 2026"`.
pub fn full_date(at: DateTime<Utc>) -> String {
    at.format("%d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_same_day_is_today() {
        assert_eq!(posted_label(at(2026, 10, 17, 1), at(2026, 10, 17, 23)), "Today");
    }

    #[test]
    fn test_future_timestamp_is_today() {
        let now = at(2026, 10, 17, 12);
        assert_eq!(posted_label(now + Duration::hours(30), now), "Today");
    }

    #[test]
    fn test_calendar_day_boundaries() {
        let now = at(2026, 10, 17, 1);
        assert_eq!(posted_label(at(2026, 10, 16, 23), now), "Yesterday");
        assert_eq!(posted_label(at(2026, 10, 14, 9), now), "3 days ago");
        assert_eq!(posted_label(at(2026, 10, 9, 9), now), "1 week ago");
        assert_eq!(posted_label(at(2026, 9, 30, 9), now), "2 weeks ago");
    }

    #[test]
    fn test_old_posts_show_date() {
        let now = at(2026, 10, 17, 1);
        assert_eq!(posted_label(at(2026, 8, 1, 9), now), "01 Aug 2026");
        assert_eq!(full_date(at(2026, 10, 1, 0)), "01 Oct 2026");
    }
}
