//! Pure date/time bucketing for the calendar grids.
//!
//! Everything here is a pure function over `chrono` types so the view logic
//! can be tested without a backend. The crate uses ISO Monday-start weeks
//! throughout: Sunday is day 7 of the previous week, never day 0 of the
//! next one.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};

/// First hour shown on the week grid's vertical time scale.
pub const GRID_START_HOUR: u32 = 12;

/// Vertical pixels per hour on the week grid.
pub const PIXELS_PER_HOUR: i64 = 60;

/// The Monday on or before `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(days_from_monday)
}

/// Canonical `YYYY-MM-DD` key used to bucket items into cells.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The 7 dates of `date`'s Monday-start week, ascending.
pub fn week_days(date: NaiveDate) -> Vec<NaiveDate> {
    let monday = week_start_of(date);
    (0..7).map(|i| monday + Duration::days(i)).collect()
}

/// Every date of `date`'s month, 1st through last, ascending.
pub fn month_days(date: NaiveDate) -> Vec<NaiveDate> {
    let first = date.with_day(1).expect("day 1 exists in every month");
    let mut days = Vec::with_capacity(31);
    let mut current = first;
    while current.month() == first.month() {
        days.push(current);
        current += Duration::days(1);
    }
    days
}

/// Hour labels of the week grid's time scale (12:00 through 23:00).
pub fn grid_hours() -> impl Iterator<Item = u32> {
    GRID_START_HOUR..24
}

/// Parse a time-of-day string in either `HH:MM` (24h) or `H:MM AM/PM` form.
///
/// Returns `None` for anything malformed or out of range; callers degrade to
/// a default rather than erroring the render path.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    let (clock, meridiem) = match s.split_once(' ') {
        Some((clock, rest)) => (clock, Some(rest.trim())),
        None => (s, None),
    };

    let (hour_str, minute_str) = clock.split_once(':')?;
    let hour: u32 = hour_str.trim().parse().ok()?;
    let minute: u32 = minute_str.trim().parse().ok()?;

    let hour = match meridiem {
        Some(m) if m.eq_ignore_ascii_case("AM") => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            if hour == 12 {
                0
            } else {
                hour
            }
        }
        Some(m) if m.eq_ignore_ascii_case("PM") => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            if hour == 12 {
                12
            } else {
                hour + 12
            }
        }
        Some(_) => return None,
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Vertical pixel offset of an item on the week grid: minutes past the
/// grid's start hour, scaled to `PIXELS_PER_HOUR`.
///
/// Missing or malformed times, and times before the grid start, land at the
/// top of the grid (offset 0).
pub fn time_to_offset(time: Option<&str>) -> i64 {
    let Some(parsed) = time.and_then(parse_time_of_day) else {
        return 0;
    };

    let minutes = parsed.hour() as i64 * 60 + parsed.minute() as i64;
    let since_start = minutes - GRID_START_HOUR as i64 * 60;
    (since_start.max(0) * PIXELS_PER_HOUR) / 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn week_start_is_always_monday() {
        // A full year of dates, leap year included
        let mut d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        while d < end {
            let monday = week_start_of(d);
            assert_eq!(monday.weekday(), Weekday::Mon, "for {}", d);
            assert!(monday <= d);
            assert!(d <= monday + Duration::days(6));
            d += Duration::days(1);
        }
    }

    #[test]
    fn sunday_belongs_to_previous_week() {
        // 2024-06-09 is a Sunday; its week starts 2024-06-03, not 2024-06-10
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(
            week_start_of(sunday),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
        );
    }

    #[test]
    fn week_days_ascend_by_one_day() {
        let days = week_days(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        for pair in days.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn month_days_cover_whole_month() {
        let feb = month_days(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
        assert_eq!(feb.len(), 29); // leap year
        assert_eq!(feb[0].day(), 1);
        assert_eq!(feb[28].day(), 29);

        let june = month_days(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert_eq!(june.len(), 30);
    }

    #[test]
    fn grid_hours_span_afternoon_and_evening() {
        let hours: Vec<u32> = grid_hours().collect();
        assert_eq!(hours.first(), Some(&GRID_START_HOUR));
        assert_eq!(hours.last(), Some(&23));
        assert_eq!(hours.len(), 12);
    }

    #[test]
    fn date_key_format() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(date_key(d), "2024-06-03");
    }

    #[test]
    fn parses_24h_and_meridiem_times() {
        assert_eq!(
            parse_time_of_day("14:30"),
            NaiveTime::from_hms_opt(14, 30, 0)
        );
        assert_eq!(
            parse_time_of_day("2:30 PM"),
            NaiveTime::from_hms_opt(14, 30, 0)
        );
        assert_eq!(
            parse_time_of_day("12:00 AM"),
            NaiveTime::from_hms_opt(0, 0, 0)
        );
        assert_eq!(
            parse_time_of_day("12:15 pm"),
            NaiveTime::from_hms_opt(12, 15, 0)
        );
    }

    #[test]
    fn rejects_malformed_times() {
        assert_eq!(parse_time_of_day("25:99"), None);
        assert_eq!(parse_time_of_day("13:00 PM"), None);
        assert_eq!(parse_time_of_day("0:30 AM"), None);
        assert_eq!(parse_time_of_day("noonish"), None);
        assert_eq!(parse_time_of_day(""), None);
        assert_eq!(parse_time_of_day("7:15 XM"), None);
    }

    #[test]
    fn malformed_time_lands_at_top_of_grid() {
        assert_eq!(time_to_offset(Some("25:99")), 0);
        assert_eq!(time_to_offset(None), 0);
    }

    #[test]
    fn offsets_scale_from_grid_start() {
        assert_eq!(time_to_offset(Some("12:00")), 0);
        assert_eq!(time_to_offset(Some("12:30")), 30);
        assert_eq!(time_to_offset(Some("2:30 PM")), 150);
        assert_eq!(time_to_offset(Some("23:00")), 660);
        // before the grid start clamps to the top
        assert_eq!(time_to_offset(Some("9:00")), 0);
    }

    #[test]
    fn offset_is_monotone_over_a_day() {
        let times = [
            "12:00 AM", "6:15", "11:59", "12:00", "12:01 PM", "13:00", "4:45 PM", "22:10",
            "11:59 PM",
        ];
        let offsets: Vec<i64> = times.iter().map(|t| time_to_offset(Some(t))).collect();
        for pair in offsets.windows(2) {
            assert!(pair[0] <= pair[1], "offsets not monotone: {:?}", offsets);
        }
    }
}
