use chrono::{Datelike, Days, Local, NaiveDate};

/// One cell of a month grid. `day` is `None` for the leading blanks that
/// align day 1 with its weekday column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub index: usize,
    pub day: Option<u32>,
}

impl CalendarDay {
    pub fn is_blank(&self) -> bool {
        self.day.is_none()
    }
}

pub const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Lays out the month containing `today`, weeks starting on Sunday.
pub fn generate_calendar(today: NaiveDate) -> Vec<CalendarDay> {
    let first = today - Days::new(u64::from(today.day0()));
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days_in_month = (28..=31)
        .rev()
        .find(|day| first.with_day(*day).is_some())
        .unwrap_or(28);

    let blanks = (0..leading).map(|_| None);
    let days = (1..=days_in_month).map(Some);
    blanks
        .chain(days)
        .enumerate()
        .map(|(index, day)| CalendarDay { index, day })
        .collect()
}

pub fn generate_calendar_now() -> Vec<CalendarDay> {
    generate_calendar(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn october_2026_starts_on_thursday() {
        let days = generate_calendar(date(2026, 10, 19));
        assert_eq!(days.len(), 4 + 31);
        assert!(days[..4].iter().all(CalendarDay::is_blank));
        assert_eq!(days[4], CalendarDay { index: 4, day: Some(1) });
        assert_eq!(days.last().and_then(|d| d.day), Some(31));
    }

    #[test]
    fn leap_february() {
        let days = generate_calendar(date(2024, 2, 29));
        // 2024-02-01 is a Thursday
        assert_eq!(days.iter().filter(|d| !d.is_blank()).count(), 29);
        assert_eq!(days[4].day, Some(1));
    }

    #[test]
    fn month_starting_on_sunday_has_no_blanks() {
        let days = generate_calendar(date(2026, 2, 10));
        assert_eq!(days[0], CalendarDay { index: 0, day: Some(1) });
        assert_eq!(days.len(), 28);
    }

    #[test]
    fn indexes_match_positions() {
        let days = generate_calendar(date(2025, 12, 25));
        for (position, day) in days.iter().enumerate() {
            assert_eq!(day.index, position);
        }
    }

    #[test]
    fn same_month_same_layout() {
        assert_eq!(
            generate_calendar(date(2026, 10, 1)),
            generate_calendar(date(2026, 10, 31))
        );
    }
}
