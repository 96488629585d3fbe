use chrono::{Duration, NaiveDate};

/// The three-day window the winner calculation runs over.
///
/// Anchored on "today"; the two preceding days are derived from it. The
/// caller resolves the clock once at the edge, keeping everything below
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    today: NaiveDate,
}

impl DayWindow {
    /// Creates a window ending on the given day.
    pub fn ending(today: NaiveDate) -> Self {
        Self { today }
    }

    /// The window's final day.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The day before the window's final day.
    pub fn yesterday(&self) -> NaiveDate {
        self.today - Duration::days(1)
    }

    /// Two days before the window's final day.
    pub fn day_before_yesterday(&self) -> NaiveDate {
        self.today - Duration::days(2)
    }

    /// All three days, oldest first.
    pub fn days(&self) -> [NaiveDate; 3] {
        [self.day_before_yesterday(), self.yesterday(), self.today]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_window_days() {
        let window = DayWindow::ending(date(2024, 6, 15));

        assert_eq!(window.today(), date(2024, 6, 15));
        assert_eq!(window.yesterday(), date(2024, 6, 14));
        assert_eq!(window.day_before_yesterday(), date(2024, 6, 13));
        assert_eq!(
            window.days(),
            [date(2024, 6, 13), date(2024, 6, 14), date(2024, 6, 15)]
        );
    }

    #[test]
    fn test_window_crossing_month_boundary() {
        let window = DayWindow::ending(date(2024, 3, 1));

        assert_eq!(window.yesterday(), date(2024, 2, 29));
        assert_eq!(window.day_before_yesterday(), date(2024, 2, 28));
    }

    #[test]
    fn test_window_crossing_year_boundary() {
        let window = DayWindow::ending(date(2024, 1, 1));

        assert_eq!(window.yesterday(), date(2023, 12, 31));
        assert_eq!(window.day_before_yesterday(), date(2023, 12, 30));
    }
}
