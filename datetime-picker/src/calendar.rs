//! Calendar grid math for month pages.
//!
//! ## Usage
//!
//! Use [`month_grid`] to expand an anchor month into the week-aligned cell
//! sequence a calendar page renders, and the anchor helpers to page between
//! months or jump years.
use chrono::{Datelike, Days, Months, NaiveDate};

/// Number of cells in one calendar row.
pub const DAYS_PER_WEEK: usize = 7;

/// Weekday header labels, starting from the fixed Sunday week start.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] =
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One cell of a rendered month page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// The calendar date this cell stands for.
    pub date: NaiveDate,
    /// Whether the date belongs to the anchor month (leading/trailing filler
    /// cells from adjacent months are rendered but not interactive).
    pub in_anchor_month: bool,
    /// Whether the date equals the externally tracked selected date.
    pub is_selected: bool,
    /// Whether the date is the current real-world date.
    pub is_today: bool,
}

/// Returns the first day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// Shifts an anchor by whole months, keeping it on the first of the month.
pub fn shift_months(anchor: NaiveDate, months: i32) -> NaiveDate {
    let first = first_of_month(anchor);
    let shifted = if months >= 0 {
        first.checked_add_months(Months::new(months as u32))
    } else {
        first.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.expect("anchor months stay far from chrono's date range limits")
}

/// Replaces the year of an anchor month, preserving its month-of-year.
pub fn with_year(anchor: NaiveDate, year: i32) -> NaiveDate {
    first_of_month(anchor)
        .with_year(year)
        .expect("day 1 is valid in every month of every year")
}

/// Heading for a month page, e.g. `"March 2023"`.
pub fn month_title(anchor: NaiveDate) -> String {
    format!("{} {}", MONTH_NAMES[anchor.month0() as usize], anchor.year())
}

fn last_of_month(anchor: NaiveDate) -> NaiveDate {
    shift_months(anchor, 1)
        .pred_opt()
        .expect("the day before a first-of-month always exists")
}

fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(back))
        .expect("week starts stay inside chrono's date range")
}

fn end_of_week(date: NaiveDate) -> NaiveDate {
    let forward = (DAYS_PER_WEEK as u32 - 1 - date.weekday().num_days_from_sunday()) as u64;
    date.checked_add_days(Days::new(forward))
        .expect("week ends stay inside chrono's date range")
}

/// Expands an anchor month into its full calendar-page cell sequence.
///
/// The sequence runs from the week start on/before the first of the month to
/// the week end on/after the last of the month, so its length is always a
/// non-zero multiple of [`DAYS_PER_WEEK`]. `selected` and `today` only set
/// flags; they do not have to fall inside the anchor month.
pub fn month_grid(anchor: NaiveDate, selected: NaiveDate, today: NaiveDate) -> Vec<CalendarDay> {
    let first = first_of_month(anchor);
    let end = end_of_week(last_of_month(anchor));
    let mut date = start_of_week(first);

    // At most 6 rows for any month/week-start combination.
    let mut days = Vec::with_capacity(6 * DAYS_PER_WEEK);
    loop {
        days.push(CalendarDay {
            date,
            in_anchor_month: date.month() == first.month() && date.year() == first.year(),
            is_selected: date == selected,
            is_today: date == today,
        });
        if date == end {
            break;
        }
        date = date
            .succ_opt()
            .expect("calendar pages stay inside chrono's date range");
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("test dates are valid")
    }

    #[test]
    fn grid_is_week_aligned_for_every_month_of_2024() {
        let selected = date(2024, 1, 15);
        let today = date(2024, 6, 1);
        for month in 1..=12 {
            let anchor = date(2024, month, 1);
            let grid = month_grid(anchor, selected, today);
            assert!(!grid.is_empty());
            assert_eq!(grid.len() % DAYS_PER_WEEK, 0, "month {month}");
            assert_eq!(
                grid.first().map(|day| day.date.weekday().num_days_from_sunday()),
                Some(0)
            );
            assert_eq!(
                grid.last().map(|day| day.date.weekday().num_days_from_sunday()),
                Some(6)
            );
        }
    }

    #[test]
    fn grid_covers_the_whole_anchor_month() {
        let anchor = date(2023, 11, 1);
        let grid = month_grid(anchor, anchor, anchor);
        let first = grid.first().expect("grid is non-empty").date;
        let last = grid.last().expect("grid is non-empty").date;
        assert!(first <= date(2023, 11, 1));
        assert!(last >= date(2023, 11, 30));
        // Consecutive days, no gaps.
        for pair in grid.windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
    }

    #[test]
    fn anchor_membership_matches_month_and_year() {
        let anchor = date(2023, 3, 1);
        for day in month_grid(anchor, anchor, anchor) {
            let expected = day.date.month() == 3 && day.date.year() == 2023;
            assert_eq!(day.in_anchor_month, expected, "{}", day.date);
        }
    }

    #[test]
    fn leading_and_trailing_filler_comes_from_adjacent_months() {
        // November 2023 starts on a Wednesday and ends on a Thursday.
        let grid = month_grid(date(2023, 11, 1), date(2023, 11, 30), date(2023, 11, 30));
        assert_eq!(grid[0].date, date(2023, 10, 29));
        assert!(!grid[0].in_anchor_month);
        assert_eq!(grid.last().map(|d| d.date), Some(date(2023, 12, 2)));
        assert_eq!(grid.len(), 5 * DAYS_PER_WEEK);
    }

    #[test]
    fn leap_february_keeps_its_29th() {
        let grid = month_grid(date(2024, 2, 1), date(2024, 2, 29), date(2024, 2, 1));
        let leap_day = grid
            .iter()
            .find(|day| day.date == date(2024, 2, 29))
            .expect("leap day is part of the grid");
        assert!(leap_day.in_anchor_month);
        assert!(leap_day.is_selected);
        assert!(!leap_day.is_today);
    }

    #[test]
    fn selected_and_today_flags_are_independent() {
        let grid = month_grid(date(2024, 6, 1), date(2024, 6, 10), date(2024, 6, 20));
        let selected: Vec<_> = grid.iter().filter(|d| d.is_selected).collect();
        let today: Vec<_> = grid.iter().filter(|d| d.is_today).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(today.len(), 1);
        assert_eq!(selected[0].date, date(2024, 6, 10));
        assert_eq!(today[0].date, date(2024, 6, 20));
    }

    #[test]
    fn shift_months_pages_forward_and_backward() {
        let anchor = date(2023, 12, 1);
        assert_eq!(shift_months(anchor, 0), anchor);
        assert_eq!(shift_months(anchor, 1), date(2024, 1, 1));
        assert_eq!(shift_months(anchor, -2), date(2023, 10, 1));
        // Anchors normalise to the first even when fed a mid-month date.
        assert_eq!(shift_months(date(2023, 12, 25), 1), date(2024, 1, 1));
    }

    #[test]
    fn with_year_changes_only_the_year_component() {
        assert_eq!(with_year(date(2023, 3, 1), 2025), date(2025, 3, 1));
        assert_eq!(with_year(date(2024, 2, 15), 2023), date(2023, 2, 1));
    }

    #[test]
    fn month_title_formats_name_and_year() {
        assert_eq!(month_title(date(2023, 3, 1)), "March 2023");
        assert_eq!(month_title(date(2026, 12, 1)), "December 2026");
    }
}
