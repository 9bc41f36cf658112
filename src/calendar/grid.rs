use std::collections::HashMap;

use serde::Serialize;
use time::{Date, Duration, Month};

use crate::dates;
use crate::error::TrackerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayStatus {
    /// Spillover from the adjacent month; never interactive, never looked up.
    OutsideMonth,
    /// In the target month, nothing stored yet.
    Empty,
    WithinLimit,
    OverLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: Date,
    pub status: DayStatus,
}

fn month_of(year: i32, month: u8) -> Result<Month, TrackerError> {
    Month::try_from(month).map_err(|_| TrackerError::MonthOutOfRange { year, month })
}

fn calendar_date(year: i32, month: Month, day: u8) -> Result<Date, TrackerError> {
    Date::from_calendar_date(year, month, day).map_err(|_| TrackerError::MonthOutOfRange {
        year,
        month: u8::from(month),
    })
}

/// First and last grid dates for a month view: the Monday on or before the
/// 1st through the Sunday on or after the last day, so the grid is always
/// whole weeks (4, 5 or 6 of them).
pub fn grid_span(year: i32, month: u8) -> Result<(Date, Date), TrackerError> {
    let target = month_of(year, month)?;
    let first = calendar_date(year, target, 1)?;
    let last = calendar_date(year, target, time::util::days_in_year_month(year, target))?;

    let start = first
        .checked_sub(Duration::days(
            i64::from(first.weekday().number_days_from_monday()),
        ))
        .ok_or(TrackerError::MonthOutOfRange { year, month })?;
    let end = last
        .checked_add(Duration::days(
            i64::from(6 - last.weekday().number_days_from_monday()),
        ))
        .ok_or(TrackerError::MonthOutOfRange { year, month })?;
    Ok((start, end))
}

/// Expand a month into week rows of 7 classified cells. `percentages` is the
/// store's range read over the grid span, keyed by ISO date.
pub fn build_grid(
    year: i32,
    month: u8,
    percentages: &HashMap<String, f64>,
) -> Result<Vec<Vec<DayCell>>, TrackerError> {
    let target = month_of(year, month)?;
    let (start, end) = grid_span(year, month)?;

    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);
    let mut current = start;
    loop {
        let status = if current.month() != target {
            DayStatus::OutsideMonth
        } else {
            match percentages.get(&dates::format_iso(current)) {
                None => DayStatus::Empty,
                Some(p) if *p > 100.0 => DayStatus::OverLimit,
                Some(_) => DayStatus::WithinLimit,
            }
        };
        week.push(DayCell {
            date: current,
            status,
        });
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
        if current == end {
            break;
        }
        current = current
            .next_day()
            .ok_or(TrackerError::MonthOutOfRange { year, month })?;
    }
    Ok(weeks)
}

pub fn previous(year: i32, month: u8) -> (i32, u8) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next(year: i32, month: u8) -> (i32, u8) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Weekday;

    fn empty() -> HashMap<String, f64> {
        HashMap::new()
    }

    #[test]
    fn grids_are_whole_weeks_of_consecutive_dates() {
        for (year, month) in [
            (2024, 1),
            (2024, 2),
            (2024, 3), // ends on a Sunday
            (2023, 12),
            (2026, 6),
            (2025, 9), // starts on a Monday
        ] {
            let weeks = build_grid(year, month, &empty()).unwrap();
            assert!(
                (4..=6).contains(&weeks.len()),
                "{year}-{month}: {} rows",
                weeks.len()
            );
            let cells: Vec<DayCell> = weeks.iter().flatten().copied().collect();
            assert_eq!(cells.len() % 7, 0);
            for week in &weeks {
                assert_eq!(week.len(), 7);
            }
            assert_eq!(cells[0].date.weekday(), Weekday::Monday);
            assert_eq!(cells[cells.len() - 1].date.weekday(), Weekday::Sunday);
            for pair in cells.windows(2) {
                assert_eq!(pair[0].date.next_day().unwrap(), pair[1].date);
            }

            let (start, end) = grid_span(year, month).unwrap();
            assert_eq!(cells[0].date, start);
            assert_eq!(cells[cells.len() - 1].date, end);
        }
    }

    #[test]
    fn leap_february_has_29_in_month_cells() {
        let weeks = build_grid(2024, 2, &empty()).unwrap();
        let cells: Vec<DayCell> = weeks.iter().flatten().copied().collect();

        let in_month: Vec<&DayCell> = cells
            .iter()
            .filter(|c| c.status != DayStatus::OutsideMonth)
            .collect();
        assert_eq!(in_month.len(), 29);
        assert!(in_month
            .iter()
            .any(|c| dates::format_iso(c.date) == "2024-02-29"));
        assert!(in_month.iter().all(|c| c.status == DayStatus::Empty));

        // January and March spillover days bracket the month
        assert_eq!(cells[0].status, DayStatus::OutsideMonth);
        assert_eq!(dates::format_iso(cells[0].date), "2024-01-29");
        assert_eq!(cells[cells.len() - 1].status, DayStatus::OutsideMonth);
        assert_eq!(dates::format_iso(cells[cells.len() - 1].date), "2024-03-03");
    }

    #[test]
    fn month_ending_on_sunday_gets_no_trailing_spill() {
        // March 2024 ends on Sunday the 31st
        let (start, end) = grid_span(2024, 3).unwrap();
        assert_eq!(dates::format_iso(start), "2024-02-26");
        assert_eq!(dates::format_iso(end), "2024-03-31");
    }

    #[test]
    fn stored_percentages_drive_classification() {
        let mut percentages = empty();
        percentages.insert("2024-06-10".to_string(), 157.0);
        percentages.insert("2024-06-11".to_string(), 100.0);
        percentages.insert("2024-06-12".to_string(), 0.0);
        // spillover day with data stays outside-month
        percentages.insert("2024-05-27".to_string(), 50.0);

        let weeks = build_grid(2024, 6, &percentages).unwrap();
        let status_of = |key: &str| {
            weeks
                .iter()
                .flatten()
                .find(|c| dates::format_iso(c.date) == key)
                .map(|c| c.status)
                .expect("day in grid")
        };
        assert_eq!(status_of("2024-06-10"), DayStatus::OverLimit);
        assert_eq!(status_of("2024-06-11"), DayStatus::WithinLimit);
        assert_eq!(status_of("2024-06-12"), DayStatus::WithinLimit);
        assert_eq!(status_of("2024-06-13"), DayStatus::Empty);
        assert_eq!(status_of("2024-05-27"), DayStatus::OutsideMonth);
    }

    #[test]
    fn out_of_range_months_and_years_are_rejected() {
        for (year, month) in [(2024, 0), (2024, 13), (10_000, 1), (-10_000, 1)] {
            assert!(
                matches!(
                    build_grid(year, month, &empty()),
                    Err(TrackerError::MonthOutOfRange { .. })
                ),
                "{year}-{month} accepted"
            );
        }
    }

    #[test]
    fn navigation_wraps_across_year_boundaries() {
        assert_eq!(next(2024, 12), (2025, 1));
        assert_eq!(previous(2024, 1), (2023, 12));
        assert_eq!(next(2024, 6), (2024, 7));
        assert_eq!(previous(2024, 6), (2024, 5));
    }
}
