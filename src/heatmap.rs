use crate::models::DailyRecord;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_TRAILING_DAYS: u32 = 90;
pub const MAX_TRAILING_DAYS: u32 = 366;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatmapRange {
    /// `days` dates ending at the reference date.
    Trailing { days: u32 },
    Year(i32),
}

impl Default for HeatmapRange {
    fn default() -> Self {
        Self::Trailing {
            days: DEFAULT_TRAILING_DAYS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub completed: u32,
    pub total: u32,
    pub rate: f64,
    pub bucket: u8,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Heatmap {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub prev_year: Option<i32>,
    pub next_year: Option<i32>,
    pub cells: Vec<HeatmapCell>,
}

/// Years later than the current one are pulled back to it.
pub fn clamp_year(year: i32, today: NaiveDate) -> i32 {
    year.min(today.year())
}

/// Ordered dates covered by `range`. `None` if the range leaves the
/// representable calendar.
pub fn dates_in(range: HeatmapRange, today: NaiveDate) -> Option<Vec<NaiveDate>> {
    let (start, end) = match range {
        HeatmapRange::Trailing { days: 0 } => return Some(Vec::new()),
        HeatmapRange::Trailing { days } => (
            today.checked_sub_signed(Duration::days(i64::from(days) - 1))?,
            today,
        ),
        HeatmapRange::Year(year) => (
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year, 12, 31)?,
        ),
    };
    Some(start.iter_days().take_while(|date| *date <= end).collect())
}

pub fn completion_rate(completed: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(completed) / f64::from(total)
    }
}

/// Color tier 0..=4. Each upper threshold is inclusive.
pub fn bucket(rate: f64) -> u8 {
    if rate <= 0.0 {
        0
    } else if rate <= 0.25 {
        1
    } else if rate <= 0.5 {
        2
    } else if rate <= 0.75 {
        3
    } else {
        4
    }
}

pub fn build_heatmap(
    records: impl IntoIterator<Item = DailyRecord>,
    range: HeatmapRange,
    today: NaiveDate,
) -> Option<Heatmap> {
    let range = match range {
        HeatmapRange::Year(year) => HeatmapRange::Year(clamp_year(year, today)),
        other => other,
    };
    let dates = dates_in(range, today)?;
    let by_date: HashMap<NaiveDate, DailyRecord> = records
        .into_iter()
        .map(|record| (record.date, record))
        .collect();

    let cells = dates
        .iter()
        .map(|date| {
            let (completed, total) = by_date
                .get(date)
                .map(|record| (record.main_todos_completed, record.total_main_todos))
                .unwrap_or_default();
            let rate = completion_rate(completed, total);
            HeatmapCell {
                date: *date,
                completed,
                total,
                rate,
                bucket: bucket(rate),
                label: format!("{date}: {}% complete", (rate * 100.0).round() as u32),
            }
        })
        .collect();

    let (year, prev_year, next_year) = match range {
        HeatmapRange::Year(year) => (
            Some(year),
            Some(year - 1),
            (year < today.year()).then_some(year + 1),
        ),
        HeatmapRange::Trailing { .. } => (None, None, None),
    };

    Some(Heatmap {
        start_date: dates.first().copied(),
        end_date: dates.last().copied(),
        year,
        prev_year,
        next_year,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, completed: u32, total: u32) -> DailyRecord {
        DailyRecord {
            date,
            main_todos_completed: completed,
            total_main_todos: total,
        }
    }

    #[test]
    fn bucket_boundaries_are_inclusive() {
        assert_eq!(bucket(0.0), 0);
        assert_eq!(bucket(0.01), 1);
        assert_eq!(bucket(0.25), 1);
        assert_eq!(bucket(0.26), 2);
        assert_eq!(bucket(0.5), 2);
        assert_eq!(bucket(0.75), 3);
        assert_eq!(bucket(0.76), 4);
        assert_eq!(bucket(1.0), 4);
    }

    #[test]
    fn two_of_three_lands_in_bucket_three() {
        assert_eq!(bucket(completion_rate(2, 3)), 3);
        assert_eq!(completion_rate(0, 0), 0.0);
        assert_eq!(bucket(completion_rate(1, 4)), 1);
        assert_eq!(bucket(completion_rate(3, 4)), 3);
    }

    #[test]
    fn trailing_window_ends_today() {
        let today = ymd(2026, 10, 19);
        let dates = dates_in(HeatmapRange::default(), today).unwrap();
        assert_eq!(dates.len(), 90);
        assert_eq!(dates.last(), Some(&today));
        assert_eq!(dates[0], ymd(2026, 7, 22));
        assert!(dates_in(HeatmapRange::Trailing { days: 0 }, today).unwrap().is_empty());
    }

    #[test]
    fn year_range_covers_whole_year() {
        let today = ymd(2026, 10, 19);
        assert_eq!(dates_in(HeatmapRange::Year(2025), today).unwrap().len(), 365);
        let leap = dates_in(HeatmapRange::Year(2024), today).unwrap();
        assert_eq!(leap.len(), 366);
        assert_eq!(leap[0], ymd(2024, 1, 1));
        assert_eq!(leap[365], ymd(2024, 12, 31));
    }

    #[test]
    fn year_navigation_stops_at_current_year() {
        let today = ymd(2026, 10, 19);
        assert_eq!(clamp_year(2030, today), 2026);
        assert_eq!(clamp_year(2020, today), 2020);

        let current = build_heatmap(Vec::new(), HeatmapRange::Year(2031), today).unwrap();
        assert_eq!(current.year, Some(2026));
        assert_eq!(current.prev_year, Some(2025));
        assert_eq!(current.next_year, None);

        let past = build_heatmap(Vec::new(), HeatmapRange::Year(2024), today).unwrap();
        assert_eq!(past.next_year, Some(2025));
    }

    #[test]
    fn cells_use_records_and_default_to_empty() {
        let today = ymd(2026, 10, 19);
        let records = vec![record(ymd(2026, 10, 18), 2, 3), record(ymd(2026, 10, 17), 4, 4)];
        let heatmap = build_heatmap(records, HeatmapRange::Trailing { days: 3 }, today).unwrap();

        let buckets: Vec<_> = heatmap.cells.iter().map(|cell| cell.bucket).collect();
        assert_eq!(buckets, [4, 3, 0]);
        assert_eq!(heatmap.cells[1].label, "2026-10-18: 67% complete");
        assert_eq!(heatmap.cells[2].total, 0);
        assert_eq!(heatmap.start_date, Some(ymd(2026, 10, 17)));
        assert_eq!(heatmap.end_date, Some(today));
        assert_eq!(heatmap.year, None);
    }

    #[test]
    fn unrepresentable_year_yields_none() {
        assert!(build_heatmap(Vec::new(), HeatmapRange::Year(i32::MIN), ymd(2026, 1, 1)).is_none());
    }
}
