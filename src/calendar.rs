//! Week and day navigation. Weeks start on Monday.

use chrono::{Datelike, Duration, Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: week_start(date),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    pub fn days(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|offset| self.start + Duration::days(offset as i64))
    }

    pub fn shift(&self, weeks: i64) -> Self {
        Self {
            start: self.start + Duration::weeks(weeks),
        }
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn prev(&self) -> Self {
        self.shift(-1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end()
    }
}

/// The "current day" of the daily view and the week whose tabs are shown.
///
/// Week navigation leaves the current day alone, so the selected day may sit
/// outside the displayed week until a tab or the date picker is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySelection {
    day: NaiveDate,
    week: Week,
}

impl DaySelection {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            day: today,
            week: Week::containing(today),
        }
    }

    /// Rebuilds view state carried in a request. `week` may be any date in the
    /// displayed week; it defaults to the week containing `day`.
    pub fn restore(day: Option<NaiveDate>, week: Option<NaiveDate>, today: NaiveDate) -> Self {
        let mut selection = Self::new(today);
        if let Some(day) = day {
            selection.pick_date(day);
        }
        if let Some(week) = week {
            selection.week = Week::containing(week);
        }
        selection
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn week(&self) -> Week {
        self.week
    }

    /// Clicking a tab of the displayed week.
    pub fn select_day(&mut self, day: NaiveDate) {
        self.day = day;
    }

    /// Choosing a date from the picker; the displayed week follows it.
    pub fn pick_date(&mut self, day: NaiveDate) {
        self.day = day;
        self.week = Week::containing(day);
    }

    pub fn next_week(&mut self) {
        self.week = self.week.next();
    }

    pub fn prev_week(&mut self) {
        self.week = self.week.prev();
    }
}
