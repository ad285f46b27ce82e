//! The view window state machine: a rendering mode crossed with an anchor
//! date. Transitions are pure; the controller layer turns each one into a
//! fetch obligation.

use chrono::{Datelike, Duration, Months, NaiveDate};

use super::grid::week_start_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Month,
    Week,
    Day,
}

/// The currently displayed date range, derived from a single anchor date and
/// a view mode. Mutated only by explicit navigation or a mode switch, never
/// by data arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    pub mode: ViewMode,
    pub anchor: NaiveDate,
}

impl CalendarView {
    pub fn new(mode: ViewMode, anchor: NaiveDate) -> Self {
        Self { mode, anchor }
    }

    /// Advance the anchor one period forward (month, week or day by mode).
    pub fn next_period(&mut self) {
        self.shift(1);
    }

    /// Move the anchor one period back.
    pub fn prev_period(&mut self) {
        self.shift(-1);
    }

    fn shift(&mut self, direction: i64) {
        self.anchor = match self.mode {
            ViewMode::Month => {
                let months = Months::new(1);
                let shifted = if direction >= 0 {
                    self.anchor.checked_add_months(months)
                } else {
                    self.anchor.checked_sub_months(months)
                };
                // Only fails at the calendar's representable bounds
                shifted.unwrap_or(self.anchor)
            }
            ViewMode::Week => self.anchor + Duration::days(7 * direction),
            ViewMode::Day => self.anchor + Duration::days(direction),
        };
    }

    /// Change the rendering mode without touching the anchor.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Reset the anchor to `today`. The caller supplies the current date so
    /// the machine stays pure.
    pub fn go_today(&mut self, today: NaiveDate) {
        self.anchor = today;
    }

    /// The date the backend expects for the current window: the Monday of
    /// the anchor's week for Week and Day views, the first of the month for
    /// Month view.
    pub fn fetch_anchor(&self) -> NaiveDate {
        match self.mode {
            ViewMode::Month => self
                .anchor
                .with_day(1)
                .expect("day 1 exists in every month"),
            ViewMode::Week | ViewMode::Day => week_start_of(self.anchor),
        }
    }
}
