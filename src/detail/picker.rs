use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

use crate::time_util::{format_date, format_time, parse_date, parse_time};

/// Direction and size of a picker adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerStep {
    Back,
    Forward,
    BackLarge,
    ForwardLarge,
}

/// Working value for the date overlay.
///
/// Small steps move one day, large steps one week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    working: NaiveDate,
}

impl DatePicker {
    /// Seeds the picker from the field's current value, falling back to
    /// `fallback` when the field doesn't parse.
    pub fn seeded(current: &str, fallback: NaiveDate) -> Self {
        Self {
            working: parse_date(current).unwrap_or(fallback),
        }
    }

    pub fn value(&self) -> NaiveDate {
        self.working
    }

    pub fn adjust(&mut self, step: PickerStep) {
        let days = match step {
            PickerStep::Back => -1,
            PickerStep::Forward => 1,
            PickerStep::BackLarge => -7,
            PickerStep::ForwardLarge => 7,
        };
        if let Some(d) = self.working.checked_add_signed(Duration::days(days)) {
            self.working = d;
        }
    }

    /// The selected date as `YYYY-MM-DD`.
    pub fn selection(&self) -> String {
        format_date(self.working)
    }
}

/// Working value for a time overlay.
///
/// Small steps move one minute, large steps one hour; both wrap at midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePicker {
    working: NaiveTime,
}

impl TimePicker {
    pub fn seeded(current: &str, fallback: NaiveTime) -> Self {
        Self {
            working: parse_time(current).unwrap_or(fallback),
        }
    }

    pub fn hour(&self) -> u32 {
        self.working.hour()
    }

    pub fn minute(&self) -> u32 {
        self.working.minute()
    }

    pub fn adjust(&mut self, step: PickerStep) {
        let delta = match step {
            PickerStep::Back => Duration::minutes(-1),
            PickerStep::Forward => Duration::minutes(1),
            PickerStep::BackLarge => Duration::hours(-1),
            PickerStep::ForwardLarge => Duration::hours(1),
        };
        // overflowing_add_signed wraps around midnight
        self.working = self.working.overflowing_add_signed(delta).0;
    }

    /// The selected time as `HH:MM`.
    pub fn selection(&self) -> String {
        format_time(self.working)
    }
}
