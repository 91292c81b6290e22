//! Shared traits and calendar-month arithmetic.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in a provider book.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Identifies one calendar month. Ordering is chronological.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Shifts by whole months, negative values go backwards.
    pub fn shift(self, months: i32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.shift(1).first_day() - Duration::days(1)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        Self::from_date(date) == self
    }

    /// Short chart label, e.g. `Jan 2025`.
    pub fn label(self) -> String {
        format!("{} {}", month_label(self.month), self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub(crate) fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_crosses_year_boundaries() {
        let jan = MonthKey::new(2025, 1).unwrap();
        assert_eq!(jan.shift(-1), MonthKey::new(2024, 12).unwrap());
        assert_eq!(jan.shift(-13), MonthKey::new(2023, 12).unwrap());
        assert_eq!(jan.shift(12), MonthKey::new(2026, 1).unwrap());
    }

    #[test]
    fn last_day_handles_leap_february() {
        let feb = MonthKey::new(2024, 2).unwrap();
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let feb = MonthKey::new(2025, 2).unwrap();
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn contains_matches_only_same_month() {
        let key = MonthKey::new(2025, 6).unwrap();
        assert!(key.contains(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
        assert!(key.contains(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
    }

    #[test]
    fn ordering_is_chronological() {
        let dec = MonthKey::new(2024, 12).unwrap();
        let jan = MonthKey::new(2025, 1).unwrap();
        assert!(dec < jan);
    }
}
