// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar bucketing for expenses.
//!
//! All keys are derived from naive calendar dates. Nothing here consults the
//! local timezone, so an expense recorded on `2024-01-31` lands in the
//! `2024-01` bucket on every machine.

use crate::error::AnalyticsError;
use crate::models::Expense;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// A single calendar day, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Truncates the day to its year-month.
    pub fn month(&self) -> MonthKey {
        MonthKey {
            year: self.0.year(),
            month: self.0.month(),
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A calendar month, rendered as `YYYY-MM`. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| MonthKey { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AnalyticsError::InvalidDate {
            expense_id: None,
            value: Some(s.to_string()),
        };
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parses a stored or user-supplied `YYYY-MM-DD` date.
pub fn parse_day(s: &str) -> Result<NaiveDate, AnalyticsError> {
    NaiveDate::parse_from_str(s.trim(), DAY_FORMAT).map_err(|_| AnalyticsError::InvalidDate {
        expense_id: None,
        value: Some(s.to_string()),
    })
}

pub fn day_key(date: NaiveDate) -> DayKey {
    DayKey(date)
}

pub fn month_key(date: NaiveDate) -> MonthKey {
    day_key(date).month()
}

/// Day and month bucket of an expense. Fails when the record carries no date.
pub fn bucket(expense: &Expense) -> Result<(DayKey, MonthKey), AnalyticsError> {
    let date = expense.expense_date.ok_or(AnalyticsError::InvalidDate {
        expense_id: Some(expense.id),
        value: None,
    })?;
    let day = day_key(date);
    Ok((day, day.month()))
}

/// Number of calendar days in `[start, end]`, never less than 1.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(1)
}

/// Start of a window of `months` months ending on `end`: one month back from
/// `2024-03-15` is `2024-02-15`.
pub fn months_before(end: NaiveDate, months: u32) -> NaiveDate {
    end.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}
