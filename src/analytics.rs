// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Windowed spend analytics.
//!
//! [`summarize`] is a pure function of an expense snapshot, a category lookup
//! and an inclusive date window. It either returns a fully consistent
//! [`AnalyticsResult`] or fails; it never produces a partial summary.

use crate::category_index::CategoryLookup;
use crate::dates::{self, DayKey, MonthKey};
use crate::error::AnalyticsError;
use crate::models::{Category, Expense};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Scale of `average_daily_expense`.
pub const AVERAGE_DP: u32 = 2;

/// The `{ startDate, endDate }` request accepted at a host boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl AnalyticsRequest {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        AnalyticsRequest {
            start_date,
            end_date,
        }
    }

    pub fn summarize<C>(
        &self,
        expenses: &[Expense],
        categories: &C,
    ) -> Result<AnalyticsResult, AnalyticsError>
    where
        C: CategoryLookup + ?Sized,
    {
        summarize(expenses, categories, self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category_id: i64,
    pub category_name: String,
    pub category_icon: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount: Decimal,
    pub transaction_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: DayKey,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_expenses: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub average_daily_expense: Decimal,
    pub total_transactions: u64,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub daily_expenses: Vec<DailyTotal>,
    #[serde(serialize_with = "serialize_month_totals")]
    pub monthly_expenses: BTreeMap<MonthKey, Decimal>,
}

impl AnalyticsResult {
    pub fn empty() -> Self {
        AnalyticsResult {
            total_expenses: Decimal::ZERO,
            average_daily_expense: Decimal::ZERO,
            total_transactions: 0,
            expenses_by_category: Vec::new(),
            daily_expenses: Vec::new(),
            monthly_expenses: BTreeMap::new(),
        }
    }
}

fn serialize_month_totals<S: Serializer>(
    totals: &BTreeMap<MonthKey, Decimal>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        totals
            .iter()
            .map(|(month, amount)| (month, amount.to_f64().unwrap_or_default())),
    )
}

/// Adds `amount` into `acc`, failing instead of panicking past `Decimal::MAX`.
fn accumulate(acc: &mut Decimal, amount: Decimal, expense_id: i64) -> Result<(), AnalyticsError> {
    *acc = acc
        .checked_add(amount)
        .ok_or(AnalyticsError::AmountOverflow { expense_id })?;
    Ok(())
}

struct CategoryBucket<'a> {
    category: &'a Category,
    total: Decimal,
    count: u64,
}

/// Summarizes the expenses dated within `[start, end]`, both ends inclusive.
///
/// Every record in `expenses` must carry a date, including those outside the
/// window, and every in-window record must reference a category known to
/// `categories`. The daily average divides by the length of the window, so
/// days without spending pull it down.
pub fn summarize<C>(
    expenses: &[Expense],
    categories: &C,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<AnalyticsResult, AnalyticsError>
where
    C: CategoryLookup + ?Sized,
{
    if start > end {
        return Err(AnalyticsError::InvalidRange { start, end });
    }

    let bucketed = expenses
        .iter()
        .map(|e| dates::bucket(e).map(|(day, month)| (e, day, month)))
        .collect::<Result<Vec<_>, _>>()?;

    let window = start..=end;
    let mut total = Decimal::ZERO;
    let mut count: u64 = 0;
    let mut by_category: HashMap<i64, CategoryBucket<'_>> = HashMap::new();
    let mut by_day: BTreeMap<DayKey, Decimal> = BTreeMap::new();
    let mut by_month: BTreeMap<MonthKey, Decimal> = BTreeMap::new();

    for (expense, day, month) in bucketed {
        if !window.contains(&day.date()) {
            continue;
        }
        let category =
            categories
                .lookup(expense.category_id)
                .ok_or(AnalyticsError::UnknownCategory {
                    expense_id: expense.id,
                    category_id: expense.category_id,
                })?;

        accumulate(&mut total, expense.amount, expense.id)?;
        count += 1;

        let bucket = by_category
            .entry(expense.category_id)
            .or_insert(CategoryBucket {
                category,
                total: Decimal::ZERO,
                count: 0,
            });
        accumulate(&mut bucket.total, expense.amount, expense.id)?;
        bucket.count += 1;

        let day_total = by_day.entry(day).or_insert(Decimal::ZERO);
        accumulate(day_total, expense.amount, expense.id)?;
        let month_total = by_month.entry(month).or_insert(Decimal::ZERO);
        accumulate(month_total, expense.amount, expense.id)?;
    }

    if count == 0 {
        return Ok(AnalyticsResult::empty());
    }

    let mut expenses_by_category: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category_id, b)| CategoryTotal {
            category_id,
            category_name: b.category.name.clone(),
            category_icon: b.category.icon.clone(),
            total_amount: b.total,
            transaction_count: b.count,
        })
        .collect();
    expenses_by_category.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.category_name.cmp(&b.category_name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });

    let daily_expenses = by_day
        .into_iter()
        .map(|(date, amount)| DailyTotal { date, amount })
        .collect();

    let days = Decimal::from(dates::days_inclusive(start, end));
    let average_daily_expense =
        (total / days).round_dp_with_strategy(AVERAGE_DP, RoundingStrategy::MidpointAwayFromZero);

    Ok(AnalyticsResult {
        total_expenses: total,
        average_daily_expense,
        total_transactions: count,
        expenses_by_category,
        daily_expenses,
        monthly_expenses: by_month,
    })
}
