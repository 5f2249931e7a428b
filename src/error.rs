// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failures of [`crate::analytics::summarize`]. Any of these aborts the whole
/// aggregation; there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Invalid date {value:?} on expense {expense_id:?}, expected YYYY-MM-DD")]
    InvalidDate {
        expense_id: Option<i64>,
        value: Option<String>,
    },
    #[error("Expense {expense_id} references unknown category {category_id}")]
    UnknownCategory { expense_id: i64, category_id: i64 },
    #[error("Adding expense {expense_id} overflows the decimal range")]
    AmountOverflow { expense_id: i64 },
}

/// Rejections raised by the expense/category write path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount must be greater than 0 (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("Category '{0}' not found")]
    CategoryNotFound(String),
    #[error("Expense {0} not found")]
    ExpenseNotFound(i64),
    #[error("Category '{name}' still has {expenses} expense(s)")]
    CategoryInUse { name: String, expenses: i64 },
}
