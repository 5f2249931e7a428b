// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub category_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// `None` only for records that reached storage without a date; the
    /// analytics engine rejects them.
    pub expense_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Expense {
    pub fn new(id: i64, category_id: i64, amount: Decimal, expense_date: NaiveDate) -> Self {
        Expense {
            id,
            category_id,
            amount,
            expense_date: Some(expense_date),
            description: None,
            payment_method: None,
            location: None,
            notes: None,
        }
    }
}

/// Fields accepted by the create and update operations.
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    /// Category name, resolved against the store on write.
    pub category: String,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}
