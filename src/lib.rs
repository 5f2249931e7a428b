// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod category_index;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod utils;

pub use analytics::{AnalyticsRequest, AnalyticsResult, summarize};
pub use category_index::{CategoryIndex, CategoryLookup};
pub use error::{AnalyticsError, ValidationError};
