// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use std::collections::{BTreeMap, HashMap};

/// Read-only lookup from category id to display metadata.
pub trait CategoryLookup {
    fn lookup(&self, category_id: i64) -> Option<&Category>;
}

/// Snapshot of the category table keyed by id.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    by_id: BTreeMap<i64, Category>,
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category) -> Option<Category> {
        self.by_id.insert(category.id, category)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn by_name(&self, name: &str) -> Option<&Category> {
        self.by_id.values().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.by_id.values()
    }
}

impl FromIterator<Category> for CategoryIndex {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        CategoryIndex {
            by_id: iter.into_iter().map(|c| (c.id, c)).collect(),
        }
    }
}

impl CategoryLookup for CategoryIndex {
    fn lookup(&self, category_id: i64) -> Option<&Category> {
        self.by_id.get(&category_id)
    }
}

impl CategoryLookup for HashMap<i64, Category> {
    fn lookup(&self, category_id: i64) -> Option<&Category> {
        self.get(&category_id)
    }
}

impl CategoryLookup for BTreeMap<i64, Category> {
    fn lookup(&self, category_id: i64) -> Option<&Category> {
        self.get(&category_id)
    }
}
