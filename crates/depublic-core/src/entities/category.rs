//! Event category entity.

use crate::CategoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A category events are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub category_id: CategoryId,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new category with a fresh ID.
    #[must_use]
    pub fn new(category_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            category_id: CategoryId::new(),
            category_name: category_name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Renames the category.
    pub fn rename(&mut self, category_name: impl Into<String>) {
        self.category_name = category_name.into();
        self.updated_at = Utc::now();
    }
}
