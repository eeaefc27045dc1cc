//! PostgreSQL category DAO.

use crate::{dao::CategoryDao, pool::DatabasePool};
use async_trait::async_trait;
use depublic_core::{Category, CategoryId, DepublicError, DepublicResult};
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL implementation of [`CategoryDao`].
#[derive(Clone)]
pub struct PgCategoryDaoImpl {
    pool: Arc<DatabasePool>,
}

impl PgCategoryDaoImpl {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryDao for PgCategoryDaoImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Category>> {
        debug!("Finding all categories");

        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, category_name, created_at, updated_at
            FROM categories
            ORDER BY category_name
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: CategoryId) -> DepublicResult<Option<Category>> {
        debug!("Finding category by id: {}", id);

        let row = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, category_name, created_at, updated_at
            FROM categories
            WHERE category_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row)
    }

    async fn create(&self, category: &Category) -> DepublicResult<Category> {
        debug!("Creating category: {}", category.category_name);

        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (category_id, category_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING category_id, category_name, created_at, updated_at
            "#,
        )
        .bind(category.category_id)
        .bind(&category.category_name)
        .bind(category.created_at)
        .bind(category.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row)
    }

    async fn update(&self, category: &Category) -> DepublicResult<Category> {
        debug!("Updating category: {}", category.category_id);

        let row = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET category_name = $2, updated_at = NOW()
            WHERE category_id = $1
            RETURNING category_id, category_name, created_at, updated_at
            "#,
        )
        .bind(category.category_id)
        .bind(&category.category_name)
        .fetch_optional(self.pool.inner())
        .await?;

        row.ok_or_else(|| DepublicError::not_found("Category", category.category_id))
    }

    async fn delete(&self, id: CategoryId) -> DepublicResult<bool> {
        debug!("Deleting category: {}", id);

        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for PgCategoryDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCategoryDaoImpl").finish_non_exhaustive()
    }
}
