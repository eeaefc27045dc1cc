//! `CategoryRepositoryImpl`: cached category repository.
//!
//! ```text
//! Service
//!   ↓ Arc<dyn CategoryRepository>
//! CategoryRepositoryImpl      ← read-through on GetAllCategories / GetCategoryByID:{id}
//!   ↓ Arc<dyn CategoryDao>
//! PgCategoryDaoImpl
//! ```

use crate::cache::{cache_keys, CacheStore, ReadThroughCache};
use crate::{dao::CategoryDao, traits::CategoryRepository};
use async_trait::async_trait;
use depublic_core::{Category, CategoryId, DepublicResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Repository implementation that caches [`CategoryDao`] reads.
pub struct CategoryRepositoryImpl {
    category_dao: Arc<dyn CategoryDao>,
    cache: ReadThroughCache,
}

impl CategoryRepositoryImpl {
    /// Creates a new `CategoryRepositoryImpl` over a DAO and the shared cache store.
    #[must_use]
    pub fn new(category_dao: Arc<dyn CategoryDao>, store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            category_dao,
            cache: ReadThroughCache::new(store, ttl, "category"),
        }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn find_all(&self) -> DepublicResult<Vec<Category>> {
        debug!("Repository: find_all categories");
        self.cache
            .fetch(cache_keys::ALL_CATEGORIES, || self.category_dao.find_all())
            .await
    }

    async fn find_by_id(&self, id: CategoryId) -> DepublicResult<Option<Category>> {
        debug!("Repository: find_by_id category {}", id);
        let key = cache_keys::category_by_id(id);
        self.cache
            .fetch_optional(&key, || self.category_dao.find_by_id(id))
            .await
    }

    async fn create(&self, category: &Category) -> DepublicResult<Category> {
        debug!("Repository: create category {}", category.category_name);
        let created = self.category_dao.create(category).await?;
        self.cache.invalidate(&[cache_keys::ALL_CATEGORIES]).await;
        Ok(created)
    }

    async fn update(&self, category: &Category) -> DepublicResult<Category> {
        debug!("Repository: update category {}", category.category_id);
        let updated = self.category_dao.update(category).await?;
        let key = cache_keys::category_by_id(updated.category_id);
        self.cache
            .invalidate(&[cache_keys::ALL_CATEGORIES, &key])
            .await;
        Ok(updated)
    }

    async fn delete(&self, id: CategoryId) -> DepublicResult<bool> {
        debug!("Repository: delete category {}", id);
        let deleted = self.category_dao.delete(id).await?;
        let key = cache_keys::category_by_id(id);
        self.cache
            .invalidate(&[cache_keys::ALL_CATEGORIES, &key])
            .await;
        Ok(deleted)
    }
}

impl std::fmt::Debug for CategoryRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRepositoryImpl")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
