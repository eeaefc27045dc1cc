//! CategoryDao trait.

use async_trait::async_trait;
use depublic_core::{Category, CategoryId, DepublicResult};

/// Low-level category data access object.
#[async_trait]
pub trait CategoryDao: Send + Sync {
    /// Lists every category.
    async fn find_all(&self) -> DepublicResult<Vec<Category>>;

    /// Finds a category by ID.
    async fn find_by_id(&self, id: CategoryId) -> DepublicResult<Option<Category>>;

    /// Persists a new category.
    async fn create(&self, category: &Category) -> DepublicResult<Category>;

    /// Renames a category. Fails with `NotFound` if it is gone.
    async fn update(&self, category: &Category) -> DepublicResult<Category>;

    /// Deletes a category by ID. Returns `true` if deleted.
    async fn delete(&self, id: CategoryId) -> DepublicResult<bool>;
}
