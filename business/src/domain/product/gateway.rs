use async_trait::async_trait;

use crate::domain::context::RequestContext;
use crate::domain::errors::RepositoryError;

use super::model::Product;

/// Optional filters for [`ProductGateway::find_all`]. `None` means "do not filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    pub category_id: Option<u64>,
}

/// Persistence port for products.
///
/// Every call receives the caller's [`RequestContext`] unchanged; adapters
/// report cancellation or an expired deadline as [`RepositoryError`].
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Inserts `product` and returns the identifier assigned by the store.
    async fn create(&self, ctx: &RequestContext, product: &Product) -> Result<u64, RepositoryError>;
    /// `Ok(None)` when no product has this id.
    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: u64,
    ) -> Result<Option<Product>, RepositoryError>;
    /// One page (1-based) of matching products plus the total number of matches.
    async fn find_all(
        &self,
        ctx: &RequestContext,
        filter: &ProductFilter,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Product>, u64), RepositoryError>;
    async fn update(&self, ctx: &RequestContext, product: &Product) -> Result<(), RepositoryError>;
    async fn delete(&self, ctx: &RequestContext, id: u64) -> Result<(), RepositoryError>;
}
