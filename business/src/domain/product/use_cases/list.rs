use async_trait::async_trait;

use crate::domain::context::RequestContext;
use crate::domain::errors::AppError;
use crate::domain::product::presenter::PaginatedOutput;

pub const MAX_PAGE_LIMIT: u32 = 100;

pub struct ListProductsParams {
    pub name: Option<String>,
    pub category_id: Option<u64>,
    /// 1-based.
    pub page: u32,
    /// Between 1 and [`MAX_PAGE_LIMIT`].
    pub limit: u32,
}

#[async_trait]
pub trait ListProductsUseCase: Send + Sync {
    async fn execute(
        &self,
        ctx: &RequestContext,
        params: ListProductsParams,
    ) -> Result<PaginatedOutput, AppError>;
}
