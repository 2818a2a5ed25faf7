use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::context::RequestContext;
use crate::domain::errors::AppError;
use crate::domain::product::presenter::ProductOutput;

pub struct UpdateProductParams {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category_id: u64,
}

#[async_trait]
pub trait UpdateProductUseCase: Send + Sync {
    async fn execute(
        &self,
        ctx: &RequestContext,
        params: UpdateProductParams,
    ) -> Result<ProductOutput, AppError>;
}
