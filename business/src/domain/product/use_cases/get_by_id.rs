use async_trait::async_trait;

use crate::domain::context::RequestContext;
use crate::domain::errors::AppError;
use crate::domain::product::presenter::ProductOutput;

pub struct GetProductByIdParams {
    pub id: u64,
}

#[async_trait]
pub trait GetProductByIdUseCase: Send + Sync {
    async fn execute(
        &self,
        ctx: &RequestContext,
        params: GetProductByIdParams,
    ) -> Result<ProductOutput, AppError>;
}
