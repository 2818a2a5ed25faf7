use async_trait::async_trait;

use crate::domain::context::RequestContext;
use crate::domain::errors::AppError;

pub struct DeleteProductParams {
    pub id: u64,
}

#[async_trait]
pub trait DeleteProductUseCase: Send + Sync {
    async fn execute(
        &self,
        ctx: &RequestContext,
        params: DeleteProductParams,
    ) -> Result<(), AppError>;
}
