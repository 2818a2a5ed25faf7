use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::context::RequestContext;
use crate::domain::errors::AppError;
use crate::domain::logger::Logger;
use crate::domain::product::gateway::ProductGateway;
use crate::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};

pub struct DeleteProductUseCaseImpl {
    pub gateway: Arc<dyn ProductGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteProductUseCase for DeleteProductUseCaseImpl {
    async fn execute(
        &self,
        ctx: &RequestContext,
        params: DeleteProductParams,
    ) -> Result<(), AppError> {
        self.logger
            .info(&format!("[{}] Deleting product: {}", ctx.request_id(), params.id));

        let exists = self
            .gateway
            .find_by_id(ctx, params.id)
            .await
            .inspect_err(|e| {
                self.logger.error(&format!(
                    "[{}] Failed to fetch product {}: {}",
                    ctx.request_id(),
                    params.id,
                    e
                ))
            })?
            .is_some();
        if !exists {
            self.logger.warn(&format!(
                "[{}] Product not found: {}",
                ctx.request_id(),
                params.id
            ));
            return Err(AppError::not_found("product.not_found"));
        }

        self.gateway
            .delete(ctx, params.id)
            .await
            .inspect_err(|e| {
                self.logger.error(&format!(
                    "[{}] Failed to delete product {}: {}",
                    ctx.request_id(),
                    params.id,
                    e
                ))
            })?;

        self.logger.info(&format!(
            "[{}] Product deleted: {}",
            ctx.request_id(),
            params.id
        ));
        Ok(())
    }
}
