use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::context::RequestContext;
use crate::domain::errors::AppError;
use crate::domain::logger::Logger;
use crate::domain::product::gateway::ProductGateway;
use crate::domain::product::model::{Product, ProductProps};
use crate::domain::product::presenter::{ProductOutput, ProductPresenter};
use crate::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};

pub struct CreateProductUseCaseImpl {
    pub gateway: Arc<dyn ProductGateway>,
    pub presenter: Arc<dyn ProductPresenter>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateProductUseCase for CreateProductUseCaseImpl {
    async fn execute(
        &self,
        ctx: &RequestContext,
        params: CreateProductParams,
    ) -> Result<ProductOutput, AppError> {
        self.logger.info(&format!(
            "[{}] Creating product: {}",
            ctx.request_id(),
            params.name
        ));

        let product = Product::new(ProductProps {
            name: params.name,
            description: params.description,
            price: params.price,
            category_id: params.category_id,
        })?;

        let id = self
            .gateway
            .create(ctx, &product)
            .await
            .inspect_err(|e| {
                self.logger.error(&format!(
                    "[{}] Failed to persist product: {}",
                    ctx.request_id(),
                    e
                ))
            })?;
        let product = product.with_id(id);

        self.logger.info(&format!(
            "[{}] Product created with id: {}",
            ctx.request_id(),
            product.id
        ));
        Ok(self.presenter.to_output(&product))
    }
}
