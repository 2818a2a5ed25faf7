use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::context::RequestContext;
use crate::domain::errors::AppError;
use crate::domain::logger::Logger;
use crate::domain::product::gateway::ProductGateway;
use crate::domain::product::presenter::{ProductOutput, ProductPresenter};
use crate::domain::product::use_cases::get_by_id::{GetProductByIdParams, GetProductByIdUseCase};

pub struct GetProductByIdUseCaseImpl {
    pub gateway: Arc<dyn ProductGateway>,
    pub presenter: Arc<dyn ProductPresenter>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductByIdUseCase for GetProductByIdUseCaseImpl {
    async fn execute(
        &self,
        ctx: &RequestContext,
        params: GetProductByIdParams,
    ) -> Result<ProductOutput, AppError> {
        self.logger.info(&format!(
            "[{}] Fetching product by id: {}",
            ctx.request_id(),
            params.id
        ));

        let product = self
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
            .ok_or_else(|| {
                self.logger.warn(&format!(
                    "[{}] Product not found: {}",
                    ctx.request_id(),
                    params.id
                ));
                AppError::not_found("product.not_found")
            })?;

        Ok(self.presenter.to_output(&product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::product::test_support::{
        MockLog, MockProductGw, mock_logger, presenter, stored_product,
    };
    use crate::domain::errors::{ErrorKind, RepositoryError};

    fn use_case(gateway: MockProductGw) -> GetProductByIdUseCaseImpl {
        GetProductByIdUseCaseImpl {
            gateway: Arc::new(gateway),
            presenter: presenter(),
            logger: mock_logger(),
        }
    }

    #[tokio::test]
    async fn should_return_product_when_exists() {
        let mut gateway = MockProductGw::new();
        gateway
            .expect_find_by_id()
            .withf(|_, id| *id == 1)
            .times(1)
            .returning(|_, id| Ok(Some(stored_product(id, "Fresh Salmon"))));

        let result = use_case(gateway)
            .execute(&RequestContext::background(), GetProductByIdParams { id: 1 })
            .await;

        let output = result.unwrap();
        assert_eq!(output.id, 1);
        assert_eq!(output.name, "Fresh Salmon");
    }

    #[tokio::test]
    async fn should_return_not_found_when_product_is_absent() {
        let mut gateway = MockProductGw::new();
        gateway.expect_find_by_id().returning(|_, _| Ok(None));

        let result = use_case(gateway)
            .execute(&RequestContext::background(), GetProductByIdParams { id: 404 })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "product.not_found");
    }

    #[tokio::test]
    async fn should_return_internal_error_when_gateway_fails() {
        let mut gateway = MockProductGw::new();
        gateway
            .expect_find_by_id()
            .returning(|_, _| Err(RepositoryError::database_error("timeout")));

        let result = use_case(gateway)
            .execute(&RequestContext::background(), GetProductByIdParams { id: 1 })
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn should_return_internal_error_when_context_is_cancelled() {
        let mut gateway = MockProductGw::new();
        gateway
            .expect_find_by_id()
            .returning(|ctx, _| match ctx.check() {
                Ok(()) => Ok(None),
                Err(e) => Err(e.into()),
            });
        let ctx = RequestContext::background();
        ctx.cancel();

        let result = use_case(gateway)
            .execute(&ctx, GetProductByIdParams { id: 1 })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(matches!(
            err,
            AppError::Internal {
                source: Some(RepositoryError::Cancelled),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn should_tag_not_found_warning_with_request_id() {
        let ctx = RequestContext::background();
        let prefix = format!("[{}]", ctx.request_id());
        let mut gateway = MockProductGw::new();
        gateway.expect_find_by_id().returning(|_, _| Ok(None));
        let mut logger = MockLog::new();
        let info_prefix = prefix.clone();
        logger
            .expect_info()
            .withf(move |message| message.starts_with(&info_prefix))
            .returning(|_| ());
        logger
            .expect_warn()
            .withf(move |message| message.starts_with(&prefix))
            .times(1)
            .returning(|_| ());
        let use_case = GetProductByIdUseCaseImpl {
            gateway: Arc::new(gateway),
            presenter: presenter(),
            logger: Arc::new(logger),
        };

        let result = use_case.execute(&ctx, GetProductByIdParams { id: 5 }).await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }
}
