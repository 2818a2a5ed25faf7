use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::context::RequestContext;
use crate::domain::errors::AppError;
use crate::domain::logger::Logger;
use crate::domain::product::gateway::ProductGateway;
use crate::domain::product::model::ProductProps;
use crate::domain::product::presenter::{ProductOutput, ProductPresenter};
use crate::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};

pub struct UpdateProductUseCaseImpl {
    pub gateway: Arc<dyn ProductGateway>,
    pub presenter: Arc<dyn ProductPresenter>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateProductUseCase for UpdateProductUseCaseImpl {
    async fn execute(
        &self,
        ctx: &RequestContext,
        params: UpdateProductParams,
    ) -> Result<ProductOutput, AppError> {
        self.logger
            .info(&format!("[{}] Updating product: {}", ctx.request_id(), params.id));

        // Existence is checked before validation, validation before persistence.
        let mut product = self
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

        product.update(ProductProps {
            name: params.name,
            description: params.description,
            price: params.price,
            category_id: params.category_id,
        })?;

        self.gateway
            .update(ctx, &product)
            .await
            .inspect_err(|e| {
                self.logger.error(&format!(
                    "[{}] Failed to persist product {}: {}",
                    ctx.request_id(),
                    product.id,
                    e
                ))
            })?;

        self.logger.info(&format!(
            "[{}] Product updated: {}",
            ctx.request_id(),
            product.id
        ));
        Ok(self.presenter.to_output(&product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::product::test_support::{
        MockProductGw, mock_logger, presenter, price, stored_product,
    };
    use crate::domain::errors::{ErrorKind, RepositoryError};
    use crate::domain::product::errors::ProductError;

    fn use_case(gateway: MockProductGw) -> UpdateProductUseCaseImpl {
        UpdateProductUseCaseImpl {
            gateway: Arc::new(gateway),
            presenter: presenter(),
            logger: mock_logger(),
        }
    }

    fn params(id: u64, name: &str) -> UpdateProductParams {
        UpdateProductParams {
            id,
            name: name.to_string(),
            description: "Updated description".to_string(),
            price: price("24.50"),
            category_id: 8,
        }
    }

    #[tokio::test]
    async fn should_update_product_when_exists() {
        let existing = stored_product(1, "Old Name");
        let created_at = existing.created_at;
        let mut gateway = MockProductGw::new();
        gateway
            .expect_find_by_id()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));
        gateway
            .expect_update()
            .withf(|_, product| {
                product.id == 1 && product.name == "New Name" && product.category_id == 8
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let result = use_case(gateway)
            .execute(&RequestContext::background(), params(1, "New Name"))
            .await;

        let output = result.unwrap();
        assert_eq!(output.id, 1);
        assert_eq!(output.name, "New Name");
        assert_eq!(output.description, "Updated description");
        assert_eq!(output.price, price("24.50"));
        assert_eq!(output.category_id, 8);
        assert_eq!(output.created_at, created_at);
        assert!(output.updated_at >= created_at);
    }

    #[tokio::test]
    async fn should_reject_update_without_persisting_when_name_is_empty() {
        let mut gateway = MockProductGw::new();
        gateway
            .expect_find_by_id()
            .returning(|_, id| Ok(Some(stored_product(id, "Original"))));
        gateway.expect_update().never();

        let result = use_case(gateway)
            .execute(&RequestContext::background(), params(1, ""))
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(
            err,
            AppError::Validation {
                source: Some(ProductError::NameEmpty),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn should_reject_update_without_persisting_when_price_is_negative() {
        let mut gateway = MockProductGw::new();
        gateway
            .expect_find_by_id()
            .returning(|_, id| Ok(Some(stored_product(id, "Original"))));
        gateway.expect_update().never();

        let result = use_case(gateway)
            .execute(
                &RequestContext::background(),
                UpdateProductParams {
                    price: price("-3"),
                    ..params(1, "Original")
                },
            )
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn should_return_not_found_before_validating_when_product_is_absent() {
        let mut gateway = MockProductGw::new();
        gateway.expect_find_by_id().returning(|_, _| Ok(None));
        gateway.expect_update().never();

        // Invalid values too: existence takes precedence over validation.
        let result = use_case(gateway)
            .execute(&RequestContext::background(), params(99, ""))
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn should_return_internal_error_when_lookup_fails() {
        let mut gateway = MockProductGw::new();
        gateway
            .expect_find_by_id()
            .returning(|_, _| Err(RepositoryError::database_error("broken pipe")));
        gateway.expect_update().never();

        let result = use_case(gateway)
            .execute(&RequestContext::background(), params(1, "Name"))
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn should_return_internal_error_when_persisting_fails() {
        let mut gateway = MockProductGw::new();
        gateway
            .expect_find_by_id()
            .returning(|_, id| Ok(Some(stored_product(id, "Original"))));
        gateway
            .expect_update()
            .returning(|_, _| Err(RepositoryError::database_error("deadlock")));

        let result = use_case(gateway)
            .execute(&RequestContext::background(), params(1, "Name"))
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn should_reject_update_without_persisting_when_category_id_is_out_of_range() {
        let mut gateway = MockProductGw::new();
        gateway
            .expect_find_by_id()
            .returning(|_, id| Ok(Some(stored_product(id, "Original"))));
        gateway.expect_update().never();

        let result = use_case(gateway)
            .execute(
                &RequestContext::background(),
                UpdateProductParams {
                    category_id: u64::MAX,
                    ..params(1, "Original")
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation {
                source: Some(ProductError::CategoryIdOutOfRange),
                ..
            })
        ));
    }
}
