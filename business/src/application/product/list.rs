use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::context::RequestContext;
use crate::domain::errors::AppError;
use crate::domain::logger::Logger;
use crate::domain::product::gateway::{ProductFilter, ProductGateway};
use crate::domain::product::presenter::{PaginatedOutput, ProductPresenter};
use crate::domain::product::use_cases::list::{
    ListProductsParams, ListProductsUseCase, MAX_PAGE_LIMIT,
};

pub struct ListProductsUseCaseImpl {
    pub gateway: Arc<dyn ProductGateway>,
    pub presenter: Arc<dyn ProductPresenter>,
    pub logger: Arc<dyn Logger>,
}

impl ListProductsUseCaseImpl {
    fn validate(params: &ListProductsParams) -> Result<(), AppError> {
        if params.page < 1 {
            return Err(AppError::invalid_input("pagination.page_must_be_greater_than_zero"));
        }

        if params.limit < 1 || params.limit > MAX_PAGE_LIMIT {
            return Err(AppError::invalid_input("pagination.limit_must_be_between_1_and_100"));
        }

        Ok(())
    }
}

#[async_trait]
impl ListProductsUseCase for ListProductsUseCaseImpl {
    async fn execute(
        &self,
        ctx: &RequestContext,
        params: ListProductsParams,
    ) -> Result<PaginatedOutput, AppError> {
        self.logger.info(&format!(
            "[{}] Listing products: page={} limit={}",
            ctx.request_id(),
            params.page,
            params.limit
        ));

        Self::validate(&params).inspect_err(|e| {
            self.logger
                .warn(&format!("[{}] Rejected list request: {}", ctx.request_id(), e))
        })?;

        let filter = ProductFilter {
            name: params.name,
            category_id: params.category_id,
        };

        let (products, total) = self
            .gateway
            .find_all(ctx, &filter, params.page, params.limit)
            .await
            .inspect_err(|e| {
                self.logger.error(&format!(
                    "[{}] Failed to list products: {}",
                    ctx.request_id(),
                    e
                ))
            })?;

        self.logger.debug(&format!(
            "[{}] Found {} of {} products",
            ctx.request_id(),
            products.len(),
            total
        ));
        Ok(self
            .presenter
            .to_paginated_output(&products, total, params.page, params.limit))
    }
}
