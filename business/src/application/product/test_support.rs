use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use mockall::mock;

use crate::domain::context::RequestContext;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::gateway::{ProductFilter, ProductGateway};
use crate::domain::product::model::{Product, ProductProps};
use crate::domain::product::presenter::ProductPresenter;

use super::presenter::ProductOutputPresenter;

mock! {
    pub ProductGw {}

    #[async_trait]
    impl ProductGateway for ProductGw {
        async fn create(&self, ctx: &RequestContext, product: &Product) -> Result<u64, RepositoryError>;
        async fn find_by_id(&self, ctx: &RequestContext, id: u64) -> Result<Option<Product>, RepositoryError>;
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
}

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

pub fn presenter() -> Arc<dyn ProductPresenter> {
    Arc::new(ProductOutputPresenter)
}

pub fn price(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

pub fn stored_product(id: u64, name: &str) -> Product {
    let now = Utc::now();
    Product::from_repository(
        id,
        ProductProps {
            name: name.to_string(),
            description: "Stored description".to_string(),
            price: price("19.90"),
            category_id: 2,
        },
        now,
        now,
    )
}
