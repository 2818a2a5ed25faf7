use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::model::Product;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductOutput {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedOutput {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub products: Vec<ProductOutput>,
}

/// Maps domain products to output shapes. Implementations must be pure.
pub trait ProductPresenter: Send + Sync {
    fn to_output(&self, product: &Product) -> ProductOutput;
    fn to_paginated_output(
        &self,
        products: &[Product],
        total: u64,
        page: u32,
        limit: u32,
    ) -> PaginatedOutput;
}
