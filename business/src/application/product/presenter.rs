use crate::domain::product::model::Product;
use crate::domain::product::presenter::{PaginatedOutput, ProductOutput, ProductPresenter};

/// Field-for-field presenter used by the REST adapter.
pub struct ProductOutputPresenter;

impl ProductPresenter for ProductOutputPresenter {
    fn to_output(&self, product: &Product) -> ProductOutput {
        ProductOutput {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
            category_id: product.category_id,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }

    fn to_paginated_output(
        &self,
        products: &[Product],
        total: u64,
        page: u32,
        limit: u32,
    ) -> PaginatedOutput {
        PaginatedOutput {
            total,
            page,
            limit,
            products: products.iter().map(|p| self.to_output(p)).collect(),
        }
    }
}
