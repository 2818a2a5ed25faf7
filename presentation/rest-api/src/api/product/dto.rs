use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use poem_openapi::Object;

use business::domain::errors::AppError;
use business::domain::product::presenter::{PaginatedOutput, ProductOutput};

#[derive(Debug, Clone, Object)]
pub struct CreateProductRequest {
    /// Product name (cannot be empty)
    pub name: String,
    /// Free-form description
    #[oai(default)]
    pub description: String,
    /// Unit price (cannot be negative)
    pub price: f64,
    /// Owning category identifier
    pub category_id: u64,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateProductRequest {
    /// Product name (cannot be empty)
    pub name: String,
    /// Free-form description
    #[oai(default)]
    pub description: String,
    /// Unit price (cannot be negative)
    pub price: f64,
    /// Owning category identifier
    pub category_id: u64,
}

#[derive(Debug, Clone, Object)]
pub struct ProductResponse {
    /// Product identifier
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<ProductOutput> for ProductResponse {
    fn from(output: ProductOutput) -> Self {
        Self {
            id: output.id,
            name: output.name,
            description: output.description,
            price: price_to_f64(&output.price),
            category_id: output.category_id,
            created_at: output.created_at,
            updated_at: output.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct PaginatedProductsResponse {
    /// Number of products matching the filters
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub products: Vec<ProductResponse>,
}

impl From<PaginatedOutput> for PaginatedProductsResponse {
    fn from(output: PaginatedOutput) -> Self {
        Self {
            total: output.total,
            page: output.page,
            limit: output.limit,
            products: output.products.into_iter().map(Into::into).collect(),
        }
    }
}

/// Stored prices have at most ten integer digits and two decimals, so they
/// always fit an `f64`.
fn price_to_f64(price: &BigDecimal) -> f64 {
    price.to_f64().unwrap_or_else(|| {
        tracing::error!(%price, "price not representable as a JSON number");
        f64::NAN
    })
}

/// Converts a JSON price through its shortest decimal rendering so `9.99`
/// stays `9.99` instead of the nearest binary fraction.
pub fn parse_price(price: f64) -> Result<BigDecimal, AppError> {
    if !price.is_finite() {
        return Err(AppError::invalid_input("product.price_invalid"));
    }
    BigDecimal::from_str(&price.to_string())
        .map_err(|_| AppError::invalid_input("product.price_invalid"))
}
