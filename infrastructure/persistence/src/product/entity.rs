use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{Product, ProductProps};

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Result<Product, RepositoryError> {
        Ok(Product::from_repository(
            from_db_id(self.id)?,
            ProductProps {
                name: self.name,
                description: self.description,
                price: self.price,
                category_id: from_db_id(self.category_id)?,
            },
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Postgres has no unsigned integers; identifiers are stored as BIGINT.
pub fn to_db_id(id: u64) -> Result<i64, RepositoryError> {
    i64::try_from(id)
        .map_err(|_| RepositoryError::database_error(format!("identifier out of range: {id}")))
}

pub fn from_db_id(id: i64) -> Result<u64, RepositoryError> {
    u64::try_from(id)
        .map_err(|_| RepositoryError::database_error(format!("negative identifier: {id}")))
}
