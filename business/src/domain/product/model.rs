use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Signed;

use super::errors::ProductError;

/// Prices carry at most cents.
pub const MAX_PRICE_SCALE: i64 = 2;
/// Prices stay below 10^10 (ten integer digits).
pub const MAX_PRICE_INTEGER_DIGITS: u32 = 10;
/// Identifiers are stored as signed 64-bit integers.
pub const MAX_IDENTIFIER: u64 = i64::MAX as u64;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Assigned by the gateway on create; `0` until then.
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct ProductProps {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category_id: u64,
}

impl ProductProps {
    fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::NameEmpty);
        }

        if self.price.is_negative() {
            return Err(ProductError::NegativePrice);
        }

        let (_, scale) = self.price.normalized().as_bigint_and_exponent();
        if scale > MAX_PRICE_SCALE {
            return Err(ProductError::PriceTooManyDecimals);
        }

        if self.price >= BigDecimal::from(10u64.pow(MAX_PRICE_INTEGER_DIGITS)) {
            return Err(ProductError::PriceTooLarge);
        }

        if self.category_id > MAX_IDENTIFIER {
            return Err(ProductError::CategoryIdOutOfRange);
        }

        Ok(())
    }
}

impl Product {
    pub fn new(props: ProductProps) -> Result<Self, ProductError> {
        props.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: 0,
            name: props.name,
            description: props.description,
            price: props.price,
            category_id: props.category_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: u64,
        props: ProductProps,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: props.name,
            description: props.description,
            price: props.price,
            category_id: props.category_id,
            created_at,
            updated_at,
        }
    }

    /// Validates the new values before touching any field. On error the
    /// product is left exactly as it was.
    pub fn update(&mut self, props: ProductProps) -> Result<(), ProductError> {
        props.validate()?;

        self.name = props.name;
        self.description = props.description;
        self.price = props.price;
        self.category_id = props.category_id;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub(crate) fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }
}
