#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    #[error("product.name_empty")]
    NameEmpty,
    #[error("product.price_negative")]
    NegativePrice,
    #[error("product.price_too_many_decimals")]
    PriceTooManyDecimals,
    #[error("product.price_too_large")]
    PriceTooLarge,
    #[error("product.category_id_out_of_range")]
    CategoryIdOutOfRange,
}
