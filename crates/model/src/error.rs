use thiserror::Error;

/// Errors raised by dataset edit operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Store not found: {id}")]
    StoreNotFound { id: String },

    #[error("SKU not found: {id}")]
    SkuNotFound { id: String },

    #[error("Store id already exists: {id}")]
    DuplicateStoreId { id: String },

    #[error("SKU id already exists: {id}")]
    DuplicateSkuId { id: String },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
