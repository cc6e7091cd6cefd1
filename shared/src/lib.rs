//! Shared types for the storefront
//!
//! Catalog models and endpoint DTOs used by both the presentation layer,
//! the HTTP client and the mock backend.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use error::{DataError, DataResult};
pub use models::{
    ComboId, OptionGroup, OptionPhoto, OptionValue, RawId, SelectedOptions, Variation,
    VariationCatalog,
};
pub use rust_decimal::Decimal;
