//! Data models
//!
//! Server-rendered product page data: option groups, variations and the
//! shopper's current selection. Identifiers arrive as JSON integers or
//! strings and are compared through [`RawId::as_int`].

pub mod id;
pub mod option;
pub mod selection;
pub mod variation;

// Re-exports
pub use id::*;
pub use option::*;
pub use selection::*;
pub use variation::*;
