//! Storefront Client - HTTP client for the storefront backend
//!
//! Typed calls to the storefront endpoints (favorites, cart, search,
//! reviews, admin users) and the page handlers that drive the
//! `storefront` state types with their responses.

pub mod api;
pub mod config;
pub mod csrf;
pub mod error;
pub mod handlers;
pub mod http;

pub use api::StorefrontApi;
pub use config::ClientConfig;
pub use csrf::{CSRF_HEADER, CsrfToken};
pub use error::{ClientError, ClientResult};
pub use handlers::{Handled, SearchResults, Storefront, VoteOutcome};
pub use http::{HttpClient, VoteReply};

// Re-export shared types for convenience
pub use shared::client::{
    AddToCartRequest, AdminUser, FavoriteToggleResponse, FavoritesList, ReviewForm, ReviewPage,
    ReviewSubmitResponse, SearchHit, VoteAction, VoteResponse,
};
