//! Storefront presentation logic
//!
//! State and decision logic behind the storefront pages: variation
//! resolution for the product page, gallery swaps, review widgets, the
//! search box, the filter sidebar and favorites. Nothing here performs I/O;
//! `storefront-client` feeds these types with server responses.

pub mod admin;
pub mod favorites;
pub mod filter;
pub mod gallery;
pub mod guard;
pub mod notify;
pub mod page;
pub mod price;
pub mod reviews;
pub mod search;
pub mod variation;

pub use admin::AdminUserForm;
pub use favorites::{FavoriteSet, FavoriteToggleEffect, FavoritesView};
pub use filter::{FilterGroup, FilterKind, FilterSidebar};
pub use gallery::{GalleryPlan, SlotState};
pub use guard::{ActionGuard, ControlState, InFlight};
pub use notify::{Notification, NotificationLevel};
pub use page::{PageError, ProductPage, SelectionUpdate, StockStatus, VariationDisplay};
pub use reviews::{FitScale, ReviewsCursor, StarInput, VoteCounters, count_cards};
pub use search::{ResultCard, SearchAction, SearchThrottle, result_cards};
pub use variation::{MatchTier, Resolution, resolve, resolve_with_tier};
