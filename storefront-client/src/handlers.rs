//! Page handlers
//!
//! Each handler runs one user action end to end: guard the control, call
//! the backend, fold the answer into the page-owned state passed in, and
//! turn every failure into a [`Handled`] value. Nothing propagates out of a
//! handler, so a failing action never disturbs another one.

use crate::api::StorefrontApi;
use crate::http::VoteReply;
use crate::ClientError;
use shared::client::{ReviewForm, ReviewPageQuery, ReviewSubmitResponse, VoteAction};
use std::time::Instant;
use storefront::{
    ActionGuard, AdminUserForm, FavoriteSet, FavoriteToggleEffect, FavoritesView, Notification,
    ProductPage, ResultCard, ReviewsCursor, SearchAction, SearchThrottle, VoteCounters,
    count_cards, result_cards,
};
use tracing::{debug, error, info, warn};

pub const AUTH_REQUIRED_FAVORITES: &str = "Authentication required to add favorites";
pub const FAVORITES_FAILED: &str = "Failed to update favorites";
pub const CART_FAILED: &str = "Failed to add the product to the cart";
pub const SEARCH_FAILED: &str = "Search is temporarily unavailable";
pub const ALREADY_VOTED: &str = "You have already voted for this review";
pub const VOTE_FAILED: &str = "Failed to register the vote";
pub const REVIEWS_FAILED: &str = "Failed to load more reviews";
pub const REVIEW_THANKS: &str = "Thank you for your review! It will appear after moderation.";
pub const REVIEW_FAILED: &str = "Failed to submit the review";
pub const ADMIN_USER_FAILED: &str = "Failed to load the user";

/// Outcome of a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled<T> {
    /// The action completed and its result was applied
    Applied(T),
    /// The action failed; show this to the shopper
    Failed(Notification),
    /// The control already has a request in flight; the action was dropped
    Busy,
    /// Input data was missing or malformed; logged, nothing to show
    Aborted,
    /// Nothing to do (throttled input, exhausted list)
    Ignored,
}

impl<T> Handled<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Handled::Applied(value) => Some(value),
            _ => None,
        }
    }

    /// Failure notification, if any
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Handled::Failed(n) => Some(n),
            _ => None,
        }
    }
}

/// What the search dropdown should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults {
    Hidden,
    Cards(Vec<ResultCard>),
}

/// Result of a like/dislike click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteOutcome {
    /// Whether this vote was recorded
    pub counted: bool,
    /// Counters after syncing with the server
    pub counters: VoteCounters,
    /// Message for a repeated vote
    pub notification: Option<Notification>,
}

/// User actions of the storefront pages
#[derive(Debug, Clone)]
pub struct Storefront<A> {
    api: A,
    guard: ActionGuard,
}

impl<A: StorefrontApi> Storefront<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            guard: ActionGuard::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn guard(&self) -> &ActionGuard {
        &self.guard
    }

    // ========== Favorites ==========

    /// Load the favorite state used to paint the hearts
    pub async fn load_favorites(&self) -> Handled<FavoriteSet> {
        match self.api.list_favorites().await {
            Ok(list) => {
                debug!(count = list.favorites.len(), "Loaded favorites");
                Handled::Applied(FavoriteSet::from(list))
            }
            Err(e) => {
                warn!(error = %e, "Failed to load favorites");
                Handled::Aborted
            }
        }
    }

    /// Heart click on a product card
    pub async fn toggle_favorite(
        &self,
        favorites: &mut FavoriteSet,
        product_id: Option<i64>,
        view: FavoritesView,
    ) -> Handled<FavoriteToggleEffect> {
        let Some(product_id) = product_id else {
            error!("Product ID not found");
            return Handled::Aborted;
        };
        let Some(_in_flight) = self.guard.try_begin(format!("favorite:{}", product_id)) else {
            return Handled::Busy;
        };

        match self.api.toggle_favorite(product_id).await {
            Ok(response) => {
                info!(product_id, is_favorite = response.is_favorite, "Favorite toggled");
                Handled::Applied(favorites.apply_toggle(product_id, &response, view))
            }
            Err(ClientError::Unauthorized) => {
                Handled::Failed(Notification::error(AUTH_REQUIRED_FAVORITES))
            }
            Err(e) => {
                warn!(product_id, error = %e, "Failed to toggle favorite");
                Handled::Failed(Notification::error(FAVORITES_FAILED))
            }
        }
    }

    // ========== Cart ==========

    /// Add-to-cart click on the product page
    ///
    /// The line carries the resolved variation's id and price so the cart
    /// shows what the page showed.
    pub async fn add_to_cart(
        &self,
        page: &ProductPage,
        product_id: Option<i64>,
        quantity: u32,
    ) -> Handled<String> {
        let request = match page.cart_request(product_id, quantity) {
            Ok(request) => request,
            Err(_) => return Handled::Aborted,
        };
        let Some(_in_flight) = self.guard.try_begin(format!("cart:{}", request.product_id)) else {
            return Handled::Busy;
        };

        match self.api.add_to_cart(&request).await {
            Ok(message) => Handled::Applied(message),
            Err(e) => {
                warn!(product_id = request.product_id, error = %e, "Failed to add to cart");
                Handled::Failed(Notification::error(CART_FAILED))
            }
        }
    }

    // ========== Search ==========

    /// Input event of the search box
    pub async fn search(
        &self,
        throttle: &mut SearchThrottle,
        text: &str,
        now: Instant,
    ) -> Handled<SearchResults> {
        let query = match throttle.on_input(text, now) {
            SearchAction::Throttled => return Handled::Ignored,
            SearchAction::Hide => return Handled::Applied(SearchResults::Hidden),
            SearchAction::Query(query) => query,
        };

        match self.api.search(&query).await {
            Ok(hits) => Handled::Applied(SearchResults::Cards(result_cards(&hits))),
            Err(e) => {
                warn!(%query, error = %e, "Search failed");
                Handled::Failed(Notification::error(SEARCH_FAILED))
            }
        }
    }

    // ========== Reviews ==========

    /// Like/dislike click on a review card
    ///
    /// Counters are overwritten from the server payload, also when the vote
    /// is a repeat; they are never bumped locally.
    pub async fn vote(
        &self,
        review_id: Option<i64>,
        action: VoteAction,
        counters: &mut VoteCounters,
    ) -> Handled<VoteOutcome> {
        let Some(review_id) = review_id else {
            error!("Review ID not found");
            return Handled::Aborted;
        };
        let Some(_in_flight) = self.guard.try_begin(format!("vote:{}", review_id)) else {
            return Handled::Busy;
        };

        match self.api.vote_review(review_id, action).await {
            Ok(VoteReply::Counted(response)) => {
                if !response.ok {
                    debug!(review_id, "Vote not accepted");
                    return Handled::Ignored;
                }
                counters.sync(&response);
                Handled::Applied(VoteOutcome {
                    counted: true,
                    counters: *counters,
                    notification: None,
                })
            }
            Ok(VoteReply::Duplicate(response)) => {
                counters.sync(&response);
                Handled::Applied(VoteOutcome {
                    counted: false,
                    counters: *counters,
                    notification: Some(Notification::info(ALREADY_VOTED)),
                })
            }
            Err(e) => {
                warn!(review_id, error = %e, "Failed to vote");
                Handled::Failed(Notification::error(VOTE_FAILED))
            }
        }
    }

    /// "Load more" click under the review list
    ///
    /// Returns the fragment to insert before the button and advances the
    /// cursor past it.
    pub async fn load_more_reviews(
        &self,
        product_id: Option<i64>,
        cursor: &mut ReviewsCursor,
    ) -> Handled<String> {
        let Some(product_id) = product_id else {
            error!("Product ID not found");
            return Handled::Aborted;
        };
        if cursor.is_exhausted() {
            return Handled::Ignored;
        }
        let Some(_in_flight) = self.guard.try_begin(format!("reviews:{}", product_id)) else {
            return Handled::Busy;
        };

        let query = ReviewPageQuery {
            offset: cursor.offset(),
            limit: cursor.limit(),
        };
        match self.api.review_page(product_id, query).await {
            Ok(page) if page.ok => {
                cursor.advance(&page, count_cards(&page.html));
                Handled::Applied(page.html)
            }
            Ok(_) => {
                debug!(product_id, "Review page not ok");
                Handled::Ignored
            }
            Err(e) => {
                warn!(product_id, error = %e, "Failed to load reviews");
                Handled::Failed(Notification::error(REVIEWS_FAILED))
            }
        }
    }

    /// Submit of the review dialog
    pub async fn submit_review(&self, product: &str, form: &ReviewForm) -> Handled<Notification> {
        if product.is_empty() {
            error!("Review form has no product");
            return Handled::Aborted;
        }
        let Some(_in_flight) = self.guard.try_begin(format!("review-form:{}", product)) else {
            return Handled::Busy;
        };

        match self.api.submit_review(product, form).await {
            Ok(response) if response.ok => Handled::Applied(Notification::success(REVIEW_THANKS)),
            Ok(response) => Handled::Failed(Notification::error(
                response.message.unwrap_or_else(|| REVIEW_FAILED.to_string()),
            )),
            Err(ClientError::Validation(body)) => {
                let message = serde_json::from_str::<ReviewSubmitResponse>(&body)
                    .ok()
                    .and_then(|r| r.message)
                    .unwrap_or_else(|| REVIEW_FAILED.to_string());
                Handled::Failed(Notification::error(message))
            }
            Err(e) => {
                warn!(product, error = %e, "Failed to submit review");
                Handled::Failed(Notification::error(REVIEW_FAILED))
            }
        }
    }

    // ========== Admin ==========

    /// Open the edit form for a user row
    pub async fn open_admin_user(&self, form: &mut AdminUserForm, user_id: Option<i64>) -> Handled<()> {
        let Some(user_id) = user_id else {
            error!("User ID not found");
            return Handled::Aborted;
        };
        let Some(_in_flight) = self.guard.try_begin("admin-user") else {
            return Handled::Busy;
        };

        match self.api.admin_user(user_id).await {
            Ok(user) => {
                form.fill(user_id, user);
                Handled::Applied(())
            }
            Err(e) => {
                warn!(user_id, error = %e, "Failed to load user");
                Handled::Failed(Notification::error(ADMIN_USER_FAILED))
            }
        }
    }
}
