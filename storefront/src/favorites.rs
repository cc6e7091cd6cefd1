//! Favorites state

use crate::notify::Notification;
use shared::client::{FavoriteToggleResponse, FavoritesList};
use std::collections::HashSet;

/// Products the shopper has marked as favorite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    products: HashSet<i64>,
}

/// Where the toggled heart lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoritesView {
    /// The favorites page itself, where removed products disappear
    pub on_favorites_page: bool,
    /// Product cards currently on the page, including the toggled one
    pub visible_cards: usize,
}

/// Result of a successful toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggleEffect {
    pub is_favorite: bool,
    pub notification: Notification,
    /// Drop the product card (favorites page only)
    pub remove_card: bool,
    /// The favorites page became empty: go back to the home page
    pub redirect_home: bool,
}

impl From<FavoritesList> for FavoriteSet {
    fn from(list: FavoritesList) -> Self {
        Self {
            products: list.favorites.into_iter().collect(),
        }
    }
}

impl FavoriteSet {
    pub fn is_favorite(&self, product_id: i64) -> bool {
        self.products.contains(&product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Record a toggle response and work out what the page should do
    pub fn apply_toggle(
        &mut self,
        product_id: i64,
        response: &FavoriteToggleResponse,
        view: FavoritesView,
    ) -> FavoriteToggleEffect {
        if response.is_favorite {
            self.products.insert(product_id);
            return FavoriteToggleEffect {
                is_favorite: true,
                notification: Notification::success(&response.message),
                remove_card: false,
                redirect_home: false,
            };
        }

        self.products.remove(&product_id);
        let remove_card = view.on_favorites_page;
        FavoriteToggleEffect {
            is_favorite: false,
            notification: Notification::info(&response.message),
            remove_card,
            redirect_home: remove_card && view.visible_cards <= 1,
        }
    }
}
