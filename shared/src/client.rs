//! Client-related types shared between backend and client
//!
//! Request/response bodies of the storefront endpoints. The mock backend
//! produces them and `storefront-client` consumes them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Favorites
// =============================================================================

/// `POST /favorites/toggle` form body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteToggleRequest {
    pub product_id: i64,
}

/// `POST /favorites/toggle` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteToggleResponse {
    pub is_favorite: bool,
    pub message: String,
}

/// `GET /favorites/list` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesList {
    #[serde(default)]
    pub favorites: Vec<i64>,
}

// =============================================================================
// Cart
// =============================================================================

/// `POST /cart/add` form body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i64,
    /// Selection as a JSON object string
    pub selected_options: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<String>,
    /// Price of the resolved variation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

// =============================================================================
// Search
// =============================================================================

/// `GET /search` query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// One product of a search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub slug: String,
    pub image: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl SearchHit {
    /// Product page link
    pub fn product_url(&self) -> String {
        format!("/product/{}", self.slug)
    }

    /// Thumbnail URL under the uploads directory
    pub fn image_url(&self) -> String {
        format!("/static/uploads/{}", self.image)
    }
}

// =============================================================================
// Reviews
// =============================================================================

/// Vote direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    Like,
    Dislike,
}

/// `POST /reviews/{id}/vote` body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VoteRequest {
    pub action: VoteAction,
}

/// `POST /reviews/{id}/vote` response, for both 200 and 409
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default)]
    pub dislikes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `GET /product/{id}/reviews` query
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReviewPageQuery {
    pub offset: u32,
    pub limit: u32,
}

/// `GET /product/{id}/reviews` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewPage {
    #[serde(default)]
    pub ok: bool,
    /// Rendered review cards
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub next_offset: u32,
    #[serde(default)]
    pub has_more: bool,
}

/// Review form fields as submitted by the review dialog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewForm {
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comfort_score: Option<u8>,
    #[serde(default)]
    pub comment: String,
    /// Checkbox semantics: present as `"on"` when ticked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
}

/// `POST /product/{slug}/review` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSubmitResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// Admin
// =============================================================================

/// `GET /admin/users` query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserQuery {
    pub user_id: i64,
}

/// User details for the admin edit form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub username: String,
    pub email: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_conflict_body() {
        let body: VoteResponse =
            serde_json::from_str(r#"{"ok": false, "message": "duplicate", "likes": 4, "dislikes": 1}"#)
                .unwrap();
        assert!(!body.ok);
        assert_eq!((body.likes, body.dislikes), (Some(4), Some(1)));
    }

    #[test]
    fn test_search_hit_links() {
        let hit: SearchHit = serde_json::from_str(
            r#"{"slug": "linen-shirt", "image": "shirt.jpg", "name": "Linen shirt", "price": 1990}"#,
        )
        .unwrap();
        assert_eq!(hit.product_url(), "/product/linen-shirt");
        assert_eq!(hit.image_url(), "/static/uploads/shirt.jpg");
        assert_eq!(hit.price, Decimal::new(1990, 0));
    }

    #[test]
    fn test_vote_action_wire_format() {
        let body = serde_json::to_string(&VoteRequest { action: VoteAction::Dislike }).unwrap();
        assert_eq!(body, r#"{"action":"dislike"}"#);
    }
}
