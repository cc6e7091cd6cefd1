//! Backend seam used by the page handlers

use crate::http::VoteReply;
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use shared::client::{
    AddToCartRequest, AdminUser, FavoriteToggleResponse, FavoritesList, ReviewForm, ReviewPage,
    ReviewPageQuery, ReviewSubmitResponse, SearchHit, VoteAction,
};

/// Storefront backend operations
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    async fn toggle_favorite(&self, product_id: i64) -> ClientResult<FavoriteToggleResponse>;
    async fn list_favorites(&self) -> ClientResult<FavoritesList>;
    async fn add_to_cart(&self, request: &AddToCartRequest) -> ClientResult<String>;
    async fn search(&self, query: &str) -> ClientResult<Vec<SearchHit>>;
    async fn vote_review(&self, review_id: i64, action: VoteAction) -> ClientResult<VoteReply>;
    async fn review_page(&self, product_id: i64, query: ReviewPageQuery) -> ClientResult<ReviewPage>;
    async fn submit_review(&self, product: &str, form: &ReviewForm) -> ClientResult<ReviewSubmitResponse>;
    async fn admin_user(&self, user_id: i64) -> ClientResult<AdminUser>;
}

#[async_trait]
impl StorefrontApi for HttpClient {
    async fn toggle_favorite(&self, product_id: i64) -> ClientResult<FavoriteToggleResponse> {
        HttpClient::toggle_favorite(self, product_id).await
    }

    async fn list_favorites(&self) -> ClientResult<FavoritesList> {
        HttpClient::list_favorites(self).await
    }

    async fn add_to_cart(&self, request: &AddToCartRequest) -> ClientResult<String> {
        HttpClient::add_to_cart(self, request).await
    }

    async fn search(&self, query: &str) -> ClientResult<Vec<SearchHit>> {
        HttpClient::search(self, query).await
    }

    async fn vote_review(&self, review_id: i64, action: VoteAction) -> ClientResult<VoteReply> {
        HttpClient::vote_review(self, review_id, action).await
    }

    async fn review_page(&self, product_id: i64, query: ReviewPageQuery) -> ClientResult<ReviewPage> {
        HttpClient::review_page(self, product_id, query).await
    }

    async fn submit_review(&self, product: &str, form: &ReviewForm) -> ClientResult<ReviewSubmitResponse> {
        HttpClient::submit_review(self, product, form).await
    }

    async fn admin_user(&self, user_id: i64) -> ClientResult<AdminUser> {
        HttpClient::admin_user(self, user_id).await
    }
}
