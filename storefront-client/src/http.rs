//! HTTP client for the storefront endpoints

use crate::csrf::{CSRF_HEADER, CsrfToken};
use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::client::{
    AddToCartRequest, AdminUser, AdminUserQuery, FavoriteToggleRequest, FavoriteToggleResponse,
    FavoritesList, ReviewForm, ReviewPage, ReviewPageQuery, ReviewSubmitResponse, SearchHit,
    SearchQuery, VoteAction, VoteRequest, VoteResponse,
};
use tracing::{debug, warn};

/// Header marking a request as an in-page (AJAX) call
pub const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Server answer to a vote
#[derive(Debug, Clone, PartialEq)]
pub enum VoteReply {
    /// The vote was recorded
    Counted(VoteResponse),
    /// The shopper already voted on this review; counts are still current
    Duplicate(VoteResponse),
}

impl VoteReply {
    pub fn counts(&self) -> &VoteResponse {
        match self {
            VoteReply::Counted(r) | VoteReply::Duplicate(r) => r,
        }
    }
}

/// HTTP client for making requests to the storefront backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    csrf: Option<CsrfToken>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            csrf: config.csrf_token.clone().map(CsrfToken::new),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the CSRF token
    pub fn with_csrf_token(mut self, token: CsrfToken) -> Self {
        self.csrf = Some(token);
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn csrf_token(&self) -> Option<&CsrfToken> {
        self.csrf.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Load a page and pick up its CSRF token
    ///
    /// Returns whether a token was found; an existing token is kept when
    /// the page carries none.
    pub async fn refresh_csrf(&mut self, page: &str) -> ClientResult<bool> {
        let html = Self::handle_text(self.request(self.client.get(self.url(page))).send().await?)
            .await?;
        match CsrfToken::from_meta(&html) {
            Some(token) => {
                self.csrf = Some(token);
                Ok(true)
            }
            None => {
                warn!(page, "Page carries no csrf-token meta tag");
                Ok(false)
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn request(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        request
    }

    /// Mutating requests also carry the CSRF token
    fn mutating(&self, request: RequestBuilder) -> RequestBuilder {
        let request = self.request(request);
        match &self.csrf {
            Some(token) => request.header(CSRF_HEADER, token.as_str()),
            None => request,
        }
    }

    /// Make a GET request with query parameters
    pub async fn get<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let request = self.request(self.client.get(self.url(path)).query(query));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with a form-encoded body
    pub async fn post_form<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.mutating(self.client.post(self.url(path)).form(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.mutating(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    fn status_error(status: StatusCode, text: String) -> ClientError {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::Validation(text),
            StatusCode::CONFLICT => ClientError::Conflict(text),
            _ => ClientError::Internal(text),
        }
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::status_error(status, text));
        }

        response.json().await.map_err(Into::into)
    }

    async fn handle_text(response: reqwest::Response) -> ClientResult<String> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Self::status_error(status, text));
        }
        Ok(text)
    }

    // ========== Favorites API ==========

    /// Add or remove a product from the shopper's favorites
    pub async fn toggle_favorite(&self, product_id: i64) -> ClientResult<FavoriteToggleResponse> {
        self.post_form("/favorites/toggle", &FavoriteToggleRequest { product_id })
            .await
    }

    /// Product ids currently marked as favorite (empty for guests)
    pub async fn list_favorites(&self) -> ClientResult<FavoritesList> {
        self.get("/favorites/list", &()).await
    }

    // ========== Cart API ==========

    /// Add a line to the cart; the server answers with a plain-text message
    pub async fn add_to_cart(&self, request: &AddToCartRequest) -> ClientResult<String> {
        let request = self.mutating(self.client.post(self.url("/cart/add")).form(request));
        let message = Self::handle_text(request.send().await?).await?;
        debug!(%message, "Added to cart");
        Ok(message)
    }

    // ========== Search API ==========

    pub async fn search(&self, query: &str) -> ClientResult<Vec<SearchHit>> {
        self.get(
            "/search",
            &SearchQuery {
                query: query.to_string(),
            },
        )
        .await
    }

    // ========== Reviews API ==========

    /// Like or dislike a review
    ///
    /// A repeated vote is answered with 409 and the current counts; that is
    /// reported as [`VoteReply::Duplicate`] rather than an error.
    pub async fn vote_review(&self, review_id: i64, action: VoteAction) -> ClientResult<VoteReply> {
        let path = format!("/reviews/{}/vote", review_id);
        let request = self.mutating(self.client.post(self.url(&path)).json(&VoteRequest { action }));
        let response = request.send().await?;

        if response.status() == StatusCode::CONFLICT {
            let body = response.text().await?;
            let counts = serde_json::from_str::<VoteResponse>(&body)
                .map_err(|_| ClientError::Conflict(body))?;
            return Ok(VoteReply::Duplicate(counts));
        }
        Self::handle_response(response).await.map(VoteReply::Counted)
    }

    /// Fetch a page of rendered review cards
    pub async fn review_page(&self, product_id: i64, query: ReviewPageQuery) -> ClientResult<ReviewPage> {
        self.get(&format!("/product/{}/reviews", product_id), &query)
            .await
    }

    /// Submit the review dialog
    ///
    /// `product` is the product's id or slug as it appears in the form action.
    pub async fn submit_review(&self, product: &str, form: &ReviewForm) -> ClientResult<ReviewSubmitResponse> {
        let path = format!("/product/{}/review", product);
        let request = self
            .mutating(self.client.post(self.url(&path)).form(form))
            .header(REQUESTED_WITH.0, REQUESTED_WITH.1);
        Self::handle_response(request.send().await?).await
    }

    // ========== Admin API ==========

    /// Details for the admin user edit form
    pub async fn admin_user(&self, user_id: i64) -> ClientResult<AdminUser> {
        self.get("/admin/users", &AdminUserQuery { user_id }).await
    }
}
