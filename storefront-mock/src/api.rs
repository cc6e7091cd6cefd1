use crate::state::{Account, AppState, CartLine, Review, Role, VoteResult};
use axum::{
    Form, Json, Router,
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use shared::client::{
    AddToCartRequest, AdminUser, AdminUserQuery, FavoriteToggleRequest, FavoriteToggleResponse,
    FavoritesList, ReviewForm, ReviewPage, ReviewSubmitResponse, SearchHit, SearchQuery,
    VoteAction, VoteRequest, VoteResponse,
};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const CSRF_HEADER: &str = "x-csrftoken";
const DEFAULT_REVIEW_LIMIT: u32 = 2;
const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Permission denied")]
    Forbidden,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ===== Request context =====

fn current_account(state: &AppState, headers: &HeaderMap) -> Option<Account> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    state.account_for_token(token.trim())
}

fn current_customer(state: &AppState, headers: &HeaderMap) -> Option<Account> {
    current_account(state, headers).filter(|a| a.role == Role::Customer)
}

/// A CSRF header, when sent, must carry the page token
fn check_csrf(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    match headers.get(CSRF_HEADER).map(|v| v.to_str()) {
        None => Ok(()),
        Some(Ok(token)) if token == state.csrf_token => Ok(()),
        Some(_) => {
            warn!("CSRF token mismatch");
            Err(ApiError::BadRequest("CSRF token mismatch"))
        }
    }
}

/// Customers vote by email, guests by client address
fn voter_key(account: Option<&Account>, headers: &HeaderMap, peer: SocketAddr) -> String {
    if let Some(account) = account {
        return account.email.trim().to_lowercase();
    }
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| peer.ip().to_string())
}

// ===== Pages =====

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html><head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"csrf-token\" content=\"{}\">\n<title>Storefront</title>\n\
         </head><body></body></html>",
        state.csrf_token
    ))
}

// ===== Favorites =====

async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(req): Form<FavoriteToggleRequest>,
) -> ApiResult<Json<FavoriteToggleResponse>> {
    check_csrf(&state, &headers)?;
    let customer = current_customer(&state, &headers).ok_or(ApiError::Unauthorized)?;
    if req.product_id <= 0 {
        return Err(ApiError::BadRequest("Invalid product id"));
    }
    if state.product(req.product_id).is_none() {
        return Err(ApiError::NotFound("Product not found"));
    }

    let is_favorite = state.toggle_favorite(customer.id, req.product_id);
    info!(customer = customer.id, product_id = req.product_id, is_favorite, "Favorite toggled");
    let message = if is_favorite {
        "Product added to favorites"
    } else {
        "Product removed from favorites"
    };
    Ok(Json(FavoriteToggleResponse {
        is_favorite,
        message: message.to_string(),
    }))
}

async fn list_favorites(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<FavoritesList> {
    let favorites = current_customer(&state, &headers)
        .map(|c| state.favorites(c.id))
        .unwrap_or_default();
    Json(FavoritesList { favorites })
}

// ===== Cart =====

async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(req): Form<AddToCartRequest>,
) -> ApiResult<String> {
    check_csrf(&state, &headers)?;
    if req.quantity < 1 {
        return Err(ApiError::BadRequest("Invalid product or quantity"));
    }
    if state.product(req.product_id).is_none() {
        return Err(ApiError::NotFound("Product not found"));
    }

    let selected_options = serde_json::from_str(&req.selected_options).unwrap_or_else(|e| {
        warn!(error = %e, "Unparseable selected_options, storing empty selection");
        serde_json::json!({})
    });
    let cart_key = current_customer(&state, &headers)
        .map(|c| format!("customer:{}", c.id))
        .unwrap_or_else(|| "guest".to_string());
    let lines = state.add_cart_line(
        &cart_key,
        CartLine {
            product_id: req.product_id,
            quantity: req.quantity,
            selected_options,
            variation_id: req.variation_id,
            price: req.price,
        },
    );
    info!(%cart_key, product_id = req.product_id, lines, "Added to cart");
    Ok("Product added to cart".to_string())
}

// ===== Search =====

async fn search(State(state): State<Arc<AppState>>, Query(q): Query<SearchQuery>) -> Json<Vec<SearchHit>> {
    if q.query.chars().count() <= MIN_QUERY_CHARS {
        return Json(Vec::new());
    }
    let hits = state
        .search(&q.query)
        .into_iter()
        .map(|p| SearchHit {
            slug: p.slug,
            image: p.image,
            name: p.name,
            price: p.price,
        })
        .collect();
    Json(hits)
}

// ===== Reviews =====

async fn vote_review(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(review_id): Path<i64>,
    Json(req): Json<VoteRequest>,
) -> ApiResult<Response> {
    check_csrf(&state, &headers)?;
    let account = current_customer(&state, &headers);
    let voter = voter_key(account.as_ref(), &headers, peer);

    let response = match state.vote(review_id, &voter, req.action == VoteAction::Like) {
        VoteResult::UnknownReview => return Err(ApiError::NotFound("Review not found")),
        VoteResult::Duplicate { likes, dislikes } => (
            StatusCode::CONFLICT,
            Json(VoteResponse {
                ok: false,
                likes: Some(likes),
                dislikes: Some(dislikes),
                message: Some("duplicate".to_string()),
            }),
        )
            .into_response(),
        VoteResult::Counted { likes, dislikes } => Json(VoteResponse {
            ok: true,
            likes: Some(likes),
            dislikes: Some(dislikes),
            message: None,
        })
        .into_response(),
    };
    Ok(response)
}

#[derive(Debug, Deserialize)]
struct ReviewListParams {
    offset: Option<u32>,
    limit: Option<u32>,
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn render_review_card(review: &Review) -> String {
    format!(
        "<div class=\"review-card\" data-review-id=\"{id}\">\
         <div class=\"review-author\">{author}</div>\
         <div class=\"review-rating\" data-rating=\"{rating}\"></div>\
         <p>{comment}</p>\
         <button class=\"like-icon\"></button><span>{likes}</span>\
         <button class=\"dislike-icon\"></button><span>{dislikes}</span>\
         </div>",
        id = review.id,
        author = escape_html(&review.author),
        rating = review.rating,
        comment = escape_html(&review.comment),
        likes = review.likes,
        dislikes = review.dislikes,
    )
}

async fn product_reviews(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
    Query(params): Query<ReviewListParams>,
) -> Json<ReviewPage> {
    let offset = params.offset.unwrap_or(0);
    let limit = params
        .limit
        .filter(|l| *l >= 1)
        .unwrap_or(DEFAULT_REVIEW_LIMIT);

    let (reviews, total) = state.review_page(product_id, offset as usize, limit as usize);
    let next_offset = offset + reviews.len() as u32;
    Json(ReviewPage {
        ok: true,
        html: reviews.iter().map(render_review_card).collect(),
        next_offset,
        has_more: (next_offset as usize) < total,
    })
}

async fn submit_review(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(product): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Response {
    if let Err(e) = check_csrf(&state, &headers) {
        return e.into_response();
    }
    let Some(product) = state.find_product(&product) else {
        return ApiError::NotFound("Product not found").into_response();
    };

    let author = match current_customer(&state, &headers) {
        Some(customer) => customer.username,
        None => {
            let name = form.guest_name.as_deref().map(str::trim).unwrap_or_default();
            let email = form.guest_email.as_deref().map(str::trim).unwrap_or_default();
            if name.is_empty() || email.is_empty() {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ReviewSubmitResponse {
                        ok: false,
                        message: Some("Name and email are required".to_string()),
                    }),
                )
                    .into_response();
            }
            name.to_string()
        }
    };

    let id = state.add_review(
        product.id,
        &author,
        form.rating,
        form.comment.trim(),
        form.recommend.as_deref() == Some("on"),
    );
    info!(review_id = id, product_id = product.id, "Review submitted for moderation");
    Json(ReviewSubmitResponse {
        ok: true,
        message: None,
    })
    .into_response()
}

// ===== Admin =====

async fn admin_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(q): Query<AdminUserQuery>,
) -> ApiResult<Json<AdminUser>> {
    let account = current_account(&state, &headers).ok_or(ApiError::Unauthorized)?;
    if account.role != Role::Admin {
        return Err(ApiError::Forbidden);
    }
    let user = state
        .account(q.user_id)
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(AdminUser {
        username: user.username,
        email: user.email,
        role: user.role.as_str().to_string(),
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/favorites/toggle", post(toggle_favorite))
        .route("/favorites/list", get(list_favorites))
        .route("/cart/add", post(add_to_cart))
        .route("/search", get(search))
        .route("/reviews/{review_id}/vote", post(vote_review))
        .route("/product/{product_id}/reviews", get(product_reviews))
        .route("/product/{product}/review", post(submit_review))
        .route("/admin/users", get(admin_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
