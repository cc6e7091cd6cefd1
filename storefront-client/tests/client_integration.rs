// storefront-client/tests/client_integration.rs
// Client and page handlers against the in-memory mock backend

use shared::models::{OptionGroup, OptionValue, RawId, Variation, VariationCatalog};
use shared::Decimal;
use std::sync::Arc;
use std::time::Instant;
use storefront::{
    AdminUserForm, FavoriteSet, FavoritesView, NotificationLevel, ProductPage, ReviewsCursor,
    SearchThrottle, VoteCounters,
};
use storefront_client::handlers::{ALREADY_VOTED, AUTH_REQUIRED_FAVORITES};
use storefront_client::{
    ClientConfig, ClientError, CsrfToken, Handled, HttpClient, ReviewForm, SearchResults,
    Storefront, VoteAction, VoteReply,
};
use storefront_mock::state::{DEMO_ADMIN_TOKEN, DEMO_CSRF_TOKEN, DEMO_CUSTOMER_TOKEN};
use storefront_mock::AppState;

/// Start a seeded mock on an ephemeral port
async fn spawn_mock() -> (String, Arc<AppState>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::with_demo_data());
    tokio::spawn(storefront_mock::serve(listener, state.clone()));
    (format!("http://{}", addr), state)
}

fn client(base_url: &str) -> HttpClient {
    ClientConfig::new(base_url).build_http_client().unwrap()
}

const LISTING: FavoritesView = FavoritesView {
    on_favorites_page: false,
    visible_cards: 4,
};

#[tokio::test]
async fn test_refresh_csrf_from_page() {
    let (url, _state) = spawn_mock().await;
    let mut client = client(&url);
    assert!(client.csrf_token().is_none());
    assert!(client.refresh_csrf("/").await.unwrap());
    assert_eq!(client.csrf_token().unwrap().as_str(), DEMO_CSRF_TOKEN);
}

#[tokio::test]
async fn test_wrong_csrf_is_rejected() {
    let (url, _state) = spawn_mock().await;
    let client = client(&url)
        .with_token(DEMO_CUSTOMER_TOKEN)
        .with_csrf_token(CsrfToken::new("forged"));
    let err = client.toggle_favorite(1).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_guest_favorite_requires_login() {
    let (url, _state) = spawn_mock().await;
    let err = client(&url).toggle_favorite(1).await.unwrap_err();
    assert!(err.is_unauthorized());

    let storefront = Storefront::new(client(&url));
    let mut favorites = FavoriteSet::default();
    let handled = storefront.toggle_favorite(&mut favorites, Some(1), LISTING).await;
    let notification = handled.notification().unwrap();
    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(notification.message, AUTH_REQUIRED_FAVORITES);

    // guests see an empty list rather than an error
    let list = client(&url).list_favorites().await.unwrap();
    assert!(list.favorites.is_empty());
}

#[tokio::test]
async fn test_favorite_round_trip() {
    let (url, state) = spawn_mock().await;
    let storefront = Storefront::new(client(&url).with_token(DEMO_CUSTOMER_TOKEN));

    let mut favorites = storefront.load_favorites().await.applied().unwrap();
    assert!(favorites.is_empty());

    let effect = storefront
        .toggle_favorite(&mut favorites, Some(2), LISTING)
        .await
        .applied()
        .unwrap();
    assert!(effect.is_favorite);
    assert_eq!(effect.notification.level, NotificationLevel::Success);
    assert_eq!(state.favorites(1), vec![2]);

    let page = FavoritesView {
        on_favorites_page: true,
        visible_cards: 1,
    };
    let effect = storefront
        .toggle_favorite(&mut favorites, Some(2), page)
        .await
        .applied()
        .unwrap();
    assert!(!effect.is_favorite);
    assert!(effect.redirect_home);
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_unknown_product_favorite() {
    let (url, _state) = spawn_mock().await;
    let client = client(&url).with_token(DEMO_CUSTOMER_TOKEN);
    let err = client.toggle_favorite(404).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_add_to_cart_sends_resolved_variation() {
    let (url, state) = spawn_mock().await;
    let options = vec![OptionGroup {
        id: RawId::Int(1),
        name: "Size".to_string(),
        display_type: Default::default(),
        has_individual_photos: false,
        values: vec![
            OptionValue {
                id: RawId::Int(10),
                value: "S".to_string(),
                photos: vec![],
                is_default: false,
            },
            OptionValue {
                id: RawId::Int(11),
                value: "M".to_string(),
                photos: vec![],
                is_default: false,
            },
        ],
    }];
    let catalog = VariationCatalog::from(vec![
        Variation::new(100, Decimal::new(4500, 2)).with_value_ids([10]),
        Variation::new(101, Decimal::new(4750, 2)).with_value_ids([11]),
    ]);
    let mut page = ProductPage::new(options, catalog);
    page.select(RawId::Int(1), RawId::Int(11)).unwrap();

    let storefront = Storefront::new(client(&url).with_csrf_token(CsrfToken::new(DEMO_CSRF_TOKEN)));
    let message = storefront.add_to_cart(&page, Some(1), 2).await.applied().unwrap();
    assert_eq!(message, "Product added to cart");

    let cart = state.cart("guest");
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].product_id, 1);
    assert_eq!(cart[0].quantity, 2);
    assert_eq!(cart[0].variation_id.as_deref(), Some("101"));
    assert_eq!(cart[0].price, Some(Decimal::new(4750, 2)));
    assert_eq!(cart[0].selected_options, serde_json::json!({ "1": 11 }));
}

#[tokio::test]
async fn test_search_results() {
    let (url, _state) = spawn_mock().await;
    let hits = client(&url).search("linen").await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].slug, "linen-shirt");
    assert_eq!(hits[0].price, Decimal::new(45, 0));

    // the backend ignores short queries too
    assert!(client(&url).search("lin").await.unwrap().is_empty());

    let storefront = Storefront::new(client(&url));
    let mut throttle = SearchThrottle::default();
    let handled = storefront.search(&mut throttle, "sweater", Instant::now()).await;
    let Handled::Applied(SearchResults::Cards(cards)) = handled else {
        panic!("expected result cards, got {:?}", handled);
    };
    assert_eq!(cards[0].href, "/product/wool-sweater");
    assert_eq!(cards[0].image_src, "/static/uploads/wool-sweater.jpg");
    assert_eq!(cards[0].price_text, "$89");
}

#[tokio::test]
async fn test_duplicate_vote_returns_counts() {
    let (url, state) = spawn_mock().await;
    let client = client(&url);

    let first = client.vote_review(3, VoteAction::Like).await.unwrap();
    assert!(matches!(first, VoteReply::Counted(_)));
    assert_eq!(first.counts().likes, Some(1));

    let second = client.vote_review(3, VoteAction::Dislike).await.unwrap();
    let VoteReply::Duplicate(counts) = second else {
        panic!("expected a duplicate vote");
    };
    assert!(!counts.ok);
    assert_eq!((counts.likes, counts.dislikes), (Some(1), Some(0)));
    assert_eq!(state.review(3).unwrap().dislikes, 0);
}

#[tokio::test]
async fn test_vote_handler_syncs_counters_from_server() {
    let (url, _state) = spawn_mock().await;
    let storefront = Storefront::new(client(&url));
    // stale counters on the page
    let mut counters = VoteCounters::new(10, 10);

    let outcome = storefront
        .vote(Some(2), VoteAction::Like, &mut counters)
        .await
        .applied()
        .unwrap();
    assert!(outcome.counted);
    assert_eq!(counters, VoteCounters::new(1, 0));

    let outcome = storefront
        .vote(Some(2), VoteAction::Like, &mut counters)
        .await
        .applied()
        .unwrap();
    assert!(!outcome.counted);
    assert_eq!(counters, VoteCounters::new(1, 0));
    assert_eq!(outcome.notification.unwrap().message, ALREADY_VOTED);
}

#[tokio::test]
async fn test_load_more_reviews_until_exhausted() {
    let (url, _state) = spawn_mock().await;
    let storefront = Storefront::new(client(&url));
    let mut cursor = ReviewsCursor::new(0, None);

    let mut seen = Vec::new();
    while !cursor.is_exhausted() {
        let html = storefront
            .load_more_reviews(Some(1), &mut cursor)
            .await
            .applied()
            .unwrap();
        seen.push(storefront::count_cards(&html));
    }
    assert_eq!(seen, vec![2, 2, 1]);
    assert_eq!(cursor.offset(), 5);
}

#[tokio::test]
async fn test_guest_review_needs_contact() {
    let (url, state) = spawn_mock().await;
    let storefront = Storefront::new(client(&url));

    let mut form = ReviewForm {
        rating: 5,
        comment: "Great".to_string(),
        recommend: Some("on".to_string()),
        ..Default::default()
    };
    let handled = storefront.submit_review("linen-shirt", &form).await;
    assert_eq!(handled.notification().unwrap().message, "Name and email are required");

    form.guest_name = Some("Guest".to_string());
    form.guest_email = Some("guest@example.com".to_string());
    let handled = storefront.submit_review("linen-shirt", &form).await;
    assert_eq!(handled.applied().unwrap().level, NotificationLevel::Success);

    // pending moderation: not listed yet
    assert_eq!(state.review_page(1, 0, 100).1, 5);
    let pending = state.review(6).unwrap();
    assert!(pending.recommend);
    assert!(!pending.approved);
}

#[tokio::test]
async fn test_admin_user_lookup() {
    let (url, _state) = spawn_mock().await;

    let err = client(&url).admin_user(1).await.unwrap_err();
    assert!(err.is_unauthorized());
    let err = client(&url)
        .with_token(DEMO_CUSTOMER_TOKEN)
        .admin_user(1)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));

    let storefront = Storefront::new(client(&url).with_token(DEMO_ADMIN_TOKEN));
    let mut form = AdminUserForm::default();
    assert_eq!(storefront.open_admin_user(&mut form, Some(1)).await, Handled::Applied(()));
    assert_eq!(form.username(), "anna");
    assert_eq!(form.role(), "customer");

    let handled = storefront.open_admin_user(&mut form, Some(77)).await;
    assert!(handled.notification().is_some());
}
