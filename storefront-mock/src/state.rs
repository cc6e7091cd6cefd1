//! In-memory storefront backend state

use dashmap::{DashMap, DashSet};
use shared::Decimal;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::info;

pub const DEMO_CSRF_TOKEN: &str = "demo-csrf-token";
pub const DEMO_CUSTOMER_TOKEN: &str = "demo-customer-token";
pub const DEMO_ADMIN_TOKEN: &str = "demo-admin-token";

/// Search results are capped at this many products
pub const SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub image: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    pub product_id: i64,
    pub author: String,
    pub rating: u8,
    pub comment: String,
    pub recommend: bool,
    pub likes: i64,
    pub dislikes: i64,
    /// Only approved reviews are listed
    pub approved: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: u32,
    pub selected_options: serde_json::Value,
    pub variation_id: Option<String>,
    pub price: Option<Decimal>,
}

/// Outcome of a vote on a review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteResult {
    Counted { likes: i64, dislikes: i64 },
    Duplicate { likes: i64, dislikes: i64 },
    UnknownReview,
}

pub struct AppState {
    pub csrf_token: String,
    products: DashMap<i64, Product>,
    accounts: DashMap<i64, Account>,
    /// Bearer token -> account id
    sessions: DashMap<String, i64>,
    /// Customer id -> favorite product ids
    favorites: DashMap<i64, BTreeSet<i64>>,
    reviews: DashMap<i64, Review>,
    /// (review id, voter key) pairs that already voted
    votes: DashSet<(i64, String)>,
    /// Cart key ("customer:{id}" or "guest") -> lines
    carts: DashMap<String, Vec<CartLine>>,
    next_review_id: AtomicI64,
}

impl AppState {
    pub fn new(csrf_token: impl Into<String>) -> Self {
        Self {
            csrf_token: csrf_token.into(),
            products: DashMap::new(),
            accounts: DashMap::new(),
            sessions: DashMap::new(),
            favorites: DashMap::new(),
            reviews: DashMap::new(),
            votes: DashSet::new(),
            carts: DashMap::new(),
            next_review_id: AtomicI64::new(1),
        }
    }

    /// State with a small demo catalog, two accounts and a few reviews
    pub fn with_demo_data() -> Self {
        let state = Self::new(DEMO_CSRF_TOKEN);

        for (id, slug, name, price) in [
            (1, "linen-shirt", "Linen shirt", Decimal::new(4500, 2)),
            (2, "linen-trousers", "Linen trousers", Decimal::new(5990, 2)),
            (3, "wool-sweater", "Wool sweater", Decimal::new(89, 0)),
            (4, "cotton-tee", "Cotton t-shirt", Decimal::new(1950, 2)),
        ] {
            state.add_product(Product {
                id,
                slug: slug.to_string(),
                name: name.to_string(),
                image: format!("{}.jpg", slug),
                price,
            });
        }

        state.add_account(
            Account {
                id: 1,
                username: "anna".to_string(),
                email: "anna@example.com".to_string(),
                role: Role::Customer,
            },
            DEMO_CUSTOMER_TOKEN,
        );
        state.add_account(
            Account {
                id: 2,
                username: "admin".to_string(),
                email: "admin@example.com".to_string(),
                role: Role::Admin,
            },
            DEMO_ADMIN_TOKEN,
        );

        for (author, rating, comment) in [
            ("Maria", 5, "Fits perfectly, lovely fabric."),
            ("Oleg", 4, "Good shirt, runs slightly large."),
            ("Kate", 5, "Bought a second one."),
            ("Ivan", 3, "Creases a lot."),
            ("Lena", 4, "Nice color."),
        ] {
            let id = state.add_review(1, author, rating, comment, true);
            state.approve_review(id);
        }

        info!(
            products = state.products.len(),
            reviews = state.reviews.len(),
            "Seeded demo data"
        );
        state
    }

    // ========== Catalog ==========

    pub fn add_product(&self, product: Product) {
        self.products.insert(product.id, product);
    }

    pub fn product(&self, id: i64) -> Option<Product> {
        self.products.get(&id).map(|p| p.clone())
    }

    /// Look a product up by numeric id or slug
    pub fn find_product(&self, key: &str) -> Option<Product> {
        if let Ok(id) = key.parse::<i64>() {
            return self.product(id);
        }
        self.products
            .iter()
            .find(|p| p.slug == key)
            .map(|p| p.clone())
    }

    /// Products whose name contains `query`, case-insensitively
    pub fn search(&self, query: &str) -> Vec<Product> {
        let needle = query.to_lowercase();
        let mut hits: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .map(|p| p.clone())
            .collect();
        hits.sort_by_key(|p| p.id);
        hits.truncate(SEARCH_LIMIT);
        hits
    }

    // ========== Accounts ==========

    pub fn add_account(&self, account: Account, token: impl Into<String>) {
        self.sessions.insert(token.into(), account.id);
        self.accounts.insert(account.id, account);
    }

    pub fn account(&self, id: i64) -> Option<Account> {
        self.accounts.get(&id).map(|a| a.clone())
    }

    pub fn account_for_token(&self, token: &str) -> Option<Account> {
        let id = *self.sessions.get(token)?;
        self.account(id)
    }

    // ========== Favorites ==========

    /// Flip a product in the customer's favorites; returns the new state
    pub fn toggle_favorite(&self, customer_id: i64, product_id: i64) -> bool {
        let mut favorites = self.favorites.entry(customer_id).or_default();
        if favorites.remove(&product_id) {
            false
        } else {
            favorites.insert(product_id);
            true
        }
    }

    pub fn favorites(&self, customer_id: i64) -> Vec<i64> {
        self.favorites
            .get(&customer_id)
            .map(|f| f.iter().copied().collect())
            .unwrap_or_default()
    }

    // ========== Cart ==========

    /// Append a cart line; returns the number of lines in the cart
    pub fn add_cart_line(&self, cart_key: &str, line: CartLine) -> usize {
        let mut cart = self.carts.entry(cart_key.to_string()).or_default();
        cart.push(line);
        cart.len()
    }

    pub fn cart(&self, cart_key: &str) -> Vec<CartLine> {
        self.carts
            .get(cart_key)
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    // ========== Reviews ==========

    /// Store a review awaiting moderation; returns its id
    pub fn add_review(
        &self,
        product_id: i64,
        author: &str,
        rating: u8,
        comment: &str,
        recommend: bool,
    ) -> i64 {
        let id = self.next_review_id.fetch_add(1, Ordering::Relaxed);
        self.reviews.insert(
            id,
            Review {
                id,
                product_id,
                author: author.to_string(),
                rating,
                comment: comment.to_string(),
                recommend,
                likes: 0,
                dislikes: 0,
                approved: false,
            },
        );
        id
    }

    pub fn approve_review(&self, id: i64) -> bool {
        match self.reviews.get_mut(&id) {
            Some(mut review) => {
                review.approved = true;
                true
            }
            None => false,
        }
    }

    pub fn review(&self, id: i64) -> Option<Review> {
        self.reviews.get(&id).map(|r| r.clone())
    }

    /// Approved reviews of a product, newest first, plus the total count
    pub fn review_page(&self, product_id: i64, offset: usize, limit: usize) -> (Vec<Review>, usize) {
        let mut approved: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id && r.approved)
            .map(|r| r.clone())
            .collect();
        approved.sort_by(|a, b| b.id.cmp(&a.id));
        let total = approved.len();
        let page = approved.into_iter().skip(offset).take(limit).collect();
        (page, total)
    }

    /// Count a vote unless this voter already voted on the review
    pub fn vote(&self, review_id: i64, voter_key: &str, like: bool) -> VoteResult {
        let Some(mut review) = self.reviews.get_mut(&review_id) else {
            return VoteResult::UnknownReview;
        };
        if !self.votes.insert((review_id, voter_key.to_string())) {
            return VoteResult::Duplicate {
                likes: review.likes,
                dislikes: review.dislikes,
            };
        }
        if like {
            review.likes += 1;
        } else {
            review.dislikes += 1;
        }
        VoteResult::Counted {
            likes: review.likes,
            dislikes: review.dislikes,
        }
    }
}
