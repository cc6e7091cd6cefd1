//! Review widgets
//!
//! Star ratings, the fit scale of the review form, like/dislike counters and
//! the "load more" cursor of the review list.

use shared::client::{ReviewPage, VoteResponse};

/// Reviews fetched per "load more" click unless the page says otherwise
pub const DEFAULT_PAGE_LIMIT: u32 = 2;

/// Fill percentage (0..=100) of each star for a static rating
///
/// Star `i` is filled by `clamp(rating - i, 0, 1)`, so 3.5 over five stars
/// gives `[100, 100, 100, 50, 0]`.
pub fn star_fills(rating: f64, stars: usize) -> Vec<u8> {
    let rating = if rating.is_finite() { rating } else { 0.0 };
    (0..stars)
        .map(|i| {
            let portion = (rating - i as f64).clamp(0.0, 1.0);
            (portion * 100.0).round() as u8
        })
        .collect()
}

/// Interactive star picker of the review form
///
/// Hovering previews a rating, leaving restores the committed one, clicking
/// commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarInput {
    committed: u8,
    painted: u8,
}

impl StarInput {
    pub fn new(initial: u8) -> Self {
        Self {
            committed: initial,
            painted: initial,
        }
    }

    pub fn hover(&mut self, star: u8) {
        self.painted = star;
    }

    pub fn leave(&mut self) {
        self.painted = self.committed;
    }

    pub fn click(&mut self, star: u8) {
        self.committed = star;
        self.painted = star;
    }

    /// Rating stored in the hidden form input
    pub fn value(&self) -> u8 {
        self.committed
    }

    /// Whether star `star` (1-based) is drawn active
    pub fn is_lit(&self, star: u8) -> bool {
        star <= self.painted
    }
}

/// Five-step fit scale (1 = runs small, 3 = true to size, 5 = runs large)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitScale {
    value: u8,
}

/// Widths/positions of the fit scale parts, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitScaleLayout {
    pub left_width: f64,
    pub right_width: f64,
    pub handle_left: f64,
}

impl Default for FitScale {
    fn default() -> Self {
        Self { value: 3 }
    }
}

impl FitScale {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Self {
        Self {
            value: value.clamp(Self::MIN, Self::MAX),
        }
    }

    pub fn set(&mut self, value: u8) {
        self.value = value.clamp(Self::MIN, Self::MAX);
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// The bar grows from the center toward the handle
    pub fn layout(&self) -> FitScaleLayout {
        let position = f64::from(self.value - 1) / 4.0 * 100.0;
        FitScaleLayout {
            left_width: (50.0 - position).max(0.0),
            right_width: (position - 50.0).max(0.0),
            handle_left: position,
        }
    }
}

/// Like/dislike counters of one review card
///
/// Counters only ever take values reported by the server, including on a
/// duplicate vote; they are never bumped locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteCounters {
    pub likes: i64,
    pub dislikes: i64,
}

impl VoteCounters {
    pub fn new(likes: i64, dislikes: i64) -> Self {
        Self { likes, dislikes }
    }

    /// Overwrite the counters present in a vote response
    ///
    /// Returns whether anything changed.
    pub fn sync(&mut self, response: &VoteResponse) -> bool {
        let before = *self;
        if let Some(likes) = response.likes {
            self.likes = likes;
        }
        if let Some(dislikes) = response.dislikes {
            self.dislikes = dislikes;
        }
        before != *self
    }
}

/// Paging state of the "load more reviews" button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewsCursor {
    offset: u32,
    limit: u32,
    exhausted: bool,
}

impl ReviewsCursor {
    /// Cursor starting after the reviews rendered with the page
    pub fn new(offset: u32, limit: Option<u32>) -> Self {
        Self {
            offset,
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_LIMIT),
            exhausted: false,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// The button is removed once the server reports no more reviews
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Advance past a fetched page
    ///
    /// `inserted` is the number of review cards added to the list; it is
    /// used when the response carries no usable `next_offset`. Pages with
    /// `ok: false` are ignored.
    pub fn advance(&mut self, page: &ReviewPage, inserted: u32) {
        if !page.ok {
            return;
        }
        self.offset = if page.next_offset > 0 {
            page.next_offset
        } else {
            self.offset + inserted
        };
        if !page.has_more {
            self.exhausted = true;
        }
    }
}

/// Count the top-level review cards in a rendered fragment
///
/// Each card is rendered with a `data-review-id` attribute.
pub fn count_cards(html: &str) -> u32 {
    html.matches("data-review-id=").count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_fills() {
        assert_eq!(star_fills(3.5, 5), vec![100, 100, 100, 50, 0]);
        assert_eq!(star_fills(0.0, 3), vec![0, 0, 0]);
        assert_eq!(star_fills(7.0, 2), vec![100, 100]);
        assert_eq!(star_fills(4.26, 5)[4], 26);
        assert_eq!(star_fills(f64::NAN, 2), vec![0, 0]);
    }

    #[test]
    fn test_star_input_hover_and_commit() {
        let mut stars = StarInput::default();
        stars.hover(4);
        assert!(stars.is_lit(4));
        stars.leave();
        assert!(!stars.is_lit(1));
        stars.click(3);
        stars.hover(5);
        stars.leave();
        assert_eq!(stars.value(), 3);
        assert!(stars.is_lit(3));
        assert!(!stars.is_lit(4));
    }

    #[test]
    fn test_fit_scale_layout() {
        let scale = FitScale::default();
        assert_eq!(
            scale.layout(),
            FitScaleLayout { left_width: 0.0, right_width: 0.0, handle_left: 50.0 }
        );
        assert_eq!(FitScale::new(1).layout().left_width, 50.0);
        assert_eq!(FitScale::new(5).layout().right_width, 50.0);
        assert_eq!(FitScale::new(4).layout().handle_left, 75.0);
        assert_eq!(FitScale::new(9).value(), 5);
        assert_eq!(FitScale::new(0).value(), 1);
    }

    #[test]
    fn test_vote_counters_follow_server() {
        let mut counters = VoteCounters::new(3, 1);
        let duplicate = VoteResponse {
            ok: false,
            likes: Some(5),
            dislikes: Some(1),
            message: Some("duplicate".to_string()),
        };
        assert!(counters.sync(&duplicate));
        assert_eq!(counters, VoteCounters::new(5, 1));
        assert!(!counters.sync(&duplicate));

        let partial = VoteResponse { ok: true, likes: None, dislikes: Some(2), message: None };
        counters.sync(&partial);
        assert_eq!(counters, VoteCounters::new(5, 2));
    }

    #[test]
    fn test_reviews_cursor() {
        let mut cursor = ReviewsCursor::new(2, None);
        assert_eq!(cursor.limit(), DEFAULT_PAGE_LIMIT);

        cursor.advance(&ReviewPage { ok: true, html: String::new(), next_offset: 4, has_more: true }, 2);
        assert_eq!(cursor.offset(), 4);
        assert!(!cursor.is_exhausted());

        // missing next_offset falls back to the inserted cards
        cursor.advance(&ReviewPage { ok: true, html: String::new(), next_offset: 0, has_more: false }, 1);
        assert_eq!(cursor.offset(), 5);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_reviews_cursor_ignores_failed_page() {
        let mut cursor = ReviewsCursor::new(0, Some(0));
        assert_eq!(cursor.limit(), DEFAULT_PAGE_LIMIT);
        cursor.advance(&ReviewPage::default(), 3);
        assert_eq!(cursor.offset(), 0);
        assert!(!cursor.is_exhausted());
    }

    #[test]
    fn test_count_cards() {
        let html = r#"<div class="review" data-review-id="1"></div><div data-review-id="2"></div>"#;
        assert_eq!(count_cards(html), 2);
        assert_eq!(count_cards(""), 0);
    }
}
