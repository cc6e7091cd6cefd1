//! Search-as-you-type box

use crate::price::format_price;
use shared::client::SearchHit;
use std::time::{Duration, Instant};

/// Minimum spacing between accepted input events
pub const THROTTLE: Duration = Duration::from_millis(500);

/// Queries must be longer than this many characters to be sent
pub const MIN_QUERY_CHARS: usize = 3;

/// What to do with an input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Dropped by the throttle
    Throttled,
    /// Query too short: hide the result dropdown
    Hide,
    /// Send the query
    Query(String),
}

/// Throttle for the search input
///
/// An event is accepted only when more than [`THROTTLE`] has passed since
/// the last accepted one; events in between are dropped, not delayed.
#[derive(Debug, Clone)]
pub struct SearchThrottle {
    delay: Duration,
    last: Option<Instant>,
}

impl Default for SearchThrottle {
    fn default() -> Self {
        Self::new(THROTTLE)
    }
}

impl SearchThrottle {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// Decide what an input event at `now` with the current box text does
    pub fn on_input(&mut self, text: &str, now: Instant) -> SearchAction {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) <= self.delay {
                return SearchAction::Throttled;
            }
        }
        self.last = Some(now);

        if text.chars().count() > MIN_QUERY_CHARS {
            SearchAction::Query(text.to_string())
        } else {
            SearchAction::Hide
        }
    }
}

/// One entry of the result dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub href: String,
    pub image_src: String,
    pub name: String,
    pub price_text: String,
}

impl From<&SearchHit> for ResultCard {
    fn from(hit: &SearchHit) -> Self {
        Self {
            href: hit.product_url(),
            image_src: hit.image_url(),
            name: hit.name.clone(),
            price_text: format_price(hit.price),
        }
    }
}

/// Result dropdown contents, replacing whatever was shown before
pub fn result_cards(hits: &[SearchHit]) -> Vec<ResultCard> {
    hits.iter().map(ResultCard::from).collect()
}
