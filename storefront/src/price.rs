//! Price display helpers

use rust_decimal::Decimal;

/// Currency prefix used on product pages
pub const CURRENCY_SYMBOL: &str = "$";

/// Format a price for the product page
///
/// Trailing zeros are dropped, matching how the page renders numbers:
///
/// ```
/// use rust_decimal::Decimal;
/// use storefront::price::format_price;
///
/// assert_eq!(format_price(Decimal::new(5000, 2)), "$50");
/// assert_eq!(format_price(Decimal::new(4990, 2)), "$49.9");
/// ```
pub fn format_price(price: Decimal) -> String {
    format!("{}{}", CURRENCY_SYMBOL, price.normalize())
}
