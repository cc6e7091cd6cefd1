//! Product Page State
//!
//! Owns the option groups, the variation catalog and the shopper's current
//! selection for one product page view. Handlers receive the page by
//! reference; the catalog never changes after construction, only the
//! selection does.

use crate::gallery::GalleryPlan;
use crate::price::format_price;
use crate::variation::{MatchTier, Resolution, resolve_with_tier};
use rust_decimal::Decimal;
use shared::client::AddToCartRequest;
use shared::models::{
    DisplayType, OptionGroup, RawId, SelectedOptions, VariationCatalog, find_group,
};
use thiserror::Error;
use tracing::{debug, error};

/// Product page errors (malformed page data)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Product ID not found")]
    MissingProductId,

    #[error("Unknown option group: {0}")]
    UnknownGroup(RawId),

    #[error("Unknown value {value} for option group {group}")]
    UnknownValue { group: RawId, value: RawId },
}

/// Stock indicator shown next to the price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    OutOfStock,
    /// Stock is not tracked; the indicator is left untouched
    Untracked,
}

impl StockStatus {
    pub fn from_stock(stock: Option<i64>) -> Self {
        match stock {
            Some(n) if n > 0 => StockStatus::InStock,
            Some(_) => StockStatus::OutOfStock,
            None => StockStatus::Untracked,
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            StockStatus::InStock => Some("In stock"),
            StockStatus::OutOfStock => Some("Out of stock"),
            StockStatus::Untracked => None,
        }
    }

    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            StockStatus::InStock => Some("in-stock"),
            StockStatus::OutOfStock => Some("out-of-stock"),
            StockStatus::Untracked => None,
        }
    }
}

/// Price block contents for the resolved variation
#[derive(Debug, Clone, PartialEq)]
pub struct VariationDisplay {
    pub variation_id: RawId,
    pub price: Decimal,
    pub price_text: String,
    /// `None` leaves the SKU text as rendered
    pub sku: Option<String>,
    pub stock: StockStatus,
    pub tier: MatchTier,
}

impl From<Resolution<'_>> for VariationDisplay {
    fn from(resolution: Resolution<'_>) -> Self {
        let variation = resolution.variation;
        Self {
            variation_id: variation.id.clone(),
            price: variation.price,
            price_text: format_price(variation.price),
            sku: variation.sku.clone(),
            stock: StockStatus::from_stock(variation.stock),
            tier: resolution.tier,
        }
    }
}

/// Everything a selection event changes on the page
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionUpdate {
    /// Text next to the group title, e.g. `"- Red"`
    pub label: String,
    /// `None` when the product has no variations
    pub display: Option<VariationDisplay>,
    /// Set when the group swaps the gallery and the value has photos
    pub gallery: Option<GalleryPlan>,
}

/// State of one product page view
#[derive(Debug, Clone)]
pub struct ProductPage {
    options: Vec<OptionGroup>,
    catalog: VariationCatalog,
    selected: SelectedOptions,
}

impl ProductPage {
    /// Create the page state with the default selection
    ///
    /// Each group starts at its value flagged `is_default`; a select box
    /// without a flagged value starts at its first value.
    pub fn new(options: Vec<OptionGroup>, catalog: VariationCatalog) -> Self {
        let mut selected = SelectedOptions::new();
        for group in &options {
            let default = group
                .values
                .iter()
                .find(|v| v.is_default)
                .or_else(|| match group.display_type {
                    DisplayType::Select => group.values.first(),
                    _ => None,
                });
            if let Some(value) = default {
                selected.select(group.id.clone(), value.id.clone());
            }
        }
        debug!(
            groups = options.len(),
            variations = catalog.len(),
            selected = selected.len(),
            "Product page initialized"
        );
        Self {
            options,
            catalog,
            selected,
        }
    }

    pub fn options(&self) -> &[OptionGroup] {
        &self.options
    }

    pub fn catalog(&self) -> &VariationCatalog {
        &self.catalog
    }

    pub fn selected(&self) -> &SelectedOptions {
        &self.selected
    }

    /// Direct access to the selection, for handlers that manage it themselves
    pub fn selected_mut(&mut self) -> &mut SelectedOptions {
        &mut self.selected
    }

    /// Resolve the variation for the current selection
    pub fn resolve(&self) -> Option<Resolution<'_>> {
        resolve_with_tier(&self.selected, &self.catalog, Some(&self.options))
    }

    /// Price block contents for the current selection
    pub fn display(&self) -> Option<VariationDisplay> {
        self.resolve().map(VariationDisplay::from)
    }

    /// Handle a click/change on an option value
    pub fn select(
        &mut self,
        group: impl Into<RawId>,
        value: impl Into<RawId>,
    ) -> Result<SelectionUpdate, PageError> {
        let group = group.into();
        let value = value.into();

        let option = find_group(&self.options, &group)
            .ok_or_else(|| PageError::UnknownGroup(group.clone()))?;
        let chosen = option.value(&value).ok_or_else(|| PageError::UnknownValue {
            group: group.clone(),
            value: value.clone(),
        })?;

        let label = format!("- {}", chosen.value);
        let gallery = if option.has_individual_photos {
            GalleryPlan::from_photos(&chosen.photos)
        } else {
            None
        };

        self.selected.select(group, value);
        let display = self.display();
        if display.is_none() {
            debug!("No matching variation found");
        }

        Ok(SelectionUpdate {
            label,
            display,
            gallery,
        })
    }

    /// Build the add-to-cart request for the current selection
    ///
    /// The resolved variation's id and price ride along so the cart line is
    /// priced exactly as displayed.
    pub fn cart_request(
        &self,
        product_id: Option<i64>,
        quantity: u32,
    ) -> Result<AddToCartRequest, PageError> {
        let Some(product_id) = product_id else {
            error!("Product ID not found");
            return Err(PageError::MissingProductId);
        };
        let resolved = self.resolve();
        Ok(AddToCartRequest {
            product_id,
            selected_options: self.selected.to_json(),
            variation_id: resolved.map(|r| r.variation.id.to_string()),
            price: resolved.map(|r| r.variation.price),
            quantity: quantity.max(1),
        })
    }
}
