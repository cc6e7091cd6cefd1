//! Product Variation Model

use super::RawId;
use crate::error::{DataError, DataResult};
use rust_decimal::Decimal;
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Option/value id pair carried by a variation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboId {
    pub option_id: RawId,
    pub value_id: RawId,
}

/// A priced/stocked SKU for one combination of option values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub id: RawId,
    /// Option value ids this variation satisfies (one per relevant group)
    #[serde(default, deserialize_with = "null_as_default")]
    pub option_value_ids: Vec<RawId>,
    /// Legacy description: `<strong>Name:</strong> Value<br>` fragments
    #[serde(default, deserialize_with = "null_as_default")]
    pub combo_html: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub sku: Option<String>,
    /// Units in stock; `None` when stock is not tracked
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub combo_ids: Vec<ComboId>,
}

impl Variation {
    /// Create a variation with only the fields the resolver needs
    pub fn new(id: impl Into<RawId>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            option_value_ids: vec![],
            combo_html: String::new(),
            price,
            sku: None,
            stock: None,
            slug: None,
            combo_ids: vec![],
        }
    }

    /// Set the structured option value ids
    pub fn with_value_ids<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RawId>,
    {
        self.option_value_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the legacy combination description
    pub fn with_combo_html(mut self, html: impl Into<String>) -> Self {
        self.combo_html = html.into();
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Whether structured ids are available for exact matching
    pub fn has_value_ids(&self) -> bool {
        !self.option_value_ids.is_empty()
    }
}

/// The variations of one product, in catalog order
///
/// Catalog order is the document order of the server data: array order, or
/// key order when the server renders an object keyed by variation id. Every
/// "first match" decision of the resolver is taken in this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VariationCatalog {
    variations: Vec<Variation>,
}

impl VariationCatalog {
    pub fn new(variations: Vec<Variation>) -> Self {
        Self { variations }
    }

    /// Decode a catalog from page JSON
    pub fn parse(json: &str) -> DataResult<Self> {
        serde_json::from_str(json).map_err(DataError::Catalog)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variation> {
        self.variations.iter()
    }

    pub fn first(&self) -> Option<&Variation> {
        self.variations.first()
    }

    /// Find a variation by normalized id
    pub fn get(&self, id: &RawId) -> Option<&Variation> {
        self.variations.iter().find(|v| v.id.same_as(id))
    }

    pub fn len(&self) -> usize {
        self.variations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variations.is_empty()
    }
}

impl From<Vec<Variation>> for VariationCatalog {
    fn from(variations: Vec<Variation>) -> Self {
        Self::new(variations)
    }
}

impl<'a> IntoIterator for &'a VariationCatalog {
    type Item = &'a Variation;
    type IntoIter = std::slice::Iter<'a, Variation>;

    fn into_iter(self) -> Self::IntoIter {
        self.variations.iter()
    }
}

impl<'de> Deserialize<'de> for VariationCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = VariationCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an array of variations or an object keyed by variation id")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(VariationCatalog::default())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(VariationCatalog::default())
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut variations = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(variation) = seq.next_element::<Variation>()? {
                    variations.push(variation);
                }
                Ok(VariationCatalog::new(variations))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut variations = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((_key, variation)) = map.next_entry::<String, Variation>()? {
                    variations.push(variation);
                }
                Ok(VariationCatalog::new(variations))
            }
        }

        deserializer.deserialize_any(CatalogVisitor)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
