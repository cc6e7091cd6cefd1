//! Variation Resolver
//!
//! Tiers, tried in order, first success wins:
//! 1. exact: the selected value ids equal the variation's value ids as sets
//! 2. combo text: the selection's `(name, value)` pairs all appear in the
//!    variation's legacy `combo_html`
//! 3. partial: the variation shares at least one value id with the selection
//! 4. first available: the first variation of the catalog
//!
//! "First" always means catalog order (see [`VariationCatalog`]).

use super::combo::{self, ComboPair};
use shared::models::{OptionGroup, RawId, SelectedOptions, Variation, VariationCatalog};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Which tier produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    ComboText,
    Partial,
    FirstAvailable,
}

impl MatchTier {
    /// Whether the variation is known to correspond to the selection
    pub fn is_confident(&self) -> bool {
        matches!(self, MatchTier::Exact | MatchTier::ComboText)
    }
}

/// Resolved variation together with the tier that found it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    pub variation: &'a Variation,
    pub tier: MatchTier,
}

/// Resolve the variation for a selection
///
/// `options` is only consulted by the combo text tier and may be `None`.
/// Returns `None` only when the catalog is empty.
pub fn resolve<'a>(
    selected: &SelectedOptions,
    variations: &'a VariationCatalog,
    options: Option<&[OptionGroup]>,
) -> Option<&'a Variation> {
    resolve_with_tier(selected, variations, options).map(|r| r.variation)
}

/// Resolve the variation for a selection, reporting the matching tier
pub fn resolve_with_tier<'a>(
    selected: &SelectedOptions,
    variations: &'a VariationCatalog,
    options: Option<&[OptionGroup]>,
) -> Option<Resolution<'a>> {
    if variations.is_empty() {
        debug!("No variations available");
        return None;
    }

    let wanted = IdSet::collect(selected.value_ids());

    if let Some(variation) = exact_match(&wanted, variations) {
        return Some(found(variation, MatchTier::Exact));
    }

    if let Some(variation) = options.and_then(|opts| combo_match(selected, variations, opts)) {
        return Some(found(variation, MatchTier::ComboText));
    }

    if let Some(variation) = partial_match(&wanted, variations) {
        return Some(found(variation, MatchTier::Partial));
    }

    variations
        .first()
        .map(|variation| found(variation, MatchTier::FirstAvailable))
}

fn found(variation: &Variation, tier: MatchTier) -> Resolution<'_> {
    if tier.is_confident() {
        debug!(variation_id = %variation.id, ?tier, "Resolved variation");
    } else {
        debug!(variation_id = %variation.id, ?tier, "No variation matches the selection, using fallback");
    }
    Resolution { variation, tier }
}

/// Normalized id set
///
/// Ids that do not normalize to an integer are counted but never match, so a
/// set holding one can never be equal to another set.
#[derive(Debug, Default)]
struct IdSet {
    ids: BTreeSet<i64>,
    unparsed: usize,
}

impl IdSet {
    fn collect<'a>(raw: impl IntoIterator<Item = &'a RawId>) -> Self {
        let mut set = IdSet::default();
        for id in raw {
            match id.as_int() {
                Some(v) => {
                    set.ids.insert(v);
                }
                None => set.unparsed += 1,
            }
        }
        set
    }

    fn equals(&self, other: &IdSet) -> bool {
        self.unparsed == 0 && other.unparsed == 0 && self.ids == other.ids
    }

    fn intersects(&self, other: &IdSet) -> bool {
        self.ids.intersection(&other.ids).next().is_some()
    }
}

fn exact_match<'a>(wanted: &IdSet, variations: &'a VariationCatalog) -> Option<&'a Variation> {
    variations
        .iter()
        .filter(|v| v.has_value_ids())
        .find(|v| IdSet::collect(&v.option_value_ids).equals(wanted))
}

fn combo_match<'a>(
    selected: &SelectedOptions,
    variations: &'a VariationCatalog,
    options: &[OptionGroup],
) -> Option<&'a Variation> {
    let wanted: Vec<ComboPair<'_>> = combo::selected_pairs(selected, options);
    if wanted.is_empty() {
        return None;
    }

    let legacy = variations.iter().filter(|v| !v.has_value_ids()).count();
    if legacy > 0 {
        warn!(
            legacy,
            total = variations.len(),
            "Variations without option_value_ids, falling back to combo_html matching"
        );
    }

    variations
        .iter()
        .filter(|v| !v.combo_html.is_empty())
        .find(|v| combo::describes(&v.combo_html, &wanted))
}

fn partial_match<'a>(wanted: &IdSet, variations: &'a VariationCatalog) -> Option<&'a Variation> {
    variations
        .iter()
        .filter(|v| v.has_value_ids())
        .find(|v| IdSet::collect(&v.option_value_ids).intersects(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::OptionValue;

    fn price(v: i64) -> Decimal {
        Decimal::new(v, 0)
    }

    fn catalog(variations: Vec<Variation>) -> VariationCatalog {
        VariationCatalog::new(variations)
    }

    fn selection(pairs: &[(i64, i64)]) -> SelectedOptions {
        pairs.iter().copied().collect()
    }

    fn shirt_options() -> Vec<OptionGroup> {
        let value = |id: i64, label: &str| OptionValue {
            id: RawId::Int(id),
            value: label.to_string(),
            photos: vec![],
            is_default: false,
        };
        vec![
            OptionGroup {
                id: RawId::Int(1),
                name: "Color".to_string(),
                display_type: Default::default(),
                has_individual_photos: false,
                values: vec![value(10, "Red"), value(11, "Blue")],
            },
            OptionGroup {
                id: RawId::Int(2),
                name: "Size".to_string(),
                display_type: Default::default(),
                has_individual_photos: false,
                values: vec![value(20, "M"), value(21, "L")],
            },
        ]
    }

    fn id_of(v: Option<&Variation>) -> Option<String> {
        v.map(|v| v.id.to_string())
    }

    #[test]
    fn test_exact_match_wins() {
        let variations = catalog(vec![
            Variation::new("b", price(40)).with_value_ids([10]),
            Variation::new("a", price(50)).with_value_ids([10, 20]),
        ]);
        let resolution =
            resolve_with_tier(&selection(&[(1, 10), (2, 20)]), &variations, None).unwrap();
        assert_eq!(resolution.variation.id, RawId::from("a"));
        assert_eq!(resolution.tier, MatchTier::Exact);
    }

    #[test]
    fn test_exact_match_is_order_independent_and_normalized() {
        let variations = catalog(vec![
            Variation::new("a", price(50)).with_value_ids([RawId::from("20"), RawId::Int(10)]),
        ]);
        let mut selected = SelectedOptions::new();
        selected.select("1", "10");
        selected.select(2, 20);
        let resolution = resolve_with_tier(&selected, &variations, None).unwrap();
        assert_eq!(resolution.tier, MatchTier::Exact);
    }

    #[test]
    fn test_subset_is_not_exact() {
        let variations = catalog(vec![Variation::new("a", price(50)).with_value_ids([10, 20])]);
        let resolution = resolve_with_tier(&selection(&[(1, 10)]), &variations, None).unwrap();
        assert_eq!(resolution.variation.id, RawId::from("a"));
        assert_eq!(resolution.tier, MatchTier::Partial);
    }

    #[test]
    fn test_superset_selection_is_not_exact() {
        let variations = catalog(vec![
            Variation::new("a", price(50)).with_value_ids([10]),
            Variation::new("b", price(60)).with_value_ids([11, 21]),
        ]);
        let resolution =
            resolve_with_tier(&selection(&[(1, 10), (2, 20)]), &variations, None).unwrap();
        assert_eq!(resolution.variation.id, RawId::from("a"));
        assert_eq!(resolution.tier, MatchTier::Partial);
    }

    #[test]
    fn test_empty_selection_takes_first() {
        let variations = catalog(vec![
            Variation::new("a", price(10)),
            Variation::new("b", price(20)),
        ]);
        let resolution = resolve_with_tier(&SelectedOptions::new(), &variations, None).unwrap();
        assert_eq!(resolution.variation.id, RawId::from("a"));
        assert_eq!(resolution.tier, MatchTier::FirstAvailable);
        assert!(!resolution.tier.is_confident());
    }

    #[test]
    fn test_empty_catalog_resolves_nothing() {
        let variations = VariationCatalog::default();
        assert!(resolve(&selection(&[(1, 10)]), &variations, None).is_none());
        assert!(resolve(&SelectedOptions::new(), &variations, Some(&shirt_options())).is_none());
    }

    #[test]
    fn test_combo_text_fallback() {
        let options = shirt_options();
        let variations = catalog(vec![
            Variation::new(1, price(30))
                .with_combo_html("<strong>Color:</strong> Blue<br><strong>Size:</strong> M<br>"),
            Variation::new(2, price(35))
                .with_combo_html("<strong>Color:</strong> Red<br><strong>Size:</strong> L<br>"),
        ]);
        let selected = selection(&[(1, 10), (2, 21)]);
        let resolution = resolve_with_tier(&selected, &variations, Some(&options)).unwrap();
        assert_eq!(resolution.variation.id, RawId::Int(2));
        assert_eq!(resolution.tier, MatchTier::ComboText);

        // without options the text tier is skipped entirely
        let resolution = resolve_with_tier(&selected, &variations, None).unwrap();
        assert_eq!(resolution.tier, MatchTier::FirstAvailable);
    }

    #[test]
    fn test_combo_text_tolerates_extra_pairs() {
        let options = shirt_options();
        let variations = catalog(vec![
            Variation::new(1, price(30))
                .with_combo_html("<strong>Color:</strong> Blue<br><strong>Size:</strong> M<br>"),
        ]);
        let resolution =
            resolve_with_tier(&selection(&[(1, 11)]), &variations, Some(&options)).unwrap();
        assert_eq!(resolution.tier, MatchTier::ComboText);
    }

    #[test]
    fn test_combo_text_skips_unresolvable_selection() {
        let options = shirt_options();
        let variations = catalog(vec![
            Variation::new(1, price(30)).with_combo_html("<strong>Color:</strong> Blue<br>"),
            Variation::new(2, price(35)).with_combo_html("<strong>Color:</strong> Red<br>"),
        ]);
        // value 99 is unknown and dropped; group 2 resolves to Size=M which no
        // description mentions
        let resolution = resolve_with_tier(
            &selection(&[(1, 99), (2, 20)]),
            &variations,
            Some(&options),
        )
        .unwrap();
        assert_eq!(resolution.tier, MatchTier::FirstAvailable);

        let resolution =
            resolve_with_tier(&selection(&[(1, 10), (5, 50)]), &variations, Some(&options))
                .unwrap();
        assert_eq!(resolution.variation.id, RawId::Int(2));
        assert_eq!(resolution.tier, MatchTier::ComboText);
    }

    #[test]
    fn test_combo_text_beats_earlier_partial() {
        let options = shirt_options();
        let variations = catalog(vec![
            Variation::new("partial", price(20)).with_value_ids([10, 21]),
            Variation::new("legacy", price(25))
                .with_combo_html("<strong>Color:</strong> Red<br><strong>Size:</strong> M<br>"),
        ]);
        let selected = selection(&[(1, 10), (2, 20)]);
        let resolution = resolve_with_tier(&selected, &variations, Some(&options)).unwrap();
        assert_eq!(resolution.variation.id, RawId::from("legacy"));
        assert_eq!(resolution.tier, MatchTier::ComboText);
        assert!(resolution.tier.is_confident());

        // without options only the shared value id is left to go on
        let resolution = resolve_with_tier(&selected, &variations, None).unwrap();
        assert_eq!(resolution.variation.id, RawId::from("partial"));
        assert_eq!(resolution.tier, MatchTier::Partial);
        assert!(!resolution.tier.is_confident());
    }

    #[test]
    fn test_exact_beats_combo_text() {
        let options = shirt_options();
        let variations = catalog(vec![
            Variation::new(1, price(30)).with_combo_html("<strong>Color:</strong> Red<br>"),
            Variation::new(2, price(35)).with_value_ids([10]),
        ]);
        let resolution =
            resolve_with_tier(&selection(&[(1, 10)]), &variations, Some(&options)).unwrap();
        assert_eq!(resolution.variation.id, RawId::Int(2));
        assert_eq!(resolution.tier, MatchTier::Exact);
    }

    #[test]
    fn test_first_exact_match_in_catalog_order() {
        let variations = catalog(vec![
            Variation::new("x", price(1)).with_value_ids([10, 20]),
            Variation::new("y", price(2)).with_value_ids([20, 10]),
        ]);
        let v = resolve(&selection(&[(1, 10), (2, 20)]), &variations, None);
        assert_eq!(id_of(v), Some("x".to_string()));
    }

    #[test]
    fn test_unparseable_ids_never_match() {
        let variations = catalog(vec![
            Variation::new("a", price(1)).with_value_ids([RawId::from("red")]),
            Variation::new("b", price(2)).with_value_ids([RawId::from("red"), RawId::Int(20)]),
        ]);
        let mut selected = SelectedOptions::new();
        selected.select(1, "red");
        // "red" is not an id: no exact match, and no shared parsed id
        let resolution = resolve_with_tier(&selected, &variations, None).unwrap();
        assert_eq!(resolution.variation.id, RawId::from("a"));
        assert_eq!(resolution.tier, MatchTier::FirstAvailable);

        selected.select(2, 20);
        let resolution = resolve_with_tier(&selected, &variations, None).unwrap();
        assert_eq!(resolution.variation.id, RawId::from("b"));
        assert_eq!(resolution.tier, MatchTier::Partial);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let options = shirt_options();
        let variations = catalog(vec![
            Variation::new(1, price(30)).with_value_ids([10, 21]),
            Variation::new(2, price(35)).with_value_ids([11, 20]),
        ]);
        let selected = selection(&[(1, 11)]);
        let first = resolve_with_tier(&selected, &variations, Some(&options));
        let second = resolve_with_tier(&selected, &variations, Some(&options));
        assert_eq!(first, second);
        assert_eq!(first.unwrap().variation.id, RawId::Int(2));
    }
}
