//! Legacy combo description matching
//!
//! Older catalogs describe a variation only through rendered markup such as
//! `<strong>Color:</strong> Red<br><strong>Size:</strong> M<br>`. These
//! helpers turn that markup and the current selection into comparable
//! `(name, value)` pairs.

use regex::Regex;
use shared::models::{OptionGroup, SelectedOptions, find_group};
use std::sync::LazyLock;

static COMBO_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<strong>([^:<]+):</strong>\s*([^<]+)<br\s*/?>")
        .expect("combo pattern is a valid regex")
});

/// `(option name, value label)` pair, both trimmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboPair<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Extract every `<strong>name:</strong> value<br>` fragment
pub fn parse_combo(html: &str) -> Vec<ComboPair<'_>> {
    COMBO_PAIR
        .captures_iter(html)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().trim();
            let value = caps.get(2)?.as_str().trim();
            Some(ComboPair { name, value })
        })
        .collect()
}

/// Describe the selection as `(group name, value label)` pairs
///
/// Entries whose group or value cannot be found in `options` are skipped.
pub fn selected_pairs<'a>(
    selected: &SelectedOptions,
    options: &'a [OptionGroup],
) -> Vec<ComboPair<'a>> {
    selected
        .iter()
        .filter_map(|(group_id, value_id)| {
            let group = find_group(options, group_id)?;
            let value = group.value(value_id)?;
            Some(ComboPair {
                name: group.name.trim(),
                value: value.value.trim(),
            })
        })
        .collect()
}

/// Whether every wanted pair appears in the description
///
/// Extra pairs in the description are fine. A description without any
/// parseable pair never matches.
pub fn describes(html: &str, wanted: &[ComboPair<'_>]) -> bool {
    let pairs = parse_combo(html);
    if pairs.is_empty() {
        return false;
    }
    wanted.iter().all(|w| pairs.iter().any(|p| p == w))
}
