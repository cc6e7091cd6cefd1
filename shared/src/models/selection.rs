//! Option Selection Model

use super::RawId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The shopper's current choice: option group id -> option value id
///
/// One entry per group. Groups are matched by normalized id, so selecting
/// `"1"` after `1` replaces the earlier entry instead of adding a second one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<RawId, RawId>", from = "BTreeMap<RawId, RawId>")]
pub struct SelectedOptions {
    entries: BTreeMap<RawId, RawId>,
}

impl SelectedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `value` for `group`, replacing any previous choice
    ///
    /// Returns the previously selected value of the group, if any.
    pub fn select(&mut self, group: impl Into<RawId>, value: impl Into<RawId>) -> Option<RawId> {
        let group = group.into();
        let previous_key = self
            .entries
            .keys()
            .find(|k| **k == group || k.same_as(&group))
            .cloned();
        let previous = previous_key.and_then(|k| self.entries.remove(&k));
        self.entries.insert(group, value.into());
        previous
    }

    /// Selected value for a group
    pub fn get(&self, group: &RawId) -> Option<&RawId> {
        self.entries
            .iter()
            .find(|(k, _)| *k == group || k.same_as(group))
            .map(|(_, v)| v)
    }

    /// Drop the selection of a group
    pub fn clear(&mut self, group: &RawId) -> Option<RawId> {
        let key = self
            .entries
            .keys()
            .find(|k| *k == group || k.same_as(group))
            .cloned()?;
        self.entries.remove(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RawId, &RawId)> {
        self.entries.iter()
    }

    /// Selected value ids, one per group
    pub fn value_ids(&self) -> impl Iterator<Item = &RawId> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON form posted with cart requests (`{"1": 10, "2": "20"}`)
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl<G, V> FromIterator<(G, V)> for SelectedOptions
where
    G: Into<RawId>,
    V: Into<RawId>,
{
    fn from_iter<I: IntoIterator<Item = (G, V)>>(iter: I) -> Self {
        let mut selected = SelectedOptions::new();
        for (group, value) in iter {
            selected.select(group, value);
        }
        selected
    }
}

impl From<BTreeMap<RawId, RawId>> for SelectedOptions {
    fn from(entries: BTreeMap<RawId, RawId>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<SelectedOptions> for BTreeMap<RawId, RawId> {
    fn from(selected: SelectedOptions) -> Self {
        selected.entries
    }
}
