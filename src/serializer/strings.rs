//! Localization string table
//!
//! Export collects every non-empty text label into a flat key -> text map.
//! Keys are the node's raw name (its id when the name is blank), and the
//! first node to claim a key keeps it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ElementTree;

/// Flat key -> literal text mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringTable(BTreeMap<String, String>);

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Insert unless `key` is already present. Returns whether it was inserted.
    pub fn insert_first(&mut self, key: impl Into<String>, text: impl Into<String>) -> bool {
        match self.0.entry(key.into()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(text.into());
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// First occurrence of a key wins
impl FromIterator<(String, String)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut table = StringTable::new();
        for (key, text) in iter {
            table.insert_first(key, text);
        }
        table
    }
}

/// Lookup key for a node name: trimmed, interior spaces replaced with `_`
pub fn string_key(name: &str) -> String {
    name.trim().replace(' ', "_")
}

/// Collect every text label with non-empty trimmed content, in depth-first order
pub fn collect_strings(tree: &ElementTree) -> StringTable {
    tree.depth_first()
        .into_iter()
        .filter_map(|id| tree.get(id))
        .filter_map(|node| {
            let text = node.text()?;
            if text.label.trim().is_empty() {
                return None;
            }
            let key = if node.name.trim().is_empty() {
                node.id.to_string()
            } else {
                node.name.clone()
            };
            Some((key, text.label.clone()))
        })
        .collect()
}
