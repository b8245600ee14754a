use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Reverse;
use serde::{Deserialize, Serialize};

use crate::*;

pub const TOOL_SHED_KEY: &str = "toolshed-scores";
pub const SHOP_KEY: &str = "shop-scores-named";
pub const MAX_ENTRIES: usize = 10;
pub const MAX_NAME_LEN: usize = 25;
pub const DEFAULT_NAME: &str = "Anonymous";

/// Whole-value string storage, the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> core::result::Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> core::result::Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, like a full or disabled browser storage.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> core::result::Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::WriteFailed(key.into()));
        }
        self.entries.insert(key.into(), value);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedScore {
    pub name: String,
    pub score: u32,
}

impl NamedScore {
    pub fn new(name: &str, score: u32) -> Self {
        Self {
            name: clean_name(name),
            score,
        }
    }
}

/// Trimmed, at most [`MAX_NAME_LEN`] characters, [`DEFAULT_NAME`] when blank.
pub fn clean_name(name: &str) -> String {
    let name: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    let name = name.trim_end();
    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNamedScores {
    Named(Vec<NamedScore>),
    /// Older builds stored bare numbers under the shop key.
    Legacy(Vec<u32>),
}

/// High-score tables for both modes.
///
/// Every read and write replaces the whole list. Any storage problem degrades to an empty table or
/// a skipped write; nothing here ever fails.
#[derive(Clone, Debug, Default)]
pub struct ScoreBoard<S> {
    store: S,
}

impl<S: KeyValueStore> ScoreBoard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn tool_shed_scores(&self) -> Vec<u32> {
        let Some(raw) = self.store.get(TOOL_SHED_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<u32>>(&raw) {
            Ok(mut scores) => {
                scores.sort_unstable_by_key(|&score| Reverse(score));
                scores.truncate(MAX_ENTRIES);
                scores
            }
            Err(err) => {
                log::warn!("Ignoring corrupt {TOOL_SHED_KEY}: {err}");
                Vec::new()
            }
        }
    }

    pub fn save_tool_shed_score(&mut self, score: u32) {
        let mut scores = self.tool_shed_scores();
        scores.push(score);
        scores.sort_unstable_by_key(|&score| Reverse(score));
        scores.truncate(MAX_ENTRIES);
        self.write(TOOL_SHED_KEY, &scores);
    }

    pub fn named_scores(&self) -> Vec<NamedScore> {
        let Some(raw) = self.store.get(SHOP_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<StoredNamedScores>(&raw) {
            Ok(StoredNamedScores::Named(mut scores)) => {
                scores.sort_by_key(|entry| Reverse(entry.score));
                scores.truncate(MAX_ENTRIES);
                scores
            }
            Ok(StoredNamedScores::Legacy(_)) => {
                log::warn!("Ignoring legacy {SHOP_KEY} entries without names");
                Vec::new()
            }
            Err(err) => {
                log::warn!("Ignoring corrupt {SHOP_KEY}: {err}");
                Vec::new()
            }
        }
    }

    pub fn save_named_score(&mut self, name: &str, score: u32) {
        let mut scores = self.named_scores();
        scores.push(NamedScore::new(name, score));
        // stable, so earlier entries win ties
        scores.sort_by_key(|entry| Reverse(entry.score));
        scores.truncate(MAX_ENTRIES);
        self.write(SHOP_KEY, &scores);
    }

    /// Whether a shop payout earns a place on the named table.
    pub fn qualifies_for_named(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        let scores = self.named_scores();
        scores.len() < MAX_ENTRIES || scores.last().is_some_and(|lowest| score > lowest.score)
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Failed to encode {key}: {err}");
                return;
            }
        };
        if let Err(err) = self.store.set(key, json) {
            log::error!("Failed to save {key}: {err}");
        }
    }
}
