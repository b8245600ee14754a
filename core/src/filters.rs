use alloc::string::String;
use alloc::vec::Vec;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

use crate::*;

pub const FILTER_KEY: &str = "reference-filters";

pub const MIN_HARDNESS: f32 = 1.0;
pub const MAX_HARDNESS: f32 = 10.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagneticFilter {
    #[default]
    All,
    Yes,
    No,
}

impl MagneticFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Yes, Self::No];

    pub const fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.name() == name)
    }

    pub const fn matches(self, magnetic: bool) -> bool {
        match self {
            Self::All => true,
            Self::Yes => magnetic,
            Self::No => !magnetic,
        }
    }
}

/// Reference list selections. Unset choices are stored as empty strings by older saves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceFilters {
    #[serde(deserialize_with = "blank_as_none")]
    pub luster: Option<Luster>,
    #[serde(deserialize_with = "blank_as_none")]
    pub rarity: Option<Rarity>,
    pub hardness_min: f32,
    pub hardness_max: f32,
    pub magnetic: MagneticFilter,
    #[serde(deserialize_with = "blank_as_none")]
    pub location: Option<String>,
}

impl Default for ReferenceFilters {
    fn default() -> Self {
        Self {
            luster: None,
            rarity: None,
            hardness_min: MIN_HARDNESS,
            hardness_max: MAX_HARDNESS,
            magnetic: MagneticFilter::All,
            location: None,
        }
    }
}

impl ReferenceFilters {
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    pub fn matches(&self, mineral: &Mineral) -> bool {
        self.luster.is_none_or(|luster| mineral.luster == luster)
            && self.rarity.is_none_or(|rarity| mineral.rarity == rarity)
            && mineral.hardness >= self.hardness_min
            && mineral.hardness <= self.hardness_max
            && self.magnetic.matches(mineral.magnetic)
            && self
                .location
                .as_deref()
                .is_none_or(|location| mineral.is_found_at(location))
    }

    /// Minerals passing every filter whose name contains `search`, ordered by name.
    pub fn apply<'a>(&self, catalog: &'a Catalog, search: &str) -> Vec<&'a Mineral> {
        let needle = search.trim().to_lowercase();
        let mut found: Vec<&Mineral> = catalog
            .all()
            .iter()
            .filter(|mineral| needle.is_empty() || mineral.name.to_lowercase().contains(&needle))
            .filter(|mineral| self.matches(mineral))
            .collect();
        found.sort_by_cached_key(|mineral| mineral.name.to_lowercase());
        found
    }

    /// Saved selections, or the defaults when nothing usable is stored.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(raw) = store.get(FILTER_KEY) else {
            return Self::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("Ignoring corrupt {FILTER_KEY}: {err}");
            Self::default()
        })
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(err) = store.set(FILTER_KEY, json) {
                    log::error!("Failed to save {FILTER_KEY}: {err}");
                }
            }
            Err(err) => log::error!("Failed to encode {FILTER_KEY}: {err}"),
        }
    }
}

fn blank_as_none<'de, D, T>(deserializer: D) -> core::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            T::deserialize(IntoDeserializer::<D::Error>::into_deserializer(raw)).map(Some)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_everything() {
        let catalog = Catalog::builtin().unwrap();
        let filters = ReferenceFilters::default();

        assert!(!filters.is_active());
        assert_eq!(filters.apply(&catalog, "").len(), catalog.len());
    }

    #[test]
    fn results_are_sorted_by_name() {
        let catalog = Catalog::builtin().unwrap();
        let names: Vec<_> = ReferenceFilters::default()
            .apply(&catalog, "")
            .into_iter()
            .map(|mineral| mineral.name.to_lowercase())
            .collect();

        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn combined_filters_narrow_results() {
        let catalog = Catalog::builtin().unwrap();
        let filters = ReferenceFilters {
            luster: Some(Luster::Metallic),
            magnetic: MagneticFilter::Yes,
            ..ReferenceFilters::default()
        };

        let found = filters.apply(&catalog, "");

        assert!(!found.is_empty());
        assert!(found
            .iter()
            .all(|mineral| mineral.magnetic && mineral.luster == Luster::Metallic));
        assert!(found.iter().any(|mineral| mineral.id == "magnetite"));
    }

    #[test]
    fn search_and_hardness_range() {
        let catalog = Catalog::builtin().unwrap();
        let quartzes = ReferenceFilters::default().apply(&catalog, "QUARTZ");
        assert!(quartzes.len() >= 3);
        assert!(quartzes.iter().all(|m| m.name.to_lowercase().contains("quartz")));

        let hard = ReferenceFilters {
            hardness_min: 9.0,
            ..ReferenceFilters::default()
        };
        let found = hard.apply(&catalog, "");
        assert!(found.iter().any(|m| m.id == "diamond"));
        assert!(found.iter().all(|m| m.hardness >= 9.0));
    }

    #[test]
    fn location_filter_uses_pools() {
        let catalog = Catalog::builtin().unwrap();
        let filters = ReferenceFilters {
            location: Some("deep-shaft".into()),
            ..ReferenceFilters::default()
        };

        let found = filters.apply(&catalog, "");

        assert_eq!(found.len(), catalog.get_by_location("deep-shaft").len());
    }

    #[test]
    fn load_accepts_blank_strings_from_older_saves() {
        let store = MemoryStore::new().with_entry(
            FILTER_KEY,
            r#"{"luster":"","rarity":"rare","hardnessMin":3,"hardnessMax":8,"magnetic":"no","location":""}"#,
        );

        let filters = ReferenceFilters::load(&store);

        assert_eq!(filters.luster, None);
        assert_eq!(filters.rarity, Some(Rarity::Rare));
        assert_eq!(filters.hardness_min, 3.0);
        assert_eq!(filters.hardness_max, 8.0);
        assert_eq!(filters.magnetic, MagneticFilter::No);
        assert_eq!(filters.location, None);
    }

    #[test]
    fn corrupt_or_missing_data_falls_back_to_defaults() {
        let corrupt = MemoryStore::new().with_entry(FILTER_KEY, "{\"luster\": 12");
        assert_eq!(ReferenceFilters::load(&corrupt), ReferenceFilters::default());
        assert_eq!(ReferenceFilters::load(&MemoryStore::new()), ReferenceFilters::default());

        let unknown = MemoryStore::new().with_entry(FILTER_KEY, r#"{"luster":"sparkly"}"#);
        assert_eq!(ReferenceFilters::load(&unknown), ReferenceFilters::default());
    }

    #[test]
    fn save_then_load_restores_selection() {
        let mut store = MemoryStore::new();
        let filters = ReferenceFilters {
            rarity: Some(Rarity::Uncommon),
            location: Some("gem-quarry".into()),
            ..ReferenceFilters::default()
        };

        filters.save(&mut store);

        assert_eq!(ReferenceFilters::load(&store), filters);
        assert!(filters.is_active());
    }

    #[test]
    fn failed_save_is_absorbed() {
        let mut store = MemoryStore::read_only();
        ReferenceFilters::default().save(&mut store);
        assert!(store.get(FILTER_KEY).is_none());
    }
}
