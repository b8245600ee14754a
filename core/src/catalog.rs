use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Immutable mineral and location reference data shared by both game modes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    minerals: Vec<Mineral>,
    locations: Vec<Location>,
}

impl Catalog {
    pub fn new(minerals: Vec<Mineral>, locations: Vec<Location>) -> Result<Self> {
        let catalog = Self {
            minerals,
            locations,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)
            .map_err(|err| GameError::InvalidCatalog(err.to_string()))?;
        catalog.validate()?;
        log::debug!(
            "catalog loaded: {} minerals, {} locations",
            catalog.minerals.len(),
            catalog.locations.len()
        );
        Ok(catalog)
    }

    /// The catalog shipped with the game.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for mineral in &self.minerals {
            if !seen.insert(mineral.id.as_str()) {
                return Err(invalid(format!("duplicate mineral id {:?}", mineral.id)));
            }
            if mineral.value == 0 {
                return Err(invalid(format!("mineral {:?} has no value", mineral.id)));
            }
            if !(1.0..=10.0).contains(&mineral.hardness) {
                return Err(invalid(format!(
                    "mineral {:?} hardness {} outside 1..=10",
                    mineral.id, mineral.hardness
                )));
            }
        }

        let mut seen_locations = BTreeSet::new();
        for location in &self.locations {
            if !seen_locations.insert(location.id.as_str()) {
                return Err(invalid(format!("duplicate location id {:?}", location.id)));
            }
            if location.minerals.is_empty() {
                return Err(invalid(format!("location {:?} has an empty pool", location.id)));
            }
            for mineral_id in &location.minerals {
                let Some(mineral) = self.get_by_id(mineral_id) else {
                    return Err(invalid(format!(
                        "location {:?} lists unknown mineral {:?}",
                        location.id, mineral_id
                    )));
                };
                if !mineral.is_found_at(&location.id) {
                    return Err(invalid(format!(
                        "mineral {:?} does not list location {:?}",
                        mineral.id, location.id
                    )));
                }
            }
        }

        for mineral in &self.minerals {
            for location_id in &mineral.locations {
                let listed = self
                    .location(location_id)
                    .is_some_and(|location| location.minerals.contains(&mineral.id));
                if !listed {
                    return Err(invalid(format!(
                        "mineral {:?} claims location {:?} which does not pool it",
                        mineral.id, location_id
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn all(&self) -> &[Mineral] {
        &self.minerals
    }

    pub fn len(&self) -> usize {
        self.minerals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minerals.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Mineral> {
        self.minerals.iter().find(|mineral| mineral.id == id)
    }

    /// Sampling pool for a location, in pool order. Empty for unknown locations.
    pub fn get_by_location(&self, location_id: &str) -> Vec<&Mineral> {
        self.location(location_id)
            .map(|location| {
                location
                    .minerals
                    .iter()
                    .filter_map(|id| self.get_by_id(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Display names sorted alphabetically.
    pub fn all_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.minerals.iter().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    /// Case-insensitive substring autocomplete over display names.
    ///
    /// Returns nothing until `query` reaches `min_len` characters, at most `limit` names.
    pub fn suggestions(&self, query: &str, min_len: usize, limit: usize) -> Vec<&str> {
        if query.chars().count() < min_len || query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.all_names()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }
}

fn invalid(reason: String) -> GameError {
    GameError::InvalidCatalog(reason)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::vec;

    pub(crate) fn mineral(id: &str, name: &str, value: u32) -> Mineral {
        Mineral {
            id: id.into(),
            name: name.into(),
            hardness: 7.0,
            streak: "white".into(),
            luster: Luster::Vitreous,
            cleavage: Cleavage::None,
            color: vec!["#ffffff".into()],
            color_names: vec!["white".into()],
            magnetic: false,
            density: 2.65,
            description: "A test mineral.".into(),
            fun_fact: "It exists for tests.".into(),
            value,
            rarity: Rarity::Common,
            locations: vec!["test-pit".into()],
            crystal_system: None,
            formula: None,
        }
    }

    pub(crate) fn test_catalog(count: usize) -> Catalog {
        let minerals: Vec<Mineral> = (0..count)
            .map(|i| mineral(&format!("mineral-{i}"), &format!("Mineral {i}"), 10 + i as u32))
            .collect();
        let location = Location {
            id: "test-pit".into(),
            name: "Test Pit".into(),
            description: "Everything can be found here.".into(),
            difficulty: Difficulty::Easy,
            minerals: minerals.iter().map(|m| m.id.clone()).collect(),
        };
        Catalog::new(minerals, vec![location]).unwrap()
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();

        assert!(catalog.len() >= 10);
        assert_eq!(catalog.locations().len(), 5);
        assert_eq!(catalog.get_by_id("quartz").unwrap().name, "Quartz");
        assert!(catalog.get_by_id("unobtainium").is_none());
        for location in catalog.locations() {
            assert!(!catalog.get_by_location(&location.id).is_empty());
        }
    }

    #[test]
    fn get_by_location_follows_pool() {
        let catalog = Catalog::builtin().unwrap();
        let pool = catalog.get_by_location("deep-shaft");

        assert!(pool.iter().any(|m| m.id == "diamond"));
        assert!(pool.iter().all(|m| m.is_found_at("deep-shaft")));
        assert!(catalog.get_by_location("moon-base").is_empty());
    }

    #[test]
    fn all_names_are_sorted() {
        let catalog = Catalog::builtin().unwrap();
        let names = catalog.all_names();

        assert_eq!(names.len(), catalog.len());
        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn suggestions_match_substrings_case_insensitively() {
        let catalog = Catalog::builtin().unwrap();

        let found = catalog.suggestions("QUA", 2, 6);
        assert!(found.contains(&"Quartz"));
        assert!(found.contains(&"Rose Quartz"));
        assert!(found.contains(&"Smoky Quartz"));

        assert!(catalog.suggestions("q", 2, 6).is_empty());
        assert_eq!(catalog.suggestions("a", 1, 6).len(), 6);
    }

    #[test]
    fn rejects_pool_with_unknown_mineral() {
        let minerals = vec![mineral("a", "A", 5)];
        let location = Location {
            id: "test-pit".into(),
            name: "Test Pit".into(),
            description: String::new(),
            difficulty: Difficulty::Hard,
            minerals: vec!["a".into(), "b".into()],
        };

        assert!(matches!(
            Catalog::new(minerals, vec![location]),
            Err(GameError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn rejects_duplicate_ids_and_zero_values() {
        let duplicate = Catalog::new(vec![mineral("a", "A", 5), mineral("a", "B", 5)], vec![]);
        assert!(matches!(duplicate, Err(GameError::InvalidCatalog(_))));

        let mut worthless = mineral("a", "A", 0);
        worthless.locations.clear();
        assert!(matches!(
            Catalog::new(vec![worthless], vec![]),
            Err(GameError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Catalog::from_json("{\"minerals\": 3}"),
            Err(GameError::InvalidCatalog(_))
        ));
    }
}
