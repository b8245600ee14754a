use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Luster {
    Metallic,
    Vitreous,
    Pearly,
    Silky,
    Resinous,
    Earthy,
    Adamantine,
    Waxy,
}

impl Luster {
    pub const ALL: [Self; 8] = [
        Self::Metallic,
        Self::Vitreous,
        Self::Pearly,
        Self::Silky,
        Self::Resinous,
        Self::Earthy,
        Self::Adamantine,
        Self::Waxy,
    ];

    pub const fn name(self) -> &'static str {
        use Luster::*;
        match self {
            Metallic => "metallic",
            Vitreous => "vitreous",
            Pearly => "pearly",
            Silky => "silky",
            Resinous => "resinous",
            Earthy => "earthy",
            Adamantine => "adamantine",
            Waxy => "waxy",
        }
    }

    pub const fn description(self) -> &'static str {
        use Luster::*;
        match self {
            Metallic => "Shiny like polished metal, reflects light strongly",
            Vitreous => "Glassy, like broken glass or a window",
            Pearly => "Soft iridescent sheen, like the inside of a shell",
            Silky => "Silky sheen with a fibrous texture",
            Resinous => "Like resin or amber, yellowish glow",
            Earthy => "Dull, no shine, like dry clay or chalk",
            Adamantine => "Brilliant, diamond-like sparkle",
            Waxy => "Soft waxy sheen, like candle wax",
        }
    }
}

impl fmt::Display for Luster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cleavage {
    None,
    Poor,
    Good,
    Perfect,
    Basal,
    Cubic,
    Rhombohedral,
}

impl Cleavage {
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::Poor,
        Self::Good,
        Self::Perfect,
        Self::Basal,
        Self::Cubic,
        Self::Rhombohedral,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Poor => "poor",
            Self::Good => "good",
            Self::Perfect => "perfect",
            Self::Basal => "basal",
            Self::Cubic => "cubic",
            Self::Rhombohedral => "rhombohedral",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::None => "Breaks irregularly (conchoidal or uneven fracture)",
            Self::Poor => "Barely visible cleavage planes",
            Self::Good => "Breaks along flat planes in one direction",
            Self::Perfect => "Excellent flat cleavage planes",
            Self::Basal => "Perfect cleavage in one direction only (sheets)",
            Self::Cubic => "Perfect cleavage in three directions at right angles",
            Self::Rhombohedral => "Perfect cleavage in three directions forming a rhombus",
        }
    }
}

impl fmt::Display for Cleavage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Presentation tier only, never part of scoring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    pub const ALL: [Self; 3] = [Self::Common, Self::Uncommon, Self::Rare];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Battery charges granted at the start of a trip.
    pub const fn starting_battery(self) -> CellCount {
        match self {
            Self::Easy => 30,
            Self::Medium => 25,
            Self::Hard => 20,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mineral {
    pub id: String,
    pub name: String,
    /// Mohs scale, 1 to 10.
    pub hardness: f32,
    pub streak: String,
    pub luster: Luster,
    pub cleavage: Cleavage,
    /// Display colours as hex strings.
    pub color: Vec<String>,
    pub color_names: Vec<String>,
    pub magnetic: bool,
    /// g/cm³
    pub density: f32,
    pub description: String,
    pub fun_fact: String,
    /// Full sale price in coins.
    pub value: u32,
    pub rarity: Rarity,
    pub locations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crystal_system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl Mineral {
    pub fn is_found_at(&self, location_id: &str) -> bool {
        self.locations.iter().any(|id| id == location_id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Sampling pool of mineral ids.
    pub minerals: Vec<String>,
}

impl Location {
    pub const fn starting_battery(&self) -> CellCount {
        self.difficulty.starting_battery()
    }
}
