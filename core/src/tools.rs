use alloc::format;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Simulated field instrument, each revealing one property of the specimen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Hardness,
    Streak,
    Luster,
    Magnet,
    Cleavage,
    Density,
}

impl Tool {
    pub const ALL: [Self; 6] = [
        Self::Hardness,
        Self::Streak,
        Self::Luster,
        Self::Magnet,
        Self::Cleavage,
        Self::Density,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Hardness => "hardness",
            Self::Streak => "streak",
            Self::Luster => "luster",
            Self::Magnet => "magnet",
            Self::Cleavage => "cleavage",
            Self::Density => "density",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hardness => "Hardness Kit",
            Self::Streak => "Streak Plate",
            Self::Luster => "Light",
            Self::Magnet => "Magnet",
            Self::Cleavage => "Cleavage Viewer",
            Self::Density => "Density Scale",
        }
    }

    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Hardness => "Scratch test with various materials",
            Self::Streak => "Rub on unglazed porcelain",
            Self::Luster => "Examine surface reflectivity",
            Self::Magnet => "Check magnetic attraction",
            Self::Cleavage => "Examine crystal faces and break patterns",
            Self::Density => "Density test: weigh in air and water",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.id() == id)
    }

    /// What the tool tells the player about `mineral`.
    pub fn readout(self, mineral: &Mineral) -> String {
        match self {
            Self::Hardness => format!("Hardness ~{}", hardness_range(mineral.hardness)),
            Self::Streak => format!("Streak: {}", mineral.streak),
            Self::Luster => format!(
                "Luster: {} ({})",
                mineral.luster,
                mineral.luster.description()
            ),
            Self::Magnet if mineral.magnetic => "Magnetic! Attracted to magnet".into(),
            Self::Magnet => "Not magnetic".into(),
            Self::Cleavage => format!(
                "Cleavage: {} ({})",
                mineral.cleavage,
                mineral.cleavage.description()
            ),
            Self::Density => format!(
                "Density: ~{:.1} g/cm³ ({})",
                mineral.density,
                density_description(mineral.density)
            ),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn hardness_description(hardness: f32) -> &'static str {
    match hardness {
        h if h <= 1.0 => "Extremely soft, easily scratched with a fingernail",
        h if h <= 2.0 => "Very soft, scratched by a fingernail",
        h if h <= 3.0 => "Soft, scratched by a copper coin",
        h if h <= 4.0 => "Fairly soft, scratched by a steel nail",
        h if h <= 5.0 => "Medium, scratched by a steel file",
        h if h <= 6.0 => "Medium-hard, scratched by glass, scratches steel",
        h if h <= 7.0 => "Hard, scratches glass easily",
        h if h <= 8.0 => "Very hard, scratches quartz",
        h if h <= 9.0 => "Extremely hard, scratches topaz",
        _ => "Hardest natural mineral, scratches everything",
    }
}

pub fn hardness_range(hardness: f32) -> &'static str {
    match hardness {
        h if h <= 2.0 => "1–2 (scratched by fingernail)",
        h if h <= 3.0 => "2.5–3 (scratched by penny)",
        h if h <= 4.0 => "3–4 (scratched by nail)",
        h if h <= 5.0 => "4.5–5 (scratched by steel file)",
        h if h <= 6.0 => "5.5–6 (scratches glass)",
        h if h <= 7.0 => "6.5–7 (scratches glass easily)",
        h if h <= 8.0 => "7.5–8 (very hard)",
        h if h <= 9.0 => "8.5–9 (extremely hard)",
        _ => "10 (hardest)",
    }
}

pub fn density_description(density: f32) -> &'static str {
    match density {
        d if d < 2.0 => "Very light, lighter than most rocks",
        d if d < 3.0 => "Light, average rock weight",
        d if d < 4.0 => "Moderate, slightly heavier than average",
        d if d < 5.0 => "Heavy, noticeably heavy for its size",
        d if d < 8.0 => "Very heavy, much heavier than typical rocks",
        _ => "Extremely heavy, like solid metal",
    }
}
