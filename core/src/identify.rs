use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

pub const DEFAULT_MAX_ATTEMPTS: u8 = 3;

/// Case-folded, trimmed form of a guess.
pub fn normalize_guess(guess: &str) -> String {
    guess.trim().to_lowercase()
}

/// Lowercase with every whitespace run collapsed into a single hyphen.
pub fn slugify(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// A guess names the mineral when it matches the display name ignoring case, or when its slug
/// form equals the mineral id.
pub fn is_correct_guess(mineral: &Mineral, guess: &str) -> bool {
    normalize_guess(guess) == mineral.name.to_lowercase() || slugify(guess) == mineral.id
}

/// Guidance after a wrong guess. Never affects scoring.
pub fn hint(mineral: &Mineral, guess: &str, rng: &mut impl RandomSource) -> String {
    let guess = normalize_guess(guess);
    let name = mineral.name.to_lowercase();
    let first_word = name.split(' ').next().unwrap_or_default();

    if name.contains(guess.as_str()) || guess.contains(first_word) {
        let feel = if mineral.hardness < 4.0 {
            "softness"
        } else {
            "hardness"
        };
        return format!(
            "Almost! Think about the {feel}, it's {} on the Mohs scale.",
            mineral.hardness
        );
    }

    match rng.index(4) {
        0 => format!("Hint: The streak color is {}.", mineral.streak),
        1 => format!(
            "Hint: The luster is {} ({}).",
            mineral.luster,
            mineral.luster.description()
        ),
        2 => format!("Hint: It has {} cleavage.", mineral.cleavage),
        _ => format!("Hint: Hardness is {} on the Mohs scale.", mineral.hardness),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifyPhase {
    /// Just found, nothing attempted yet.
    Prompting,
    /// At least one wrong guess, attempts remain.
    Guessing,
    Correct,
    /// Every attempt spent; only collect or leave remain.
    Exhausted,
    Collected,
    Left,
}

impl IdentifyPhase {
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Correct | Self::Collected | Self::Left)
    }

    pub const fn accepts_guesses(self) -> bool {
        matches!(self, Self::Prompting | Self::Guessing)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// Whitespace-only submissions are ignored and cost nothing.
    Blank,
    Correct { value: u32 },
    Incorrect { hint: String, attempts_left: u8 },
    /// The final attempt missed.
    Exhausted { hint: String },
}

impl GuessOutcome {
    pub const fn is_correct(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Incorrect { hint, .. } | Self::Exhausted { hint } => Some(hint),
            Self::Blank | Self::Correct { .. } => None,
        }
    }
}

/// Per-encounter identification state. A fresh value is built for every specimen, so attempt
/// counts and revealed tools never carry over between encounters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    mineral: Mineral,
    phase: IdentifyPhase,
    attempts: u8,
    max_attempts: u8,
    tools: BTreeSet<Tool>,
    last_hint: Option<String>,
}

impl Identification {
    pub fn new(mineral: Mineral, max_attempts: u8) -> Self {
        Self {
            mineral,
            phase: IdentifyPhase::Prompting,
            attempts: 0,
            max_attempts: max_attempts.max(1),
            tools: BTreeSet::new(),
            last_hint: None,
        }
    }

    pub fn mineral(&self) -> &Mineral {
        &self.mineral
    }

    pub fn phase(&self) -> IdentifyPhase {
        self.phase
    }

    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    pub fn attempts_left(&self) -> u8 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    pub fn tools(&self) -> &BTreeSet<Tool> {
        &self.tools
    }

    pub fn tools_used(&self) -> usize {
        self.tools.len()
    }

    pub fn is_revealed(&self, tool: Tool) -> bool {
        self.tools.contains(&tool)
    }

    pub fn last_hint(&self) -> Option<&str> {
        self.last_hint.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.phase.is_resolved()
    }

    /// Uses a tool on the specimen. Returns `false` when it had already been used.
    pub fn reveal_tool(&mut self, tool: Tool) -> Result<bool> {
        self.check_unresolved()?;
        Ok(self.tools.insert(tool))
    }

    pub fn guess(&mut self, guess: &str, rng: &mut impl RandomSource) -> Result<GuessOutcome> {
        self.check_unresolved()?;
        if !self.phase.accepts_guesses() {
            return Err(GameError::OutOfAttempts);
        }
        if guess.trim().is_empty() {
            return Ok(GuessOutcome::Blank);
        }

        if is_correct_guess(&self.mineral, guess) {
            log::debug!("identified {} with {} tools", self.mineral.id, self.tools.len());
            self.phase = IdentifyPhase::Correct;
            self.last_hint = None;
            return Ok(GuessOutcome::Correct {
                value: self.mineral.value,
            });
        }

        self.attempts = self.attempts.saturating_add(1);
        let hint = hint(&self.mineral, guess, rng);
        self.last_hint = Some(hint.clone());

        if self.attempts >= self.max_attempts {
            log::debug!("attempts exhausted for {}", self.mineral.id);
            self.phase = IdentifyPhase::Exhausted;
            Ok(GuessOutcome::Exhausted { hint })
        } else {
            self.phase = IdentifyPhase::Guessing;
            Ok(GuessOutcome::Incorrect {
                hint,
                attempts_left: self.attempts_left(),
            })
        }
    }

    /// Keeps the specimen without a name; it sells at the unidentified rate.
    pub fn collect(&mut self) -> Result<InventoryItem> {
        self.check_unresolved()?;
        self.phase = IdentifyPhase::Collected;
        Ok(InventoryItem::unidentified(self.mineral.clone()))
    }

    pub fn leave(&mut self) -> Result<()> {
        self.check_unresolved()?;
        self.phase = IdentifyPhase::Left;
        Ok(())
    }

    /// Inventory entry earned by a correct identification.
    pub fn identified_item(&self) -> Option<InventoryItem> {
        matches!(self.phase, IdentifyPhase::Correct)
            .then(|| InventoryItem::identified(self.mineral.clone()))
    }

    fn check_unresolved(&self) -> Result<()> {
        if self.phase.is_resolved() {
            Err(GameError::AlreadyResolved)
        } else {
            Ok(())
        }
    }
}
