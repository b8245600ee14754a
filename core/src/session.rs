use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Tools available, the round's mineral is still unnamed.
    Testing,
    /// Round scored, waiting for the player to move on.
    Result,
    Finished,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundAdvance {
    NextRound(u8),
    Finished { total: u32 },
}

/// Fixed-length Tool Shed practice: identify one mineral per round with as few tools as possible.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolShedSession {
    config: GameConfig,
    round: u8,
    round_scores: Vec<u32>,
    used: BTreeSet<String>,
    identification: Identification,
    phase: SessionPhase,
    forced: Option<String>,
}

impl ToolShedSession {
    /// `forced` names the mineral for round one, e.g. when practising from the reference page.
    pub fn start(
        catalog: &Catalog,
        forced: Option<&str>,
        config: &GameConfig,
        rng: &mut impl RandomSource,
    ) -> Result<Self> {
        let forced = forced.map(String::from);
        let used = BTreeSet::new();
        let target = pick_target(catalog, &used, forced.as_deref(), rng)?;
        log::debug!("tool shed session started on {}", target.id);
        Ok(Self {
            config: *config,
            round: 1,
            round_scores: Vec::new(),
            used,
            identification: Identification::new(target, config.max_attempts),
            phase: SessionPhase::Testing,
            forced,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn rounds(&self) -> u8 {
        self.config.rounds
    }

    pub fn target(&self) -> &Mineral {
        self.identification.mineral()
    }

    pub fn identification(&self) -> &Identification {
        &self.identification
    }

    pub fn round_scores(&self) -> &[u32] {
        &self.round_scores
    }

    /// Score of the round just resolved.
    pub fn last_round_score(&self) -> Option<u32> {
        match self.phase {
            SessionPhase::Testing => None,
            SessionPhase::Result | SessionPhase::Finished => self.round_scores.last().copied(),
        }
    }

    pub fn total_score(&self) -> u32 {
        self.round_scores.iter().sum()
    }

    pub fn correct_count(&self) -> usize {
        self.round_scores.iter().filter(|&&score| score > 0).count()
    }

    pub fn max_score(&self) -> u32 {
        max_session_score(self.config.rounds)
    }

    pub fn efficiency(&self) -> u32 {
        efficiency_percent(self.total_score(), self.config.rounds)
    }

    pub fn is_last_round(&self) -> bool {
        self.round >= self.config.rounds
    }

    pub fn reveal_tool(&mut self, tool: Tool) -> Result<bool> {
        self.check_phase(SessionPhase::Testing)?;
        self.identification.reveal_tool(tool)
    }

    pub fn guess(&mut self, guess: &str, rng: &mut impl RandomSource) -> Result<GuessOutcome> {
        self.check_phase(SessionPhase::Testing)?;
        let outcome = self.identification.guess(guess, rng)?;
        match outcome {
            GuessOutcome::Correct { .. } => {
                self.record(tool_shed_score(true, self.identification.tools_used()));
            }
            GuessOutcome::Exhausted { .. } => self.record(0),
            GuessOutcome::Blank | GuessOutcome::Incorrect { .. } => {}
        }
        Ok(outcome)
    }

    /// Gives up on the round for no points.
    pub fn skip(&mut self) -> Result<()> {
        self.check_phase(SessionPhase::Testing)?;
        self.record(0);
        Ok(())
    }

    /// Moves past a resolved round. After the last one the total is saved to `scores`.
    pub fn next_round<S: KeyValueStore>(
        &mut self,
        catalog: &Catalog,
        rng: &mut impl RandomSource,
        scores: &mut ScoreBoard<S>,
    ) -> Result<RoundAdvance> {
        self.check_phase(SessionPhase::Result)?;
        if self.is_last_round() {
            let total = self.total_score();
            scores.save_tool_shed_score(total);
            self.phase = SessionPhase::Finished;
            log::debug!("tool shed session finished with {total}");
            return Ok(RoundAdvance::Finished { total });
        }

        let target = pick_target(catalog, &self.used, None, rng)?;
        self.round += 1;
        self.identification = Identification::new(target, self.config.max_attempts);
        self.phase = SessionPhase::Testing;
        Ok(RoundAdvance::NextRound(self.round))
    }

    /// Starts over from round one with a clean slate. Allowed in any phase.
    pub fn restart(&mut self, catalog: &Catalog, rng: &mut impl RandomSource) -> Result<()> {
        let used = BTreeSet::new();
        let target = pick_target(catalog, &used, self.forced.as_deref(), rng)?;
        self.round = 1;
        self.round_scores.clear();
        self.used = used;
        self.identification = Identification::new(target, self.config.max_attempts);
        self.phase = SessionPhase::Testing;
        Ok(())
    }

    fn record(&mut self, score: u32) {
        let id = self.identification.mineral().id.clone();
        log::debug!("round {} on {id} scored {score}", self.round);
        self.round_scores.push(score);
        self.used.insert(id);
        self.phase = SessionPhase::Result;
    }

    fn check_phase(&self, expected: SessionPhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase)
        }
    }
}

fn pick_target(
    catalog: &Catalog,
    used: &BTreeSet<String>,
    forced: Option<&str>,
    rng: &mut impl RandomSource,
) -> Result<Mineral> {
    if let Some(id) = forced {
        match catalog.get_by_id(id) {
            Some(mineral) => return Ok(mineral.clone()),
            None => log::warn!("Unknown practice mineral {id:?}, picking at random"),
        }
    }

    let fresh: Vec<&Mineral> = catalog
        .all()
        .iter()
        .filter(|mineral| !used.contains(&mineral.id))
        .collect();
    let pick = if fresh.is_empty() {
        log::warn!("Every mineral already used this session, repeating");
        choose(rng, catalog.all())
    } else {
        choose(rng, &fresh).copied()
    };
    pick.cloned().ok_or(GameError::EmptyCatalog)
}
