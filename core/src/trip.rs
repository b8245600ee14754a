use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripPhase {
    Mining,
    /// Battery flat or the player headed back; the haul is being sold.
    Payout,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TripEvent {
    AnimationDone(Coord2),
    /// Close the prompt of the find dug at these coordinates, once it is resolved.
    DismissResolved(Coord2),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingFind {
    pub coords: Coord2,
    pub identification: Identification,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DigOutcome {
    pub reveal: RevealOutcome,
    /// This dig spent the last charge.
    pub depleted: bool,
}

/// One expedition of Shop mode: dig, identify what turns up, then sell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiningTrip {
    location: Location,
    config: GameConfig,
    grid: MiningGrid,
    phase: TripPhase,
    pending: Option<PendingFind>,
    inventory: Vec<InventoryItem>,
    dig_count: CellCount,
    schedule: Schedule<TripEvent>,
}

impl MiningTrip {
    pub fn start(
        catalog: &Catalog,
        location_id: &str,
        config: &GameConfig,
        rng: &mut impl RandomSource,
    ) -> Result<Self> {
        let location = catalog
            .location(location_id)
            .ok_or_else(|| GameError::UnknownLocation(location_id.into()))?;
        let pool = catalog.get_by_location(location_id);
        let grid = MiningGrid::generate(config, &pool, location.starting_battery(), rng);
        log::debug!("trip started at {} ({})", location.id, location.difficulty);
        Ok(Self::with_grid(location.clone(), *config, grid))
    }

    /// Trip over a prepared grid.
    pub fn with_grid(location: Location, config: GameConfig, grid: MiningGrid) -> Self {
        Self {
            location,
            config,
            grid,
            phase: TripPhase::Mining,
            pending: None,
            inventory: Vec::new(),
            dig_count: 0,
            schedule: Schedule::default(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn grid(&self) -> &MiningGrid {
        &self.grid
    }

    pub fn phase(&self) -> TripPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, TripPhase::Payout)
    }

    pub fn pending(&self) -> Option<&PendingFind> {
        self.pending.as_ref()
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn dig_count(&self) -> CellCount {
        self.dig_count
    }

    pub fn battery(&self) -> CellCount {
        self.grid.battery()
    }

    pub fn max_battery(&self) -> CellCount {
        self.grid.max_battery()
    }

    pub fn is_battery_low(&self) -> bool {
        self.grid.is_battery_low()
    }

    pub fn inventory_value(&self) -> u32 {
        inventory_value(&self.inventory)
    }

    /// Coins earned so far; final once the trip is in payout with nothing pending.
    pub fn payout(&self) -> u32 {
        self.inventory_value()
    }

    /// Nothing left to dig or name: the haul goes to the shop counter.
    pub fn at_counter(&self) -> bool {
        self.is_finished() && self.pending.is_none()
    }

    pub fn receipt(&self) -> Receipt {
        Receipt::new(&self.inventory)
    }

    /// Delayed events waiting to be fed back through [`MiningTrip::handle`].
    pub fn take_scheduled(&mut self) -> Vec<Delayed<TripEvent>> {
        self.schedule.drain()
    }

    pub fn dig(&mut self, coords: Coord2) -> Result<DigOutcome> {
        self.check_mining()?;
        if self.pending.as_ref().is_some_and(|find| !find.identification.is_resolved()) {
            return Err(GameError::IdentificationPending);
        }

        let reveal = self.grid.reveal(coords)?;
        if !reveal.has_update() {
            return Ok(DigOutcome {
                reveal,
                depleted: false,
            });
        }
        self.dig_count = self.dig_count.saturating_add(1);

        if let RevealOutcome::Found = reveal {
            if let Some(mineral) = self.grid.cell_at(coords).mineral() {
                log::debug!("found {} at {:?}", mineral.id, coords);
                self.pending = Some(PendingFind {
                    coords,
                    identification: Identification::new(
                        mineral.clone(),
                        self.config.max_attempts,
                    ),
                });
            }
            self.schedule
                .push(FOUND_ANIMATION_MS, TripEvent::AnimationDone(coords));
        }

        let depleted = self.grid.is_depleted();
        if depleted {
            log::debug!("battery depleted after {} digs", self.dig_count);
            self.phase = TripPhase::Payout;
        }
        Ok(DigOutcome { reveal, depleted })
    }

    pub fn reveal_tool(&mut self, tool: Tool) -> Result<bool> {
        self.pending_identification()?.reveal_tool(tool)
    }

    pub fn guess(&mut self, guess: &str, rng: &mut impl RandomSource) -> Result<GuessOutcome> {
        let find = self.pending.as_mut().ok_or(GameError::NothingPending)?;
        let outcome = find.identification.guess(guess, rng)?;
        if let Some(item) = find.identification.identified_item() {
            self.inventory.push(item);
            self.schedule
                .push(CORRECT_DISMISS_MS, TripEvent::DismissResolved(find.coords));
        }
        Ok(outcome)
    }

    /// Bags the pending find without a name, at any point before it is resolved.
    pub fn collect_unidentified(&mut self) -> Result<()> {
        let item = self.pending_identification()?.collect()?;
        self.inventory.push(item);
        self.pending = None;
        Ok(())
    }

    pub fn leave(&mut self) -> Result<()> {
        self.pending_identification()?.leave()?;
        self.pending = None;
        Ok(())
    }

    /// Heads back to the shop early. Idempotent.
    pub fn end_trip(&mut self) {
        if !self.is_finished() {
            log::debug!("trip ended with {} charges left", self.grid.battery());
            self.phase = TripPhase::Payout;
        }
    }

    pub fn handle(&mut self, event: TripEvent) -> bool {
        match event {
            TripEvent::AnimationDone(coords) => self.grid.finish_animation(coords).unwrap_or(false),
            TripEvent::DismissResolved(coords) => {
                let dismissable = self.pending.as_ref().is_some_and(|find| {
                    find.coords == coords && find.identification.is_resolved()
                });
                if dismissable {
                    self.pending = None;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn pending_identification(&mut self) -> Result<&mut Identification> {
        self.pending
            .as_mut()
            .map(|find| &mut find.identification)
            .ok_or(GameError::NothingPending)
    }

    fn check_mining(&self) -> Result<()> {
        if self.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
