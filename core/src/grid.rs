use alloc::vec::Vec;
use core::num::Saturating;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: Coord,
    pub col: Coord,
    revealed: bool,
    mineral: Option<Mineral>,
    empty: bool,
    animating: bool,
}

impl GridCell {
    fn new((row, col): Coord2, mineral: Option<Mineral>) -> Self {
        Self {
            row,
            col,
            revealed: false,
            mineral,
            empty: false,
            animating: false,
        }
    }

    pub fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Revealed and nothing was there.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// The buried mineral. Present before reveal too, callers must not leak it to the player.
    pub fn mineral(&self) -> Option<&Mineral> {
        self.mineral.as_ref()
    }

    /// The mineral, only once the cell is dug.
    pub fn visible_mineral(&self) -> Option<&Mineral> {
        self.mineral.as_ref().filter(|_| self.revealed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    /// Already dug, or the battery is flat.
    NoChange,
    Empty,
    Found,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Square dig site with a battery budget. Minerals are placed once at generation and never move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiningGrid {
    cells: Array2<GridCell>,
    battery: CellCount,
    max_battery: CellCount,
    revealed_count: Saturating<CellCount>,
}

impl MiningGrid {
    /// Each cell independently holds a mineral with probability `config.mineral_density`, drawn
    /// uniformly from `pool`.
    pub fn generate(
        config: &GameConfig,
        pool: &[&Mineral],
        battery: CellCount,
        rng: &mut impl RandomSource,
    ) -> Self {
        if pool.is_empty() {
            log::warn!("Empty mineral pool, generating a barren grid");
        }
        let size = config.grid_size;
        let mut cells = Vec::with_capacity(mult(size, size).into());
        for coords in iter_coords(size) {
            let mineral = if rng.chance(config.mineral_density) {
                choose(rng, pool).map(|&mineral| mineral.clone())
            } else {
                None
            };
            cells.push(GridCell::new(coords, mineral));
        }
        let shape = (usize::from(size), usize::from(size));
        let cells = Array2::from_shape_vec(shape, cells)
            .expect("cell count matches grid shape");
        log::debug!(
            "generated {}x{} grid with {} minerals",
            size,
            size,
            cells.iter().filter(|cell| cell.mineral.is_some()).count()
        );
        Self::from_cells(cells, battery)
    }

    /// Builds a grid from explicit placements, `(row, col, mineral)`.
    pub fn from_placements(
        size: Coord,
        placements: &[(Coord2, Mineral)],
        battery: CellCount,
    ) -> Result<Self> {
        let shape = (usize::from(size), usize::from(size));
        let mut cells = Array2::from_shape_fn(shape, |(row, col)| {
            GridCell::new((row as Coord, col as Coord), None)
        });
        for (coords, mineral) in placements {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            cells[coords.to_nd_index()].mineral = Some(mineral.clone());
        }
        Ok(Self::from_cells(cells, battery))
    }

    fn from_cells(cells: Array2<GridCell>, battery: CellCount) -> Self {
        Self {
            cells,
            battery,
            max_battery: battery,
            revealed_count: Saturating(0),
        }
    }

    pub fn size(&self) -> Coord {
        self.cells.dim().0 as Coord
    }

    pub fn battery(&self) -> CellCount {
        self.battery
    }

    pub fn max_battery(&self) -> CellCount {
        self.max_battery
    }

    pub fn is_depleted(&self) -> bool {
        self.battery == 0
    }

    /// At most a quarter of the budget left, but not yet flat.
    pub fn is_battery_low(&self) -> bool {
        self.battery > 0 && u32::from(self.battery) * 4 <= u32::from(self.max_battery)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> &GridCell {
        &self.cells[coords.to_nd_index()]
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = &GridCell>> {
        self.cells.rows().into_iter().map(|row| row.into_iter())
    }

    /// Digs one cell, spending one charge whenever something changes.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.battery == 0 || self.cells[coords.to_nd_index()].revealed {
            return Ok(RevealOutcome::NoChange);
        }

        self.battery -= 1;
        self.revealed_count += Saturating(1);
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.revealed = true;
        Ok(if cell.mineral.is_some() {
            cell.animating = true;
            RevealOutcome::Found
        } else {
            cell.empty = true;
            RevealOutcome::Empty
        })
    }

    pub fn finish_animation(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        Ok(core::mem::take(&mut cell.animating))
    }
}

impl Index<Coord2> for MiningGrid {
    type Output = GridCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        self.cell_at(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::mineral;
    use alloc::vec;

    fn small_grid(battery: CellCount) -> MiningGrid {
        MiningGrid::from_placements(3, &[((1, 1), mineral("gold", "Native Gold", 90))], battery)
            .unwrap()
    }

    #[test]
    fn reveal_empty_cell_marks_empty_and_spends_charge() {
        let mut grid = small_grid(5);

        assert_eq!(grid.reveal((0, 0)).unwrap(), RevealOutcome::Empty);
        assert!(grid[(0, 0)].is_revealed());
        assert!(grid[(0, 0)].is_empty());
        assert_eq!(grid.battery(), 4);
        assert_eq!(grid.revealed_count(), 1);
    }

    #[test]
    fn reveal_mineral_cell_keeps_mineral() {
        let mut grid = small_grid(5);

        assert_eq!(grid.reveal((1, 1)).unwrap(), RevealOutcome::Found);
        let cell = &grid[(1, 1)];
        assert!(cell.is_revealed());
        assert!(!cell.is_empty());
        assert!(cell.is_animating());
        assert_eq!(cell.visible_mineral().unwrap().id, "gold");
        assert_eq!(grid.battery(), 4);

        assert!(grid.finish_animation((1, 1)).unwrap());
        assert!(!grid[(1, 1)].is_animating());
    }

    #[test]
    fn repeated_reveal_is_free() {
        let mut grid = small_grid(5);

        grid.reveal((2, 2)).unwrap();
        assert_eq!(grid.reveal((2, 2)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(grid.battery(), 4);
    }

    #[test]
    fn flat_battery_blocks_reveals() {
        let mut grid = small_grid(1);

        grid.reveal((0, 0)).unwrap();
        assert!(grid.is_depleted());
        let before = grid.clone();

        assert_eq!(grid.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(grid, before);
        assert_eq!(grid.battery(), 0);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut grid = small_grid(5);
        assert_eq!(grid.reveal((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(grid.battery(), 5);
        assert!(MiningGrid::from_placements(2, &[((2, 2), mineral("a", "A", 1))], 5).is_err());
    }

    #[test]
    fn hidden_minerals_are_not_visible() {
        let grid = small_grid(5);
        assert!(grid[(1, 1)].mineral().is_some());
        assert!(grid[(1, 1)].visible_mineral().is_none());
    }

    #[test]
    fn low_battery_threshold() {
        let mut grid = MiningGrid::from_placements(8, &[], 20).unwrap();
        for col in 0..8 {
            grid.reveal((0, col)).unwrap();
            grid.reveal((1, col)).unwrap();
        }
        assert_eq!(grid.battery(), 4);
        assert!(grid.is_battery_low());
    }

    #[test]
    fn generate_uses_scripted_placements() {
        let config = GameConfig::default();
        let a = mineral("a", "A", 1);
        let b = mineral("b", "B", 2);
        let pool = [&a, &b];
        let mut chances = vec![false; 64];
        chances[0] = true;
        chances[9] = true;
        let mut rng = ScriptedRandom::new(chances, [1, 0]);

        let grid = MiningGrid::generate(&config, &pool, 30, &mut rng);

        assert_eq!(grid.size(), 8);
        assert_eq!(grid.battery(), 30);
        assert_eq!(grid[(0, 0)].mineral().unwrap().id, "b");
        assert_eq!(grid[(1, 1)].mineral().unwrap().id, "a");
        assert_eq!(grid.cells().filter(|cell| cell.mineral().is_some()).count(), 2);
        assert!(grid.cells().all(|cell| !cell.is_revealed()));
    }

    #[test]
    fn nan_density_generates_a_barren_grid() {
        let config = GameConfig::new_unchecked(8, f64::NAN, 3, 10);
        let a = mineral("a", "A", 1);
        let mut rng = seeded_rng(8);

        let grid = MiningGrid::generate(&config, &[&a], 30, &mut rng);

        assert!(grid.cells().all(|cell| cell.mineral().is_none()));
    }

    #[test]
    fn generate_with_empty_pool_is_barren() {
        let config = GameConfig::default();
        let mut rng = seeded_rng(3);
        let grid = MiningGrid::generate(&config, &[], 30, &mut rng);
        assert!(grid.cells().all(|cell| cell.mineral().is_none()));
    }
}
