use core::ops::Index;
use ndarray::{Array3, Zip};
use rand::Rng;

use crate::*;

/// Fails unless `mines` leaves at least one safe cell out of `cells`.
pub(crate) fn check_mine_count(mines: CellCount, cells: CellCount) -> Result<()> {
    if mines < cells {
        Ok(())
    } else {
        Err(GameError::InvalidMineCount { mines, cells })
    }
}

/// Cubic grid of cells, addressed by `(x, y, z)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array3<Cell>,
    size: Coord,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    /// Empty board, every cell safe and hidden.
    pub fn new(size: Coord) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize);
        }
        Ok(Self {
            cells: Array3::default((size, size, size).to_nd_index()),
            size,
            mine_count: 0,
            revealed_count: 0,
            flagged_count: 0,
        })
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn bounds(&self) -> Coord3 {
        (self.size, self.size, self.size)
    }

    pub fn total_cells(&self) -> CellCount {
        cube(self.size)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn validate_coords(&self, coords: Coord3) -> Result<Coord3> {
        if in_bounds(coords, self.bounds()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                coords,
                size: self.size,
            })
        }
    }

    pub fn get(&self, coords: Coord3) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    /// Every cell with its coordinates, `x` outermost and `z` innermost.
    pub fn all_cells(&self) -> impl Iterator<Item = (Coord3, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y, z), cell)| ((x as Coord, y as Coord, z as Coord), cell))
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Coord3> + '_ {
        self.all_cells()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
    }

    /// The 26-neighborhood of `coords`, clipped to the board.
    pub fn neighbors(&self, coords: Coord3) -> Neighbors {
        neighbors(coords, self.bounds(), 1)
    }

    /// Recounts mines around `coords` from scratch, the center itself is never counted.
    pub fn count_adjacent_mines(&self, coords: Coord3) -> u8 {
        let count = self
            .cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_mine())
            .count();
        // at most 26 neighbors
        count as u8
    }

    /// Places `mine_count` mines uniformly at random, discarding any previous layout and
    /// all player progress.
    pub fn seed<R: Rng + ?Sized>(&mut self, mine_count: CellCount, rng: &mut R) -> Result<()> {
        let total_cells = self.total_cells();
        check_mine_count(mine_count, total_cells)?;

        let picks = rand::seq::index::sample(rng, total_cells as usize, mine_count as usize);
        let mut mine_mask: Array3<bool> = Array3::default(self.cells.raw_dim());
        let edge = usize::from(self.size);
        for index in picks {
            mine_mask[[index / (edge * edge), index / edge % edge, index % edge]] = true;
        }

        self.apply_mine_mask(&mine_mask, mine_count);
        log::debug!("Seeded {} mines on a board of size {}", mine_count, self.size);
        Ok(())
    }

    /// Places mines exactly at `mine_coords`, duplicates collapse into one mine.
    pub fn place_mines(&mut self, mine_coords: &[Coord3]) -> Result<()> {
        let mut mine_mask: Array3<bool> = Array3::default(self.cells.raw_dim());

        for &coords in mine_coords {
            let coords = self.validate_coords(coords)?;
            mine_mask[coords.to_nd_index()] = true;
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        check_mine_count(mine_count, self.total_cells())?;

        self.apply_mine_mask(&mine_mask, mine_count);
        log::debug!("Placed {} fixed mines on a board of size {}", mine_count, self.size);
        Ok(())
    }

    fn apply_mine_mask(&mut self, mine_mask: &Array3<bool>, mine_count: CellCount) {
        Zip::from(&mut self.cells)
            .and(mine_mask)
            .for_each(|cell, &is_mine| {
                cell.clear_progress();
                cell.mine = is_mine;
            });
        self.mine_count = mine_count;
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.recount_adjacent();
    }

    fn recount_adjacent(&mut self) {
        let counts = Array3::from_shape_fn(self.cells.raw_dim(), |(x, y, z)| {
            self.count_adjacent_mines((x as Coord, y as Coord, z as Coord))
        });
        Zip::from(&mut self.cells)
            .and(&counts)
            .for_each(|cell, &count| {
                cell.adjacent_mines = if cell.mine { 0 } else { count };
            });
    }

    /// Marks a hidden, unflagged cell as revealed. Coordinates must already be validated.
    pub(crate) fn reveal(&mut self, coords: Coord3) -> bool {
        let revealed = self.cells[coords.to_nd_index()].reveal();
        if revealed {
            self.revealed_count += 1;
        }
        revealed
    }

    pub(crate) fn toggle_flag(&mut self, coords: Coord3) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.toggle_flag() {
            return false;
        }
        if cell.is_flagged() {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        true
    }

    pub(crate) fn set_marker(&mut self, coords: Coord3, marker: Option<MarkerColor>) -> bool {
        self.cells[coords.to_nd_index()].set_marker(marker)
    }
}

impl Index<Coord3> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord3) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
