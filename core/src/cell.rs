use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cosmetic annotation a player can put on any cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl MarkerColor {
    pub const ALL: [MarkerColor; 6] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
    ];

    pub const fn name(self) -> &'static str {
        use MarkerColor::*;
        match self {
            Red => "red",
            Orange => "orange",
            Yellow => "yellow",
            Green => "green",
            Blue => "blue",
            Purple => "purple",
        }
    }

    /// Keyboard shortcut mapping, `'1'` is red through `'6'` purple.
    pub fn from_key(key: char) -> Option<Self> {
        let index = key.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(usize::try_from(index).ok()?).copied()
    }
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MarkerColor {
    type Err = UnknownMarkerColor;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(key), None) = (chars.next(), chars.next()) {
            if let Some(color) = Self::from_key(key) {
                return Ok(color);
            }
        }

        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMarkerColor(s.into()))
    }
}

/// Per-position state owned by the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) marker: Option<MarkerColor>,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Mines in the 26-neighborhood, only meaningful for safe cells of a seeded board.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn marker(&self) -> Option<MarkerColor> {
        self.marker
    }

    /// Whether a reveal would currently be accepted.
    pub const fn can_reveal(&self) -> bool {
        !self.revealed && !self.flagged
    }

    /// Drops everything a player did to this cell, keeping the mine layout.
    pub(crate) fn clear_progress(&mut self) {
        self.revealed = false;
        self.flagged = false;
        self.marker = None;
    }

    pub(crate) fn reveal(&mut self) -> bool {
        if self.can_reveal() {
            self.revealed = true;
            true
        } else {
            false
        }
    }

    pub(crate) fn toggle_flag(&mut self) -> bool {
        if self.revealed {
            false
        } else {
            self.flagged = !self.flagged;
            true
        }
    }

    pub(crate) fn set_marker(&mut self, marker: Option<MarkerColor>) -> bool {
        let changed = self.marker != marker;
        self.marker = marker;
        changed
    }
}

/// What a renderer is allowed to know about a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub coords: Coord3,
    pub revealed: bool,
    pub flagged: bool,
    /// Only set for revealed safe cells.
    pub adjacent_mines: Option<u8>,
    /// Only set for revealed cells.
    pub mine: Option<bool>,
    pub marker: Option<MarkerColor>,
}

impl CellView {
    pub fn new(coords: Coord3, cell: &Cell) -> Self {
        let revealed = cell.is_revealed();
        Self {
            coords,
            revealed,
            flagged: cell.is_flagged(),
            adjacent_mines: (revealed && !cell.is_mine()).then_some(cell.adjacent_mines()),
            mine: revealed.then_some(cell.is_mine()),
            marker: cell.marker(),
        }
    }

    pub const fn is_exploded(&self) -> bool {
        matches!(self.mine, Some(true))
    }
}
