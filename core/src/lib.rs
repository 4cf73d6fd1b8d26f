//! Game engine for Minesweeper played on a cubic grid.
//!
//! [`GameEngine`] owns a [`Board`] of [`Cell`]s, applies [`Intent`]s to it and queues
//! [`GameEvent`]s for whatever renders the game.

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod engine;
mod error;
mod event;
mod types;

/// Outcome of flagging or marking a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    /// Not allowed in the current cell or game state.
    Rejected,
    /// Allowed, but the cell already looked like that.
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }

    pub const fn is_rejected(self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// Outcome of revealing one or more cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    Rejected,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            Rejected => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    pub const fn is_rejected(self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// Used to merge outcomes of a chord reveal.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            // hitting a mine has priority
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (Rejected, Rejected) => Rejected,
        }
    }
}
