use serde::{Deserialize, Serialize};

use crate::*;

/// User action addressed to the engine, see [`GameEngine::apply`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    Reveal {
        at: Coord3,
    },
    ChordReveal {
        at: Coord3,
    },
    ToggleFlag {
        at: Coord3,
    },
    SetMarker {
        at: Coord3,
        color: MarkerColor,
    },
    ClearMarker {
        at: Coord3,
    },
    /// Keeps the current mine count when `mines` is absent.
    Reset {
        #[serde(default)]
        mines: Option<CellCount>,
    },
}

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Won,
    Lost,
}

/// Notification for the renderer, queued in emission order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    CellChanged(CellView),
    GameOver { outcome: Outcome },
    /// Every cell went back to hidden, redraw the whole board.
    BoardReset { size: Coord, mines: CellCount },
}
