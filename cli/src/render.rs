use cubesweeper_core::{CellView, Coord, Coord3, GameEngine, GameEvent, MarkerColor, Outcome, ToNdIndex};
use ndarray::Array3;

const HIDDEN: char = '#';
const FLAG: char = 'F';
const EXPLODED: char = '*';
const MINE: char = 'x';

/// Terminal picture of the board, kept up to date from engine events only.
#[derive(Clone, Debug)]
pub struct BoardView {
    size: Coord,
    glyphs: Array3<char>,
    outcome: Option<Outcome>,
}

impl BoardView {
    pub fn new(size: Coord) -> Self {
        Self {
            size,
            glyphs: Array3::from_elem((size, size, size).to_nd_index(), HIDDEN),
            outcome: None,
        }
    }

    /// Builds the initial picture from the engine, later changes arrive as events.
    pub fn from_engine(engine: &GameEngine) -> Self {
        let mut view = Self::new(engine.size());
        for cell in engine.cell_views() {
            view.glyphs[cell.coords.to_nd_index()] = glyph(&cell);
        }
        view.outcome = engine.state().outcome();
        view
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::CellChanged(cell) => {
                self.glyphs[cell.coords.to_nd_index()] = glyph(cell);
            }
            GameEvent::GameOver { outcome } => self.outcome = Some(*outcome),
            GameEvent::BoardReset { size, .. } => *self = Self::new(*size),
        }
    }

    /// Shows mines the player never opened, for the end of a round.
    pub fn show_mines(&mut self, mines: &[Coord3]) {
        for &coords in mines {
            let glyph = &mut self.glyphs[coords.to_nd_index()];
            if *glyph != EXPLODED && *glyph != FLAG {
                *glyph = MINE;
            }
        }
    }

    /// One `y` by `z` slice per `x`, side by side.
    pub fn render(&self) -> String {
        let size = usize::from(self.size);
        let mut out = String::new();

        for x in 0..size {
            out.push_str(&format!("{:<width$}", format!("x={x}"), width = 2 * size + 2));
        }
        out.push('\n');

        for y in 0..size {
            for x in 0..size {
                for z in 0..size {
                    out.push(self.glyphs[[x, y, z]]);
                    out.push(' ');
                }
                out.push_str("  ");
            }
            out.push('\n');
        }
        out
    }
}

fn glyph(cell: &CellView) -> char {
    if let Some(mine) = cell.mine {
        return if mine {
            EXPLODED
        } else {
            count_glyph(cell.adjacent_mines.unwrap_or(0))
        };
    }
    if cell.flagged {
        return FLAG;
    }
    cell.marker.map(marker_glyph).unwrap_or(HIDDEN)
}

/// `.` for zero, then `1`-`9` and `a`-`q` up to 26.
fn count_glyph(count: u8) -> char {
    match count {
        0 => '.',
        count => char::from_digit(count.into(), 36).unwrap_or('?'),
    }
}

fn marker_glyph(color: MarkerColor) -> char {
    use MarkerColor::*;
    match color {
        Red => 'R',
        Orange => 'O',
        Yellow => 'Y',
        Green => 'G',
        Blue => 'B',
        Purple => 'P',
    }
}
