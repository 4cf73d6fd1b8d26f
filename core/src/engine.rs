use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::iter;

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
/// - any -> InProgress, through a reset
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    InProgress,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::InProgress => None,
            Self::Won => Some(Outcome::Won),
            Self::Lost => Some(Outcome::Lost),
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Result of [`GameEngine::apply`], one variant per kind of intent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentOutcome {
    Reveal(RevealOutcome),
    Mark(MarkOutcome),
    Reset,
}

impl IntentOutcome {
    pub const fn is_rejected(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.is_rejected(),
            Self::Mark(outcome) => outcome.is_rejected(),
            Self::Reset => false,
        }
    }
}

/// Runs one game round after another on a single board.
///
/// Every operation runs to completion before returning, including whole flood-fill cascades.
/// Changes are queued as [`GameEvent`]s until [`GameEngine::drain_events`] is called.
#[derive(Clone, Debug)]
pub struct GameEngine {
    board: Board,
    state: EngineState,
    triggered_mine: Option<Coord3>,
    seed: Option<u64>,
    seeds: SmallRng,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// New round with a random layout, reproducible when the config carries a seed.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());

        let mut board = Board::new(config.size)?;
        board.seed(config.mines, &mut SmallRng::seed_from_u64(seed))?;
        log::debug!("New game {:?} with layout seed {}", config, seed);

        Ok(Self::from_board(board, Some(seed), SmallRng::seed_from_u64(seed)))
    }

    /// New round with mines exactly at `mine_coords`. Later resets are random again.
    pub fn with_mines(size: Coord, mine_coords: &[Coord3]) -> Result<Self> {
        let mut board = Board::new(size)?;
        board.place_mines(mine_coords)?;
        log::debug!("New game of size {} with {} fixed mines", size, board.mine_count());

        Ok(Self::from_board(board, None, SmallRng::from_rng(&mut rand::rng())))
    }

    fn from_board(board: Board, seed: Option<u64>, seeds: SmallRng) -> Self {
        Self {
            board,
            state: Default::default(),
            triggered_mine: None,
            seed,
            seeds,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Full board including hidden mines. Renderers should go through
    /// [`GameEngine::cell_views`] and events instead.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    /// Mines minus flags, negative once the player placed more flags than there are mines.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.board.mine_count()) - i64::from(self.board.flagged_count())
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord3> {
        self.triggered_mine
    }

    /// Seed of the current layout, `None` for a layout placed by hand.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// The whole layout, only available once the round is over.
    pub fn mine_positions(&self) -> Option<Vec<Coord3>> {
        self.is_finished()
            .then(|| self.board.mine_positions().collect())
    }

    pub fn cell_view(&self, coords: Coord3) -> Result<CellView> {
        Ok(CellView::new(coords, self.board.get(coords)?))
    }

    pub fn cell_views(&self) -> impl Iterator<Item = CellView> + '_ {
        self.board
            .all_cells()
            .map(|(coords, cell)| CellView::new(coords, cell))
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hands queued events over to the renderer, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Single entry point for user actions.
    pub fn apply(&mut self, intent: Intent) -> Result<IntentOutcome> {
        use Intent::*;

        Ok(match intent {
            Reveal { at } => IntentOutcome::Reveal(self.reveal(at)?),
            ChordReveal { at } => IntentOutcome::Reveal(self.chord_reveal(at)?),
            ToggleFlag { at } => IntentOutcome::Mark(self.toggle_flag(at)?),
            SetMarker { at, color } => IntentOutcome::Mark(self.set_marker(at, color)?),
            ClearMarker { at } => IntentOutcome::Mark(self.clear_marker(at)?),
            Reset { mines } => {
                self.reset(mines)?;
                IntentOutcome::Reset
            }
        })
    }

    pub fn reveal(&mut self, coords: Coord3) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() {
            log::trace!("Ignored reveal at {:?}, game is over", coords);
            return Ok(RevealOutcome::Rejected);
        }
        Ok(self.reveal_cell(coords))
    }

    /// Reveals `coords` and its whole 26-neighborhood, skipping flagged cells.
    ///
    /// Cells are processed center first, then in neighborhood order. Processing stops as
    /// soon as the round is over, so a mine later in the batch never goes off after a win.
    pub fn chord_reveal(&mut self, coords: Coord3) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() {
            log::trace!("Ignored chord reveal at {:?}, game is over", coords);
            return Ok(RevealOutcome::Rejected);
        }

        let mut outcome = RevealOutcome::Rejected;
        for target in iter::once(coords).chain(self.board.neighbors(coords)) {
            if self.state.is_finished() {
                break;
            }
            outcome = outcome | self.reveal_cell(target);
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord3) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() || !self.board.toggle_flag(coords) {
            log::trace!("Ignored flag toggle at {:?}", coords);
            return Ok(MarkOutcome::Rejected);
        }
        self.emit_cell(coords);
        Ok(MarkOutcome::Changed)
    }

    pub fn set_marker(&mut self, coords: Coord3, color: MarkerColor) -> Result<MarkOutcome> {
        self.update_marker(coords, Some(color))
    }

    pub fn clear_marker(&mut self, coords: Coord3) -> Result<MarkOutcome> {
        self.update_marker(coords, None)
    }

    fn update_marker(&mut self, coords: Coord3, marker: Option<MarkerColor>) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() {
            log::trace!("Ignored marker change at {:?}, game is over", coords);
            return Ok(MarkOutcome::Rejected);
        }
        if !self.board.set_marker(coords, marker) {
            return Ok(MarkOutcome::NoChange);
        }
        self.emit_cell(coords);
        Ok(MarkOutcome::Changed)
    }

    /// Starts a new round on a fresh random layout, keeping the mine count unless given.
    pub fn reset(&mut self, mines: Option<CellCount>) -> Result<()> {
        let seed = self.seeds.random();
        self.reset_seeded(mines, seed)
    }

    /// Like [`GameEngine::reset`], the same seed and mine count always give the same layout.
    ///
    /// An invalid mine count leaves the current round untouched.
    pub fn reset_seeded(&mut self, mines: Option<CellCount>, seed: u64) -> Result<()> {
        let mines = mines.unwrap_or(self.board.mine_count());
        self.board.seed(mines, &mut SmallRng::seed_from_u64(seed))?;

        self.state = EngineState::InProgress;
        self.triggered_mine = None;
        self.seed = Some(seed);
        self.events.push(GameEvent::BoardReset {
            size: self.board.size(),
            mines,
        });
        log::debug!("Reset board with {} mines, layout seed {}", mines, seed);
        Ok(())
    }

    /// Reveals a single cell and cascades from it, the game must be in progress.
    fn reveal_cell(&mut self, coords: Coord3) -> RevealOutcome {
        if !self.board.reveal(coords) {
            log::trace!("Ignored reveal at {:?}, cell is flagged or open", coords);
            return RevealOutcome::Rejected;
        }
        self.emit_cell(coords);

        let cell = self.board[coords];
        if cell.is_mine() {
            log::debug!("Mine hit at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.finish(Outcome::Lost);
            return RevealOutcome::HitMine;
        }

        log::debug!("Revealed {:?}, adjacent mines: {}", coords, cell.adjacent_mines());
        if cell.adjacent_mines() == 0 {
            self.cascade(coords);
        }

        if self.board.revealed_count() == self.board.safe_cell_count() {
            self.finish(Outcome::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Flood-fills outwards from a revealed zero cell.
    ///
    /// Every cell enters the worklist at most once since it is revealed before being queued.
    fn cascade(&mut self, origin: Coord3) {
        let mut to_visit = VecDeque::from([origin]);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.board.neighbors(visit_coords) {
                let cell = self.board[pos];
                // mines are never opened by a cascade
                if cell.is_mine() || !self.board.reveal(pos) {
                    continue;
                }
                self.emit_cell(pos);
                log::trace!(
                    "Flood opened {:?} from {:?}, adjacent mines: {}",
                    pos,
                    visit_coords,
                    cell.adjacent_mines()
                );

                if cell.adjacent_mines() == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        if self.state.is_finished() {
            return;
        }
        self.state = match outcome {
            Outcome::Won => EngineState::Won,
            Outcome::Lost => EngineState::Lost,
        };
        self.events.push(GameEvent::GameOver { outcome });
        log::debug!(
            "Game over: {:?} with {} of {} safe cells revealed",
            outcome,
            self.board.revealed_count(),
            self.board.safe_cell_count()
        );
    }

    fn emit_cell(&mut self, coords: Coord3) {
        let view = CellView::new(coords, &self.board[coords]);
        self.events.push(GameEvent::CellChanged(view));
    }
}
