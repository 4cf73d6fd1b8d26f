use cubesweeper_core::*;
use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};

fn brute_force_count(board: &Board, coords: Coord3) -> u8 {
    let mut count = 0;
    for (pos, cell) in board.all_cells() {
        let near = pos.0.abs_diff(coords.0) <= 1
            && pos.1.abs_diff(coords.1) <= 1
            && pos.2.abs_diff(coords.2) <= 1;
        if near && pos != coords && cell.is_mine() {
            count += 1;
        }
    }
    count
}

fn coords(size: Coord) -> impl Strategy<Value = Coord3> {
    (0..size, 0..size, 0..size)
}

fn intent(size: Coord) -> impl Strategy<Value = Intent> {
    prop_oneof![
        4 => coords(size).prop_map(|at| Intent::Reveal { at }),
        1 => coords(size).prop_map(|at| Intent::ChordReveal { at }),
        2 => coords(size).prop_map(|at| Intent::ToggleFlag { at }),
        1 => (coords(size), 0..MarkerColor::ALL.len())
            .prop_map(|(at, i)| Intent::SetMarker { at, color: MarkerColor::ALL[i] }),
        1 => coords(size).prop_map(|at| Intent::ClearMarker { at }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn seeded_boards_have_exact_mines_and_counts(
        size in 1u8..8,
        fraction in 0.0f64..1.0,
        seed in any::<u64>(),
    ) {
        let cells = cube(size);
        let mines = ((f64::from(cells - 1)) * fraction) as CellCount;
        let mut board = Board::new(size).unwrap();

        board.seed(mines, &mut SmallRng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(board.mine_positions().count() as CellCount, mines);
        for (pos, cell) in board.all_cells() {
            if !cell.is_mine() {
                prop_assert_eq!(cell.adjacent_mines(), brute_force_count(&board, pos));
            }
        }
    }

    #[test]
    fn same_seed_gives_same_layout(seed in any::<u64>(), mines in 0u32..100) {
        let config = GameConfig::new(6, mines).unwrap().with_seed(seed);

        let a = GameEngine::new(config).unwrap();
        let b = GameEngine::new(config).unwrap();

        prop_assert_eq!(a.board(), b.board());
    }

    #[test]
    fn reset_with_same_seed_repeats_layout(
        seed in any::<u64>(),
        layout_seed in any::<u64>(),
        mines in 1u32..60,
    ) {
        let mut engine = GameEngine::new(GameConfig::default().with_seed(seed)).unwrap();

        engine.reset_seeded(Some(mines), layout_seed).unwrap();
        let first: Vec<_> = engine.board().mine_positions().collect();
        engine.reset(None).unwrap();
        engine.reset_seeded(Some(mines), layout_seed).unwrap();
        let second: Vec<_> = engine.board().mine_positions().collect();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn empty_board_is_won_by_any_reveal(size in 1u8..8, at in (0u8..8, 0u8..8, 0u8..8)) {
        let at = (at.0 % size, at.1 % size, at.2 % size);
        let mut engine = GameEngine::new(GameConfig::new(size, 0).unwrap()).unwrap();

        prop_assert_eq!(engine.reveal(at).unwrap(), RevealOutcome::Won);
        prop_assert_eq!(engine.board().revealed_count(), cube(size));
    }

    #[test]
    fn random_play_keeps_invariants(
        seed in any::<u64>(),
        mines in 1u32..60,
        intents in prop::collection::vec(intent(6), 1..80),
    ) {
        let mut engine = GameEngine::new(GameConfig::new(6, mines).unwrap().with_seed(seed)).unwrap();

        for intent in intents {
            let before = engine.board().clone();
            let was_finished = engine.is_finished();

            let outcome = engine.apply(intent).unwrap();
            let events: Vec<_> = engine.drain_events().collect();

            if was_finished {
                prop_assert!(outcome.is_rejected());
            }
            if outcome.is_rejected() {
                prop_assert_eq!(engine.board(), &before);
                prop_assert!(events.is_empty());
            }

            let board = engine.board();
            let revealed_mine = board.mine_positions().any(|pos| board[pos].is_revealed());
            prop_assert_eq!(revealed_mine, engine.state() == EngineState::Lost);
            prop_assert_eq!(
                engine.state() == EngineState::Won,
                board.revealed_count() == board.safe_cell_count() && !revealed_mine
            );
            prop_assert!(board.all_cells().all(|(_, cell)| !(cell.is_flagged() && cell.is_revealed())));

            let game_overs = events
                .iter()
                .filter(|event| matches!(event, GameEvent::GameOver { .. }))
                .count();
            prop_assert_eq!(game_overs, usize::from(!was_finished && engine.is_finished()));
        }
    }
}
