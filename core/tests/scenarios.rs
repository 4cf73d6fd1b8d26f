use cubesweeper_core::*;
use serde_json::json;

fn cell_changes(events: &[GameEvent]) -> Vec<CellView> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::CellChanged(view) => Some(*view),
            _ => None,
        })
        .collect()
}

#[test]
fn zero_mines_reveal_corner_wins() {
    let mut engine = GameEngine::new(GameConfig::new(6, 0).unwrap()).unwrap();

    let outcome = engine.apply(Intent::Reveal { at: (0, 0, 0) }).unwrap();

    assert_eq!(outcome, IntentOutcome::Reveal(RevealOutcome::Won));
    assert_eq!(engine.state(), EngineState::Won);
    assert!(engine.cell_views().all(|view| view.revealed));
    assert_eq!(engine.cell_views().count(), 216);

    let events: Vec<_> = engine.drain_events().collect();
    assert_eq!(cell_changes(&events).len(), 216);
    assert!(cell_changes(&events).iter().all(|view| view.adjacent_mines == Some(0)));
}

#[test]
fn forced_mine_reveal_loses() {
    let mut engine = GameEngine::with_mines(6, &[(3, 3, 3)]).unwrap();

    engine.apply(Intent::Reveal { at: (3, 3, 3) }).unwrap();

    assert_eq!(engine.state(), EngineState::Lost);
    let events: Vec<_> = engine.drain_events().collect();
    let changes = cell_changes(&events);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].coords, (3, 3, 3));
    assert_eq!(changes[0].mine, Some(true));
    assert_eq!(
        engine.cell_views().filter(|view| view.revealed).count(),
        1
    );
}

#[test]
fn flag_then_reveal_is_rejected() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(1)).unwrap();

    engine.apply(Intent::ToggleFlag { at: (1, 1, 1) }).unwrap();
    let outcome = engine.apply(Intent::Reveal { at: (1, 1, 1) }).unwrap();

    assert!(outcome.is_rejected());
    let view = engine.cell_view((1, 1, 1)).unwrap();
    assert!(view.flagged);
    assert!(!view.revealed);
}

#[test]
fn random_mine_reveal_on_default_board_opens_only_that_cell() {
    let mut engine = GameEngine::new(GameConfig::new(6, 35).unwrap().with_seed(2024)).unwrap();
    let mine = engine.board().mine_positions().next().unwrap();

    assert_eq!(engine.reveal(mine).unwrap(), RevealOutcome::HitMine);
    assert_eq!(engine.board().revealed_count(), 1);
    assert_eq!(engine.mine_positions().map(|mines| mines.len()), Some(35));
}

#[test]
fn full_round_emits_expected_json_stream() {
    let mut engine = GameEngine::with_mines(2, &[(0, 0, 0)]).unwrap();

    engine.set_marker((0, 0, 0), MarkerColor::Red).unwrap();
    engine.reveal((1, 1, 1)).unwrap();
    let stream: Vec<_> = engine
        .drain_events()
        .map(|event| serde_json::to_value(event).unwrap())
        .collect();

    assert_eq!(
        stream,
        vec![
            json!({
                "event": "cell_changed",
                "coords": [0, 0, 0],
                "revealed": false,
                "flagged": false,
                "adjacent_mines": null,
                "mine": null,
                "marker": "red",
            }),
            json!({
                "event": "cell_changed",
                "coords": [1, 1, 1],
                "revealed": true,
                "flagged": false,
                "adjacent_mines": 1,
                "mine": false,
                "marker": null,
            }),
        ]
    );
}

#[test]
fn won_is_reached_only_with_all_safe_cells() {
    let mines = [(0, 0, 0), (2, 2, 2)];
    let mut engine = GameEngine::with_mines(3, &mines).unwrap();
    let safe: Vec<_> = engine
        .board()
        .all_cells()
        .filter(|(_, cell)| !cell.is_mine())
        .map(|(coords, _)| coords)
        .collect();

    for coords in safe {
        if engine.is_finished() {
            break;
        }
        engine.reveal(coords).unwrap();
    }

    assert_eq!(engine.state(), EngineState::Won);
    assert_eq!(engine.board().revealed_count(), 27 - 2);
}

#[test]
fn configuration_errors_are_reported() {
    let error = GameEngine::new(GameConfig {
        size: 6,
        mines: 300,
        seed: None,
    })
    .unwrap_err();

    assert!(error.is_configuration_error());
    assert!(!GameError::OutOfBounds {
        coords: (9, 9, 9),
        size: 6
    }
    .is_configuration_error());
    assert!(GameEngine::with_mines(1, &[(0, 0, 0)]).is_err());
}
