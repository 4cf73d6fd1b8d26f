use anyhow::Result;
use cubesweeper_core::{GameEngine, Intent, Outcome};
use serde_json::json;
use std::io::{BufRead, Write};

use crate::command::{self, Command, HELP};
use crate::render::BoardView;

/// Interactive loop: text commands in, board pictures out.
pub fn run_text(engine: &mut GameEngine, input: impl BufRead, mut output: impl Write) -> Result<()> {
    let mut view = BoardView::from_engine(engine);
    writeln!(output, "{}", HELP)?;
    draw(engine, &view, &mut output)?;

    for line in input.lines() {
        let line = line?;
        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Intent(intent) => match engine.apply(intent) {
                Ok(outcome) if outcome.is_rejected() => {
                    writeln!(output, "Nothing to do there")?;
                }
                Ok(_) => {
                    for event in engine.drain_events() {
                        view.apply(&event);
                    }
                    if let Some(mines) = engine.mine_positions() {
                        view.show_mines(&mines);
                    }
                    draw(engine, &view, &mut output)?;
                }
                Err(err) => writeln!(output, "{err}")?,
            },
            Command::Show => draw(engine, &view, &mut output)?,
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Quit => break,
        }
    }
    Ok(())
}

fn draw(engine: &GameEngine, view: &BoardView, output: &mut impl Write) -> Result<()> {
    write!(output, "{}", view.render())?;
    let status = match view.outcome() {
        None => format!("mines left: {}", engine.mines_left()),
        Some(Outcome::Won) => "You won! Type \"reset\" for another round.".to_string(),
        Some(Outcome::Lost) => "Boom, you lost. Type \"reset\" for another round.".to_string(),
    };
    writeln!(output, "{status}")?;
    Ok(())
}

/// Machine loop: one JSON intent per input line, one JSON event per output line.
pub fn run_json(engine: &mut GameEngine, input: impl BufRead, mut output: impl Write) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let result = serde_json::from_str::<Intent>(&line)
            .map_err(anyhow::Error::from)
            .and_then(|intent| Ok(engine.apply(intent)?));
        match result {
            Ok(outcome) => {
                log::trace!("Applied intent with outcome {:?}", outcome);
                for event in engine.drain_events() {
                    serde_json::to_writer(&mut output, &event)?;
                    writeln!(output)?;
                }
            }
            Err(err) => {
                serde_json::to_writer(&mut output, &json!({ "error": err.to_string() }))?;
                writeln!(output)?;
            }
        }
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn json_lines(output: &[u8]) -> Vec<Value> {
        std::str::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn json_session_streams_events() {
        let mut engine = GameEngine::with_mines(2, &[(0, 0, 0)]).unwrap();
        let input = concat!(
            r#"{"intent": "toggle_flag", "at": [0, 0, 0]}"#,
            "\n\n",
            r#"{"intent": "reveal", "at": [0, 0, 0]}"#,
            "\n",
            r#"{"intent": "reveal", "at": [1, 1, 1]}"#,
            "\n",
        );
        let mut output = Vec::new();

        run_json(&mut engine, input.as_bytes(), &mut output).unwrap();

        let lines = json_lines(&output);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["coords"], json!([0, 0, 0]));
        assert_eq!(lines[0]["flagged"], true);
        assert_eq!(lines[1]["coords"], json!([1, 1, 1]));
        assert_eq!(lines[1]["adjacent_mines"], 1);
    }

    #[test]
    fn json_session_reports_errors_and_continues() {
        let mut engine = GameEngine::with_mines(2, &[(0, 0, 0)]).unwrap();
        let input = "not json\n{\"intent\": \"reveal\", \"at\": [5, 0, 0]}\n{\"intent\": \"reveal\", \"at\": [0, 0, 0]}\n";
        let mut output = Vec::new();

        run_json(&mut engine, input.as_bytes(), &mut output).unwrap();

        let lines = json_lines(&output);
        assert_eq!(lines.len(), 4);
        assert!(lines[0]["error"].is_string());
        assert!(lines[1]["error"].as_str().unwrap().contains("outside"));
        assert_eq!(lines[3], json!({"event": "game_over", "outcome": "lost"}));
    }

    #[test]
    fn text_session_draws_and_quits() {
        let mut engine = GameEngine::with_mines(2, &[(0, 0, 0)]).unwrap();
        let input = "flag 0 0 0\nreveal 0 0 0\nbogus\nquit\nreveal 1 1 1\n";
        let mut output = Vec::new();

        run_text(&mut engine, input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("mines left: 0"));
        assert!(text.contains("Nothing to do there"));
        assert!(text.contains("Unknown command \"bogus\""));
        assert!(!engine.board()[(1, 1, 1)].is_revealed());
    }
}
