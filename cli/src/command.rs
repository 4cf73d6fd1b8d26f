use cubesweeper_core::{CellCount, Coord, Coord3, Intent, MarkerColor, UnknownMarkerColor};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  reveal|r X Y Z        open a cell
  chord|c X Y Z         open a cell and its whole neighborhood
  flag|f X Y Z          toggle a flag
  mark|m X Y Z COLOR    put a colored marker (red, orange, yellow, green, blue, purple or 1-6)
  unmark|u X Y Z        remove a marker
  reset [MINES]         start a new round
  show                  draw the board again
  help                  this text
  quit                  leave";

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Intent(Intent),
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command {0:?}, try \"help\"")]
    Unknown(String),
    #[error("Missing {0}")]
    Missing(&'static str),
    #[error("Invalid number {0:?}")]
    InvalidNumber(String),
    #[error("Unexpected trailing input {0:?}")]
    Trailing(String),
    #[error(transparent)]
    Marker(#[from] UnknownMarkerColor),
}

/// Parses one input line, `Ok(None)` for blank lines.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "reveal" | "r" => Command::Intent(Intent::Reveal {
            at: coords(&mut words)?,
        }),
        "chord" | "c" => Command::Intent(Intent::ChordReveal {
            at: coords(&mut words)?,
        }),
        "flag" | "f" => Command::Intent(Intent::ToggleFlag {
            at: coords(&mut words)?,
        }),
        "mark" | "m" => {
            let at = coords(&mut words)?;
            let color: MarkerColor = words.next().ok_or(CommandError::Missing("color"))?.parse()?;
            Command::Intent(Intent::SetMarker { at, color })
        }
        "unmark" | "u" => Command::Intent(Intent::ClearMarker {
            at: coords(&mut words)?,
        }),
        "reset" => Command::Intent(Intent::Reset {
            mines: words.next().map(number::<CellCount>).transpose()?,
        }),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.into())),
    };

    let rest: Vec<_> = words.collect();
    if !rest.is_empty() {
        return Err(CommandError::Trailing(rest.join(" ")));
    }
    Ok(Some(command))
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord3, CommandError> {
    let mut axis = |name| {
        words
            .next()
            .ok_or(CommandError::Missing(name))
            .and_then(number::<Coord>)
    };
    Ok((axis("x")?, axis("y")?, axis("z")?))
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.into()))
}
