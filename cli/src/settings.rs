use anyhow::{Context, Result};
use cubesweeper_core::{CellCount, Coord, GameConfig};
use std::fs;
use std::path::Path;

/// Values given on the command line, they win over the config file.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub size: Option<Coord>,
    pub mines: Option<CellCount>,
    pub seed: Option<u64>,
}

pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<GameConfig> {
    let base = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            parse(&text).with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    resolve(base, overrides)
}

fn parse(text: &str) -> Result<GameConfig> {
    Ok(toml::from_str(text)?)
}

fn resolve(base: GameConfig, overrides: Overrides) -> Result<GameConfig> {
    let config = GameConfig {
        size: overrides.size.unwrap_or(base.size),
        mines: overrides.mines.unwrap_or(base.mines),
        seed: overrides.seed.or(base.seed),
    };
    config.validate().context("invalid game configuration")?;
    log::debug!("Using {:?}", config);
    Ok(config)
}
