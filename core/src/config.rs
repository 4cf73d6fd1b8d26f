use serde::{Deserialize, Serialize};

use crate::*;

pub const DEFAULT_SIZE: Coord = 6;
pub const DEFAULT_MINES: CellCount = 35;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Edge length of the cubic board.
    pub size: Coord,
    pub mines: CellCount,
    /// Fixes the mine layout, and the layouts of every later reset.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Checked constructor, an invalid mine count is an error and is never clamped.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self {
            size,
            mines,
            seed: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        cube(self.size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GameError::InvalidSize);
        }
        check_mine_count(self.mines, self.total_cells())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            mines: DEFAULT_MINES,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = GameConfig::default();

        assert_eq!(config.total_cells(), 216);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn new_rejects_instead_of_clamping() {
        assert_eq!(
            GameConfig::new(6, 216),
            Err(GameError::InvalidMineCount {
                mines: 216,
                cells: 216
            })
        );
        assert_eq!(GameConfig::new(0, 0), Err(GameError::InvalidSize));
        assert!(GameConfig::new(6, 215).is_ok());
        assert!(GameConfig::new(6, 0).is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"mines": 20, "seed": 9}"#).unwrap();

        assert_eq!(config, GameConfig::new(6, 20).unwrap().with_seed(9));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<GameConfig>(r#"{"width": 4}"#).is_err());
    }
}
