use std::{fs, path::Path};

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::DungeonError;

/// Which empty cells may seed a new corridor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CarveStart {
    /// No wall among the eight surrounding cells.
    #[default]
    AwayFromWalls,
    /// No room cell among the eight surrounding cells. Since rooms are always
    /// walled in, this ends up carving every reachable empty cell.
    AwayFromRooms,
}

/// How door candidates are clustered before one door per cluster is chosen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DoorGrouping {
    /// Neighbouring columns form one group, whatever their rows.
    #[default]
    ScanAxis,
    /// Candidates touching each other (8-connected) form one group.
    Connected,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: i32,
    pub height: i32,
    pub room_attempts: u32,
    /// Smallest room side, inclusive.
    pub min_room_size: i32,
    /// Largest room side, exclusive.
    pub max_room_size: i32,
    pub seed: Option<u64>,
    pub carve_start: CarveStart,
    pub door_grouping: DoorGrouping,
    /// Consecutive misses when picking a random corridor start before the
    /// generator picks directly among the remaining candidates.
    pub start_retry_limit: u32,
    pub verbose: bool,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            room_attempts: 20,
            min_room_size: 3,
            max_room_size: 6,
            seed: None,
            carve_start: CarveStart::default(),
            door_grouping: DoorGrouping::default(),
            start_retry_limit: 1000,
            verbose: false,
        }
    }
}

impl DungeonConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, DungeonError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DungeonError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DungeonError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), DungeonError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(DungeonError::NonPositiveDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(DungeonError::StageTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        self.validate_generator()
    }

    /// The checks that apply to a generator regardless of stage size.
    pub(crate) fn validate_generator(&self) -> Result<(), DungeonError> {
        if self.room_attempts == 0 {
            return Err(DungeonError::ZeroRoomAttempts);
        }
        if self.min_room_size < 1 || self.min_room_size >= self.max_room_size {
            return Err(DungeonError::InvalidRoomSize {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        if self.start_retry_limit == 0 {
            return Err(DungeonError::ZeroRetryLimit);
        }
        Ok(())
    }
}
