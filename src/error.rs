use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring a stage or a generator.
///
/// Generation itself never fails: rejected rooms, exhausted start points and
/// missing door candidates are all ordinary outcomes.
#[derive(Error, Debug)]
pub enum DungeonError {
    #[error("stage dimensions must be positive, got {width}x{height}")]
    NonPositiveDimension { width: i32, height: i32 },

    #[error("stage {width}x{height} has too many cells")]
    StageTooLarge { width: i32, height: i32 },

    #[error("room attempt count must be positive")]
    ZeroRoomAttempts,

    #[error("room size range {min}..{max} is empty or starts at zero")]
    InvalidRoomSize { min: i32, max: i32 },

    #[error("start retry limit must be positive")]
    ZeroRetryLimit,

    #[error("unknown tile code {0}")]
    UnknownTile(u8),

    #[error("could not read config '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
