/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Serialize;
use std::path::PathBuf;

/***************************************/
/*               Errors                */
/***************************************/

/// Invalid or unreadable configuration. Fatal, raised before any tick runs.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("floor count must be at least 2, got {0}")]
    TooFewFloors(u8),

    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("failed to read configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Reason a floor request was turned away by the request gate.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("car is already at that floor")]
    AlreadyAtFloor,

    #[error("car is travelling between floors")]
    InTransit,

    #[error("doors are closing")]
    DoorsClosing,

    #[error("no such floor")]
    FloorOutOfRange,
}

/// Acknowledgement for an admitted floor request.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    pub floor: u8,
}
