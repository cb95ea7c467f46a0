use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Ошибки плагина и панели
#[derive(Debug, Error)]
pub enum EmonitorError {
    #[error("illegal token {0}")]
    IllegalToken(String),

    #[error("unknown var {0}")]
    UnknownVar(String),

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    #[error("ExternalCommand is not set")]
    MissingCommand,

    #[error("unknown plugin type {0}")]
    UnknownPluginType(String),

    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to run external program {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read output of {command:?}: {source}")]
    ReadOutput {
        command: String,
        #[source]
        source: io::Error,
    },
}
