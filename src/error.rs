use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoTxError {
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to run `{program} {command}`: {source}")]
    Spawn {
        program: String,
        command: &'static str,
        source: std::io::Error,
    },

    #[error("unexpected output from `{command}`: {source}")]
    WalletOutput {
        command: &'static str,
        source: serde_json::Error,
    },

    #[error("account `{0}` not found in wallet balances")]
    AccountNotFound(String),

    #[error("config has no destination addresses")]
    NoAddresses,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
