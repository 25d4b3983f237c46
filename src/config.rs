use crate::error::AutoTxError;
use serde::Deserialize;
use std::{fs, path::Path};

pub const DEFAULT_CONFIG_PATH: &str = "autotx.conf";

/// Contents of `autotx.conf`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AutoTxConfig {
    /// Wallet passphrase handed to `walletpassphrase`.
    pub password: String,
    /// Destination addresses; one is picked at random per transaction.
    pub address: Vec<String>,
    /// Upper bound for a random amount. Non-positive means "derive from balance".
    pub maxtxamount: f64,
    pub minconf: u32,
    /// Wallet account the funds are sent from.
    pub account: String,
}

impl AutoTxConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AutoTxError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| AutoTxError::ReadConfig {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| AutoTxError::ParseConfig {
            path: path.to_owned(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(&strip_newlines(raw))
    }
}

/// Drops every `\n`. The wallet CLI and hand-edited config files both
/// pretty-print across lines.
pub fn strip_newlines(raw: &str) -> String {
    raw.replace('\n', "")
}
