use crate::{config::DEFAULT_CONFIG_PATH, spammer::TxLimit, wallet::DEFAULT_WALLET_CLI};
use clap::Parser;
use std::{path::PathBuf, str::FromStr};
use tracing::debug;

/// Send randomized test transactions through the wallet command-line tool.
#[derive(Debug, Parser)]
#[command(name = "autotx", version)]
pub struct SpamArgs {
    /// Number of transactions to send; 0 runs until interrupted.
    #[arg(default_value_t = 1000)]
    pub count: u64,

    /// Config file [env: AUTOTX_CONFIG, default: autotx.conf]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Wallet CLI program [env: AUTOTX_WALLET_CLI, default: hcashctl]
    #[arg(long)]
    pub wallet_cli: Option<String>,

    /// Seed for address and amount selection.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop at the first failed send.
    #[arg(long)]
    pub stop_on_failure: bool,

    /// Query the balance before each send and stop when it runs short.
    #[arg(long)]
    pub check_balance: bool,
}

impl SpamArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config.to_owned().unwrap_or_else(|| {
            read_var("AUTOTX_CONFIG", DEFAULT_CONFIG_PATH.to_owned()).into()
        })
    }

    pub fn wallet_cli(&self) -> String {
        self.wallet_cli
            .to_owned()
            .unwrap_or_else(|| read_var("AUTOTX_WALLET_CLI", DEFAULT_WALLET_CLI.to_owned()))
    }

    pub fn limit(&self) -> TxLimit {
        TxLimit::from_count(self.count)
    }
}

fn read_var<T: FromStr + std::fmt::Display + Clone>(varname: &str, default: T) -> T {
    std::env::var(varname)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or_else(|| {
            debug!("{varname} not set, defaulting to {default}");
            default
        })
}
