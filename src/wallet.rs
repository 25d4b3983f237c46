//! Wrapper around the wallet command-line tool.
//!
//! Every call spawns `<program> --wallet <method> <args...>` with the
//! arguments passed as an argument vector, so nothing goes through a shell.

use crate::{config::strip_newlines, error::AutoTxError};
use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

pub const DEFAULT_WALLET_CLI: &str = "hcashctl";

/// Output of `getbalance`. Fields other than `balances` are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BalanceReport {
    #[serde(default)]
    pub balances: Vec<AccountBalance>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AccountBalance {
    pub accountname: String,
    pub spendable: f64,
}

impl BalanceReport {
    /// Spendable funds of `account`, or `None` when the wallet doesn't list it.
    pub fn spendable(&self, account: &str) -> Option<f64> {
        self.balances
            .iter()
            .find(|balance| balance.accountname == account)
            .map(|balance| balance.spendable)
    }
}

/// The wallet operations the spammer needs.
pub trait WalletCli {
    /// Unlocks the wallet with no timeout. Returns the exit code.
    async fn unlock(&self, password: &str) -> Result<i32, AutoTxError>;

    async fn balances(&self) -> Result<BalanceReport, AutoTxError>;

    /// Sends `amount` from `account` to `address`. Returns the exit code.
    async fn send_from(
        &self,
        account: &str,
        address: &str,
        amount: f64,
        minconf: u32,
    ) -> Result<i32, AutoTxError>;
}

/// `hcashctl --wallet ...`
#[derive(Clone, Debug)]
pub struct Hcashctl {
    program: String,
    base_args: Vec<String>,
}

impl Hcashctl {
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_base_args(program, ["--wallet"])
    }

    /// Same as [`Hcashctl::new`] but replaces the leading `--wallet` flag.
    pub fn with_base_args<I, S>(program: impl Into<String>, base_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            base_args: base_args.into_iter().map(Into::into).collect(),
        }
    }

    fn command(&self, method: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args).arg(method);
        cmd
    }

    fn spawn_error(&self, command: &'static str) -> impl FnOnce(std::io::Error) -> AutoTxError {
        let program = self.program.to_owned();
        move |source| AutoTxError::Spawn {
            program,
            command,
            source,
        }
    }
}

impl WalletCli for Hcashctl {
    async fn unlock(&self, password: &str) -> Result<i32, AutoTxError> {
        let status = self
            .command("walletpassphrase")
            .args([password, "0"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(self.spawn_error("walletpassphrase"))?;
        let code = status.code().unwrap_or(-1);
        if code != 0 {
            warn!(code, "walletpassphrase exited with non-zero status");
        }
        Ok(code)
    }

    async fn balances(&self) -> Result<BalanceReport, AutoTxError> {
        let output = self
            .command("getbalance")
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(self.spawn_error("getbalance"))?;
        if !output.status.success() {
            warn!(status = %output.status, "getbalance exited with non-zero status");
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(%stdout, "getbalance output");
        serde_json::from_str(&strip_newlines(&stdout)).map_err(|source| {
            AutoTxError::WalletOutput {
                command: "getbalance",
                source,
            }
        })
    }

    async fn send_from(
        &self,
        account: &str,
        address: &str,
        amount: f64,
        minconf: u32,
    ) -> Result<i32, AutoTxError> {
        let amount = amount.to_string();
        let minconf = minconf.to_string();
        let status = self
            .command("sendfrom")
            .args([account, address, amount.as_str(), "0", minconf.as_str()])
            .status()
            .await
            .map_err(self.spawn_error("sendfrom"))?;
        Ok(status.code().unwrap_or(-1))
    }
}
