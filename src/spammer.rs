use crate::{
    config::AutoTxConfig, error::AutoTxError, report::SpamReport, spam_callback::OnTxSent,
    wallet::WalletCli,
};
use rand::{Rng, rngs::StdRng};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};
use tracing::{info, warn};

/// Added to every random amount so no transaction sends zero.
pub const AMOUNT_OFFSET: f64 = 0.1;

/// Divides the account balance when no explicit `maxtxamount` is configured.
pub const BALANCE_DIVISOR: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxLimit {
    Count(u64),
    /// Runs until the stop flag is raised.
    Unbounded,
}

impl TxLimit {
    /// `0` means unbounded.
    pub fn from_count(count: u64) -> Self {
        match count {
            0 => Self::Unbounded,
            n => Self::Count(n),
        }
    }

    fn reached(&self, sent: u64) -> bool {
        match self {
            Self::Count(n) => sent >= *n,
            Self::Unbounded => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TxRequest {
    pub index: u64,
    pub address: String,
    pub amount: f64,
}

#[derive(Clone, Debug)]
pub struct SpamParams {
    pub account: String,
    pub addresses: Vec<String>,
    /// Exclusive upper bound of the random part of an amount.
    pub amount_ceiling: f64,
    pub minconf: u32,
    pub stop_on_failure: bool,
    pub check_balance: bool,
}

impl SpamParams {
    /// `balance` is the account's spendable amount, consulted only when
    /// `maxtxamount` is non-positive.
    pub fn from_config(config: &AutoTxConfig, balance: Option<f64>) -> Result<Self, AutoTxError> {
        let amount_ceiling = if config.maxtxamount > 0.0 {
            config.maxtxamount
        } else {
            let balance =
                balance.ok_or_else(|| AutoTxError::AccountNotFound(config.account.to_owned()))?;
            balance / BALANCE_DIVISOR
        };
        Ok(Self {
            account: config.account.to_owned(),
            addresses: config.address.to_owned(),
            amount_ceiling,
            minconf: config.minconf,
            stop_on_failure: false,
            check_balance: false,
        })
    }

    /// Stop at the first non-zero `sendfrom` exit code.
    pub fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Re-query the balance before every send and stop once it runs short.
    pub fn with_check_balance(mut self, check: bool) -> Self {
        self.check_balance = check;
        self
    }
}

pub struct TxSpammer<W> {
    wallet: W,
    params: SpamParams,
    rng: StdRng,
    stop: Arc<AtomicBool>,
}

impl<W: WalletCli> TxSpammer<W> {
    pub fn new(wallet: W, params: SpamParams, rng: StdRng) -> Result<Self, AutoTxError> {
        if params.addresses.is_empty() {
            return Err(AutoTxError::NoAddresses);
        }
        Ok(Self {
            wallet,
            params,
            rng,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Replaces the stop flag. Raising it ends [`TxSpammer::spam`] after
    /// the in-flight transaction.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Picks a random destination and amount.
    pub fn next_tx(&mut self, index: u64) -> TxRequest {
        let address = self.params.addresses[self.rng.gen_range(0..self.params.addresses.len())]
            .to_owned();
        let ceiling = self.params.amount_ceiling;
        let amount = if ceiling > 0.0 {
            self.rng.gen_range(0.0..ceiling)
        } else {
            0.0
        };
        TxRequest {
            index,
            address,
            amount: amount + AMOUNT_OFFSET,
        }
    }

    /// Runs one `sendfrom` for `tx` and reports it to `callback`. A wallet
    /// CLI that can't be started counts as exit code `-1`.
    pub async fn send_tx(&self, tx: &TxRequest, callback: &dyn OnTxSent) -> i32 {
        let code = self
            .wallet
            .send_from(
                &self.params.account,
                &tx.address,
                tx.amount,
                self.params.minconf,
            )
            .await
            .unwrap_or_else(|err| {
                warn!(index = tx.index, %err, "sendfrom did not run");
                -1
            });
        callback.on_tx_sent(tx, code);
        code
    }

    async fn has_funds(&self, amount: f64) -> Result<bool, AutoTxError> {
        let spendable = self.wallet.balances().await?.spendable(&self.params.account);
        Ok(spendable.is_some_and(|spendable| spendable >= amount))
    }

    /// Never fails: wallet errors end up in [`SpamReport::failed`] or stop
    /// the loop, and the totals collected so far are still returned.
    pub async fn spam(&mut self, limit: TxLimit, callback: Arc<dyn OnTxSent>) -> SpamReport {
        let mut sent = 0;
        let mut failed = 0;
        let start = Instant::now();

        while !limit.reached(sent) && !self.stop.load(Ordering::Relaxed) {
            let tx = self.next_tx(sent);
            if self.params.check_balance {
                match self.has_funds(tx.amount).await {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("No spendable money in your wallet.");
                        break;
                    }
                    Err(err) => {
                        warn!(%err, "balance check failed, stopping");
                        break;
                    }
                }
            }

            let code = self.send_tx(&tx, callback.as_ref()).await;
            sent += 1;
            if code != 0 {
                failed += 1;
                if self.params.stop_on_failure {
                    warn!(index = tx.index, code, "sendfrom failed, stopping");
                    break;
                }
            }
        }

        if self.stop.load(Ordering::Relaxed) {
            info!(sent, "stopped by request");
        }

        SpamReport {
            sent,
            failed,
            elapsed: start.elapsed(),
        }
    }
}
