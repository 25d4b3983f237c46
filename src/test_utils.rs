//! Wallet and callback doubles shared by the unit tests.

use crate::{
    error::AutoTxError,
    spam_callback::OnTxSent,
    spammer::TxRequest,
    wallet::{AccountBalance, BalanceReport, WalletCli},
};
use std::{
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

#[derive(Clone, Debug, PartialEq)]
pub struct Sent {
    pub account: String,
    pub address: String,
    pub amount: f64,
    pub minconf: u32,
}

/// Records every call; the listed account is always `x`.
#[derive(Default)]
pub struct MockWallet {
    pub spendable: Option<f64>,
    pub exit_code: i32,
    /// 1-based send numbers that fail to spawn.
    pub spawn_failures: Vec<usize>,
    /// Raises the flag once this many sends went through.
    pub stop_after: Option<(usize, Arc<AtomicBool>)>,
    pub calls: Mutex<Vec<&'static str>>,
    pub passwords: Mutex<Vec<String>>,
    pub sent: Mutex<Vec<Sent>>,
    pub balance_queries: Mutex<u64>,
}

impl MockWallet {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl WalletCli for MockWallet {
    async fn unlock(&self, password: &str) -> Result<i32, AutoTxError> {
        self.calls.lock().unwrap().push("walletpassphrase");
        self.passwords.lock().unwrap().push(password.to_owned());
        Ok(0)
    }

    async fn balances(&self) -> Result<BalanceReport, AutoTxError> {
        self.calls.lock().unwrap().push("getbalance");
        *self.balance_queries.lock().unwrap() += 1;
        Ok(BalanceReport {
            balances: self
                .spendable
                .map(|spendable| AccountBalance {
                    accountname: "x".to_owned(),
                    spendable,
                })
                .into_iter()
                .collect(),
        })
    }

    async fn send_from(
        &self,
        account: &str,
        address: &str,
        amount: f64,
        minconf: u32,
    ) -> Result<i32, AutoTxError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push("sendfrom");
        let attempt = calls.iter().filter(|call| **call == "sendfrom").count();
        if self.spawn_failures.contains(&attempt) {
            return Err(AutoTxError::Spawn {
                program: "hcashctl".to_owned(),
                command: "sendfrom",
                source: io::Error::from(io::ErrorKind::WouldBlock),
            });
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(Sent {
            account: account.to_owned(),
            address: address.to_owned(),
            amount,
            minconf,
        });
        if let Some((n, stop)) = &self.stop_after {
            if sent.len() >= *n {
                stop.store(true, Ordering::Relaxed);
            }
        }
        Ok(self.exit_code)
    }
}

#[derive(Default)]
pub struct RecordingCallback {
    pub seen: Mutex<Vec<(TxRequest, i32)>>,
}

impl OnTxSent for RecordingCallback {
    fn on_tx_sent(&self, tx: &TxRequest, exit_code: i32) {
        self.seen.lock().unwrap().push((tx.clone(), exit_code));
    }
}
