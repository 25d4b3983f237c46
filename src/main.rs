mod args;
mod config;
mod error;
mod report;
mod spam_callback;
mod spammer;
#[cfg(test)]
mod test_utils;
mod wallet;

use args::SpamArgs;
use clap::Parser;
use config::AutoTxConfig;
use error::AutoTxError;
use rand::{SeedableRng, rngs::StdRng};
use report::SpamReport;
use spam_callback::{ConsoleCallback, OnTxSent};
use spammer::{SpamParams, TxSpammer};
use std::{
    io::Write,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wallet::{Hcashctl, WalletCli};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = SpamArgs::parse();
    let config_path = args.config_path();
    let config = AutoTxConfig::from_file(&config_path)?;
    info!(
        path = %config_path.display(),
        addresses = config.address.len(),
        account = %config.account,
        "loaded config"
    );

    let stop = Arc::new(AtomicBool::new(false));
    watch_interrupts(stop.clone());

    let report = run(
        &config,
        Hcashctl::new(args.wallet_cli()),
        &args,
        stop,
        Arc::new(ConsoleCallback),
        &mut std::io::stdout(),
    )
    .await?;
    report.print();

    Ok(())
}

/// Queries the balance, unlocks the wallet and runs the spam loop.
async fn run<W: WalletCli>(
    config: &AutoTxConfig,
    wallet: W,
    args: &SpamArgs,
    stop: Arc<AtomicBool>,
    callback: Arc<dyn OnTxSent>,
    out: &mut impl Write,
) -> Result<SpamReport, AutoTxError> {
    let balance = wallet.balances().await?.spendable(&config.account);
    match balance {
        Some(balance) => info!(account = %config.account, balance, "spendable balance"),
        None => warn!(account = %config.account, "account not listed in wallet balances"),
    }
    let params = SpamParams::from_config(config, balance)?
        .with_stop_on_failure(args.stop_on_failure)
        .with_check_balance(args.check_balance);

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut spammer = TxSpammer::new(wallet, params, rng)?.with_stop_flag(stop);

    spammer.wallet().unlock(&config.password).await?;
    writeln!(out, "unlocked")?;
    writeln!(out, "Tx count: {}", args.count)?;
    out.flush()?;

    Ok(spammer.spam(args.limit(), callback).await)
}

/// Raises `stop`. Returns `true` when it was already raised.
fn on_interrupt(stop: &AtomicBool) -> bool {
    stop.swap(true, Ordering::Relaxed)
}

/// First Ctrl-C stops the loop after the current transaction, the second
/// exits right away.
fn watch_interrupts(stop: Arc<AtomicBool>) {
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if on_interrupt(&stop) {
                warn!("interrupted again, exiting");
                std::process::exit(130);
            }
            info!("interrupted, finishing the current transaction (Ctrl-C again to exit)");
        }
    });
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")); // fallback if RUST_LOG is unset

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .init();
}
