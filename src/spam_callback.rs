use crate::spammer::TxRequest;
use tracing::debug;

/// Hook invoked after every `sendfrom` returns.
pub trait OnTxSent {
    fn on_tx_sent(&self, tx: &TxRequest, exit_code: i32);
}

/// Prints one line per transaction attempt.
pub struct ConsoleCallback;

impl ConsoleCallback {
    pub fn format_line(tx: &TxRequest) -> String {
        format!("[{}] send to {} amount: {}", tx.index, tx.address, tx.amount)
    }
}

impl OnTxSent for ConsoleCallback {
    fn on_tx_sent(&self, tx: &TxRequest, exit_code: i32) {
        println!("{}", Self::format_line(tx));
        if exit_code != 0 {
            debug!(index = tx.index, exit_code, "sendfrom failed");
        }
    }
}
