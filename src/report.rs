use std::time::Duration;
use tracing::info;

/// Outcome of a spam run.
#[derive(Clone, Debug, PartialEq)]
pub struct SpamReport {
    /// `sendfrom` invocations, successful or not.
    pub sent: u64,
    /// Invocations that exited with a non-zero status.
    pub failed: u64,
    pub elapsed: Duration,
}

impl SpamReport {
    /// Attempts per second of wall-clock time.
    pub fn tx_per_sec(&self) -> f64 {
        self.sent as f64 / self.elapsed.as_secs_f64()
    }

    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!("Time elapsed {:.2}s", self.elapsed.as_secs_f64()),
            format!("Send {:.2} tx per second", self.tx_per_sec()),
        ]
    }

    pub fn print(&self) {
        info!(sent = self.sent, failed = self.failed, "spam run finished");
        for line in self.summary_lines() {
            println!("{line}");
        }
    }
}
