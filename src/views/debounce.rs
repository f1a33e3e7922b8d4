//! Search-input debouncing.
//!
//! Raw keystrokes go in through [`Debouncer::push`]. Once input has been
//! quiet for the configured interval, the latest value is committed
//! (trimmed, lowercased) on the output channel. Each new keystroke restarts
//! the quiet interval.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet interval for the bookings search box.
pub const BOOKINGS_SEARCH_QUIET: Duration = Duration::from_millis(500);

/// Quiet interval for the payments search box.
pub const PAYMENTS_SEARCH_QUIET: Duration = Duration::from_millis(400);

/// Committed form of a search box value.
pub fn normalize_search(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Debug)]
pub struct Debouncer {
    input: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl Debouncer {
    /// Start the timer task. Committed values arrive on the returned receiver.
    pub fn spawn(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input, raw) = mpsc::unbounded_channel();
        let (committed_tx, committed_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(quiet, raw, committed_tx));
        (Self { input, task }, committed_rx)
    }

    pub fn push(&self, raw: impl Into<String>) {
        // The task only stops once this handle is dropped
        let _ = self.input.send(raw.into());
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(quiet: Duration, mut raw: mpsc::UnboundedReceiver<String>, committed: mpsc::UnboundedSender<String>) {
    while let Some(mut pending) = raw.recv().await {
        loop {
            tokio::select! {
                next = raw.recv() => match next {
                    Some(value) => pending = value,
                    None => return,
                },
                _ = tokio::time::sleep(quiet) => break,
            }
        }

        if committed.send(normalize_search(&pending)).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn burst_commits_once() {
        let (debouncer, mut committed) = Debouncer::spawn(BOOKINGS_SEARCH_QUIET);

        debouncer.push("AB");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.push("ABC ");

        assert_eq!(committed.recv().await.as_deref(), Some("abc"));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(committed.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_commits_before_quiet_interval() {
        let (debouncer, mut committed) = Debouncer::spawn(PAYMENTS_SEARCH_QUIET);

        debouncer.push("pay");
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(committed.try_recv().is_err());

        debouncer.push("pay-1");
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(committed.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(committed.try_recv().ok().as_deref(), Some("pay-1"));
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_commit_separately() {
        let (debouncer, mut committed) = Debouncer::spawn(BOOKINGS_SEARCH_QUIET);

        debouncer.push("ada");
        assert_eq!(committed.recv().await.as_deref(), Some("ada"));

        debouncer.push("  ");
        assert_eq!(committed.recv().await.as_deref(), Some(""));
    }
}
