use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Timed status lines shown while a generation is in flight.
///
/// Each step waits its delay (relative to the previous step) before publishing its message. One
/// task consumes the whole list, so finishing the operation cancels every pending update at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingSequence {
    steps: Vec<(Duration, String)>,
}

impl Default for LoadingSequence {
    fn default() -> Self {
        Self::new([
            (Duration::ZERO, "Analyzing your startup idea..."),
            (Duration::from_secs(3), "Researching the market opportunity..."),
            (Duration::from_secs(5), "Structuring your pitch deck..."),
            (Duration::from_secs(8), "Writing slide content..."),
            (Duration::from_secs(12), "Polishing the final slides..."),
        ])
    }
}

impl LoadingSequence {
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = (Duration, S)>,
        S: Into<String>,
    {
        Self {
            steps: steps
                .into_iter()
                .map(|(delay, message)| (delay, message.into()))
                .collect(),
        }
    }

    pub fn steps(&self) -> &[(Duration, String)] {
        &self.steps
    }

    pub fn start(self) -> LoadingTicker {
        let (tx, message) = watch::channel(None);
        let task = tokio::spawn(async move {
            for (delay, step) in self.steps {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if tx.send(Some(step)).is_err() {
                    break;
                }
            }
        });
        LoadingTicker { message, task }
    }

    /// Drives `fut` to completion, handing each step's message to `on_message` as it comes due.
    ///
    /// Steps still pending when `fut` resolves are never delivered.
    pub async fn track<F, M>(self, fut: F, mut on_message: M) -> F::Output
    where
        F: Future,
        M: FnMut(&str),
    {
        let ticker = self.start();
        let mut rx = ticker.subscribe();
        tokio::pin!(fut);

        loop {
            tokio::select! {
                biased;
                output = &mut fut => {
                    ticker.finish();
                    return output;
                }
                changed = rx.changed() => {
                    if changed.is_err() {
                        // Every step delivered; nothing left to interleave.
                        return fut.await;
                    }
                    if let Some(message) = rx.borrow_and_update().as_deref() {
                        on_message(message);
                    }
                }
            }
        }
    }
}

/// Running [`LoadingSequence`]. Dropping it cancels the remaining steps.
pub struct LoadingTicker {
    message: watch::Receiver<Option<String>>,
    task: JoinHandle<()>,
}

impl LoadingTicker {
    pub fn current(&self) -> Option<String> {
        self.message.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.message.clone()
    }

    pub fn finish(self) {
        self.task.abort();
    }
}

impl Drop for LoadingTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
