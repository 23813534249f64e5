//! Bounding gateway calls by a timeout and a cancellation signal
//!
//! Every model request the core issues goes through [`guard`], so a caller is
//! never blocked past its deadline and can abandon a request it no longer
//! needs. Abandoning drops the in-flight future, which closes the underlying
//! HTTP request.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

/// Caller side of a cancellation signal
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation to every [`Cancellation`] cloned from this pair
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Observer side of a cancellation signal
#[derive(Debug, Clone)]
pub struct Cancellation {
    rx: watch::Receiver<bool>,
}

impl Cancellation {
    /// A signal that never fires
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is requested
    ///
    /// Never resolves if the handle is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Create a linked cancellation handle and observer
///
/// # Examples
///
/// ```
/// use saladoc_llm::cancellation;
///
/// let (handle, signal) = cancellation();
/// assert!(!signal.is_cancelled());
/// handle.cancel();
/// assert!(signal.is_cancelled());
/// ```
pub fn cancellation() -> (CancelHandle, Cancellation) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, Cancellation { rx })
}

/// How a guarded call ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The call finished with this output
    Completed(T),
    /// The deadline passed first
    TimedOut(Duration),
    /// Cancellation was requested first
    Cancelled,
}

/// Run `call` until it completes, `timeout` elapses, or `cancel` fires
///
/// Cancellation is checked first, so an already-cancelled signal never starts
/// the call's work.
pub async fn guard<F>(call: F, timeout: Duration, cancel: Option<&Cancellation>) -> Guarded<F::Output>
where
    F: Future,
{
    if cancel.is_some_and(Cancellation::is_cancelled) {
        return Guarded::Cancelled;
    }

    let cancelled = async {
        match cancel {
            Some(signal) => signal.cancelled().await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        biased;
        _ = cancelled => Guarded::Cancelled,
        result = tokio::time::timeout(timeout, call) => match result {
            Ok(output) => Guarded::Completed(output),
            Err(_) => Guarded::TimedOut(timeout),
        },
    }
}
