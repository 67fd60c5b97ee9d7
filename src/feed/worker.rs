//! Background page fetching
//!
//! The terminal gallery cannot block its event loop on the network, so page
//! requests run on a dedicated thread. The worker processes one job at a
//! time, which keeps the controller's single-in-flight ordering.
//!
//! Dropping the worker cancels it: the shared flag is raised, the job
//! channel closes and any result that finishes afterwards is discarded
//! instead of delivered.

use super::controller::{PendingFetch, Ticket};
use super::error::FeedError;
use crate::api::{FetchError, ImagePage, ImageSource};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;
use tracing::{debug, error};

/// Result of one background fetch
#[derive(Debug)]
pub struct FetchOutcome {
    /// Ticket the request was issued with
    pub ticket: Ticket,
    /// Fetched page or failure
    pub result: Result<ImagePage, FetchError>,
}

/// Runs page requests off the UI thread
pub struct FetchWorker {
    jobs: Option<Sender<PendingFetch>>,
    results: Receiver<FetchOutcome>,
    cancelled: Arc<AtomicBool>,
}

impl FetchWorker {
    /// Spawn a worker thread fetching from `source`
    ///
    /// # Errors
    ///
    /// Returns `FeedError::WorkerStopped` if the thread cannot be spawned.
    pub fn spawn<S>(source: S) -> Result<Self, FeedError>
    where
        S: ImageSource + 'static,
    {
        let (jobs_tx, jobs_rx) = mpsc::channel::<PendingFetch>();
        let (results_tx, results_rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        thread::Builder::new()
            .name("scatch-fetch".to_string())
            .spawn(move || {
                for pending in jobs_rx {
                    if flag.load(Ordering::Acquire) {
                        break;
                    }
                    let result = source.fetch_page(&pending.request);
                    if flag.load(Ordering::Acquire) {
                        debug!(page = pending.ticket.page(), "worker cancelled, dropping result");
                        break;
                    }
                    let outcome = FetchOutcome {
                        ticket: pending.ticket,
                        result,
                    };
                    if results_tx.send(outcome).is_err() {
                        break;
                    }
                }
                debug!("fetch worker exiting");
            })
            .map_err(|e| {
                error!(error = %e, "failed to spawn fetch worker");
                FeedError::WorkerStopped
            })?;

        Ok(Self {
            jobs: Some(jobs_tx),
            results: results_rx,
            cancelled,
        })
    }

    /// Queue a request
    ///
    /// # Errors
    ///
    /// Returns `FeedError::WorkerStopped` if the worker has been cancelled or
    /// its thread has exited.
    pub fn submit(&self, pending: PendingFetch) -> Result<(), FeedError> {
        if self.is_cancelled() {
            return Err(FeedError::WorkerStopped);
        }
        self.jobs
            .as_ref()
            .ok_or(FeedError::WorkerStopped)?
            .send(pending)
            .map_err(|_| FeedError::WorkerStopped)
    }

    /// Take a finished result without waiting
    #[must_use]
    pub fn try_recv(&self) -> Option<FetchOutcome> {
        match self.results.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for a finished result
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchOutcome> {
        match self.results.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stop accepting work and discard anything still running
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        self.jobs = None;
    }

    /// Whether the worker has been cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for FetchWorker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FeedQuery;
    use crate::feed::controller::ScrollController;
    use crate::testing::{ScriptedSource, page_of};

    #[test]
    fn test_worker_delivers_result() {
        let source = ScriptedSource::new(vec![Ok(page_of(5, 0, 1))]);
        let worker = FetchWorker::spawn(source).unwrap();

        let mut controller = ScrollController::new(FeedQuery::curated(), 0);
        let pending = controller.request_next().unwrap();
        worker.submit(pending).unwrap();

        let outcome = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        controller.complete(outcome.ticket, outcome.result);
        assert_eq!(controller.len(), 5);
    }

    #[test]
    fn test_cancelled_worker_rejects_jobs() {
        let source = ScriptedSource::new(vec![]);
        let mut worker = FetchWorker::spawn(source).unwrap();
        worker.cancel();

        let mut controller = ScrollController::new(FeedQuery::curated(), 0);
        let pending = controller.request_next().unwrap();
        assert!(matches!(worker.submit(pending), Err(FeedError::WorkerStopped)));
        assert!(worker.try_recv().is_none());
    }
}
