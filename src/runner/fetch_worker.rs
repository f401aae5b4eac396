use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use futures::executor::block_on;
use futures::future::BoxFuture;
use tracing::{debug, trace};

use crate::app::{FetchRequest, VirtualList};
use crate::data::DataSource;
use crate::errors::FetchError;

pub type FetchFuture<R> = BoxFuture<'static, Result<Vec<R>, FetchError>>;

struct FetchJob<R> {
    request: FetchRequest,
    future: FetchFuture<R>,
}

/// A finished fetch on its way back to the event loop.
pub struct FetchDone<R> {
    pub request: FetchRequest,
    pub result: Result<Vec<R>, FetchError>,
}

/// Background thread that drives data source futures to completion.
///
/// Jobs run one at a time in submission order; the event loop never blocks
/// on a fetch and feeds results back through
/// [`VirtualList::complete_fetch`].
pub struct FetchWorker<R> {
    jobs: Option<Sender<FetchJob<R>>>,
    done: Receiver<FetchDone<R>>,
    handle: Option<JoinHandle<()>>,
}

impl<R: Send + 'static> FetchWorker<R> {
    pub fn spawn() -> io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<FetchJob<R>>();
        let (done_tx, done_rx) = mpsc::channel();
        let handle = std::thread::Builder::new()
            .name("vlist-fetch".into())
            .spawn(move || {
                for job in job_rx {
                    trace!(range = ?job.request.range, "fetch started");
                    let result = block_on(job.future);
                    let done = FetchDone {
                        request: job.request,
                        result,
                    };
                    if done_tx.send(done).is_err() {
                        debug!("event loop gone, fetch worker exiting");
                        break;
                    }
                }
            })?;
        Ok(FetchWorker {
            jobs: Some(job_tx),
            done: done_rx,
            handle: Some(handle),
        })
    }

    /// Queue `future` as the fetch for `request`. Returns false when the
    /// worker has stopped.
    pub fn submit(&self, request: FetchRequest, future: FetchFuture<R>) -> bool {
        match &self.jobs {
            Some(tx) => tx.send(FetchJob { request, future }).is_ok(),
            None => false,
        }
    }

    /// Build the future for `request` from the list's source and queue it.
    pub fn dispatch<S>(&self, list: &VirtualList<S>, request: FetchRequest) -> bool
    where
        S: DataSource<Row = R>,
    {
        let future = list.source().fetch(&request.query);
        self.submit(request, future)
    }

    /// A finished fetch, if one is ready.
    pub fn try_recv(&self) -> Option<FetchDone<R>> {
        self.done.try_recv().ok()
    }

    /// Wait up to `timeout` for a finished fetch.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchDone<R>> {
        match self.done.recv_timeout(timeout) {
            Ok(done) => Some(done),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl<R> Drop for FetchWorker<R> {
    fn drop(&mut self) {
        // closing the job channel ends the worker loop
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("fetch worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FetchOutcome;
    use crate::data::{ListRow, VecDataSource};
    use crate::window::{DebounceProfile, WindowConfig};

    #[test]
    fn results_come_back_through_the_channel() {
        let rows = (0..100).map(|i| ListRow::new(i, format!("Item {i}"))).collect();
        let mut list = VirtualList::new(
            VecDataSource::new(rows),
            WindowConfig::default(),
            DebounceProfile::Standard,
        )
        .unwrap();
        let worker = FetchWorker::spawn().unwrap();
        let req = list.start().unwrap();
        assert!(worker.dispatch(&list, req));

        let done = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(done.request.range, 0..30);
        let out = list.complete_fetch(&done.request, done.result).unwrap();
        assert!(matches!(out, FetchOutcome::Applied { rows: 30, .. }));
    }
}
