//! Background jobs polled from the GUI thread
//!
//! Every network call runs on its own worker thread with a current-thread tokio runtime.
//! The GUI keeps the returned [`AsyncJob`] and polls it once per frame.

use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use thiserror::Error;
use tokio::runtime::Builder;

/// Failures of the job machinery itself, independent of what the job does
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("failed to create async runtime: {0}")]
    Runtime(String),
    #[error("worker task disconnected")]
    Disconnected,
}

/// Handle to a running background job
pub struct AsyncJob<T, E> {
    receiver: Option<Receiver<Result<T, E>>>,
}

impl<T, E: From<JobError>> AsyncJob<T, E> {
    /// Create a new async job with the given receiver
    pub fn new(receiver: Receiver<Result<T, E>>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    /// Poll the job for completion
    /// Returns Some(result) if the job has completed, None if still running
    pub fn poll(&mut self) -> Option<Result<T, E>> {
        if let Some(rx) = &self.receiver {
            match rx.try_recv() {
                Ok(res) => {
                    self.receiver = None;
                    return Some(res);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.receiver = None;
                    return Some(Err(JobError::Disconnected.into()));
                }
            }
        }
        None
    }

    /// Check if the job is still running
    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Run `future` to completion on a worker thread.
///
/// The future is built by the caller on the GUI thread, so anything it records
/// synchronously (request URLs, call counters) is visible before this returns.
pub fn spawn_job<T, E, Fut>(future: Fut) -> AsyncJob<T, E>
where
    T: Send + 'static,
    E: From<JobError> + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime.block_on(future),
            Err(e) => {
                tracing::error!("Failed to create Tokio runtime for background job: {}", e);
                Err(JobError::Runtime(e.to_string()).into())
            }
        };
        let _ = tx.send(result);
    });
    AsyncJob::new(rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for<T>(job: &mut AsyncJob<T, JobError>) -> Result<T, JobError> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(res) = job.poll() {
                return res;
            }
            assert!(Instant::now() < deadline, "job did not finish in time");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_spawn_job_delivers_result() {
        let mut job: AsyncJob<u32, JobError> = spawn_job(async { Ok(7) });
        assert_eq!(wait_for(&mut job), Ok(7));
        assert!(!job.is_running());
    }

    #[test]
    fn test_poll_after_completion_returns_none() {
        let mut job: AsyncJob<(), JobError> = spawn_job(async { Ok(()) });
        wait_for(&mut job).unwrap();
        assert!(job.poll().is_none());
    }

    #[test]
    fn test_dropped_sender_reports_disconnected() {
        let (tx, rx) = mpsc::channel::<Result<(), JobError>>();
        drop(tx);
        let mut job = AsyncJob::new(rx);
        assert_eq!(job.poll(), Some(Err(JobError::Disconnected)));
        assert!(!job.is_running());
    }

    #[test]
    fn test_running_job_polls_none() {
        let (_tx, rx) = mpsc::channel::<Result<(), JobError>>();
        let mut job = AsyncJob::new(rx);
        assert!(job.poll().is_none());
        assert!(job.is_running());
    }
}
