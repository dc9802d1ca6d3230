use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};
use tokio::sync::{oneshot, Semaphore};

use crate::error::SyncError;

/// Runs store calls off the calling thread.
///
/// At most `max_in_flight` tasks talk to the store at once; the rest wait
/// for a permit. Tasks cannot be cancelled individually, only dropped
/// wholesale by [`WorkerPool::shutdown`].
pub struct WorkerPool {
    runtime: Mutex<Option<Runtime>>,
    handle: Handle,
    permits: Arc<Semaphore>,
    closed: AtomicBool,
}

impl WorkerPool {
    /// Builds a dedicated multi-thread runtime with `threads` workers.
    pub fn new(threads: usize) -> std::io::Result<Self> {
        let threads = threads.max(1);
        let runtime = Builder::new_multi_thread()
            .worker_threads(threads)
            .thread_name("rulesync-worker")
            .enable_all()
            .build()?;
        let handle = runtime.handle().clone();

        tracing::debug!(threads, "worker pool started");

        Ok(Self {
            runtime: Mutex::new(Some(runtime)),
            handle,
            permits: Arc::new(Semaphore::new(threads)),
            closed: AtomicBool::new(false),
        })
    }

    /// Runs tasks on a runtime owned by the host. Shutdown then only stops
    /// new submissions; the host keeps control of its runtime.
    pub fn from_handle(handle: Handle, max_in_flight: usize) -> Self {
        Self {
            runtime: Mutex::new(None),
            handle,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn submit<T, F>(&self, task: F) -> Deferred<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, SyncError>> + Send + 'static,
    {
        if self.is_closed() {
            return Deferred::failed(SyncError::Cancelled);
        }

        let (tx, rx) = oneshot::channel();
        let permits = Arc::clone(&self.permits);
        self.handle.spawn(async move {
            let result = match permits.acquire_owned().await {
                Ok(_permit) => task.await,
                Err(_) => Err(SyncError::Cancelled),
            };
            let _ = tx.send(result);
        });
        Deferred { rx }
    }

    /// Stops accepting work, lets in-flight tasks finish for up to
    /// `timeout`, then drops whatever is left. Dropped tasks resolve their
    /// handles with [`SyncError::Cancelled`].
    ///
    /// From a multi-thread runtime the drain runs under `block_in_place`.
    /// A current-thread runtime cannot block, so there the pool is torn down
    /// in the background without waiting for `timeout`.
    pub fn shutdown(&self, timeout: Duration) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.permits.close();

        let runtime = match self.runtime.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(runtime) = runtime else {
            return;
        };
        match Handle::try_current().map(|h| h.runtime_flavor()) {
            Err(_) => runtime.shutdown_timeout(timeout),
            Ok(RuntimeFlavor::CurrentThread) => runtime.shutdown_background(),
            Ok(_) => tokio::task::block_in_place(|| runtime.shutdown_timeout(timeout)),
        }
        tracing::debug!("worker pool stopped");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        let runtime = match self.runtime.get_mut() {
            Ok(slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(runtime) = runtime {
            runtime.shutdown_background();
        }
    }
}

/// False on a current-thread runtime, where [`Deferred::wait`] cannot block.
pub(crate) fn can_block() -> bool {
    !matches!(
        Handle::try_current().map(|h| h.runtime_flavor()),
        Ok(RuntimeFlavor::CurrentThread)
    )
}

/// Single-resolution handle to a pool task.
///
/// Await it from async code, or call [`Deferred::wait`] from synchronous
/// code.
#[must_use = "a Deferred does nothing unless awaited or waited on"]
pub struct Deferred<T> {
    rx: oneshot::Receiver<Result<T, SyncError>>,
}

impl<T> Deferred<T> {
    pub fn ready(result: Result<T, SyncError>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { rx }
    }

    pub fn failed(err: SyncError) -> Self {
        Self::ready(Err(err))
    }

    /// Blocks until the task resolves. Inside a multi-thread runtime the
    /// wait moves off the worker with `block_in_place`; a current-thread
    /// runtime cannot block at all and gets [`SyncError::BlockedInRuntime`].
    pub fn wait(self) -> Result<T, SyncError> {
        match Handle::try_current() {
            Err(_) => self.rx.blocking_recv().unwrap_or(Err(SyncError::Cancelled)),
            Ok(handle) => match handle.runtime_flavor() {
                RuntimeFlavor::CurrentThread => Err(SyncError::BlockedInRuntime),
                _ => tokio::task::block_in_place(|| handle.block_on(self)),
            },
        }
    }
}

impl<T> Future for Deferred<T> {
    type Output = Result<T, SyncError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|r| r.unwrap_or(Err(SyncError::Cancelled)))
    }
}
