//! Fixed-slot worker pool.
//!
//! Each of the `N` threads owns exactly one job slot. [`WorkerPool::add`] hands a job to the
//! first free slot and blocks while every slot is busy, so at most `N` jobs are ever in
//! flight. This is bounded dispatch, not a queue.
//!
//! Panics inside jobs are caught on the worker. The first panic message since the last join
//! is kept and returned by the next [`WorkerPool::join`] as [`RenderError::JobPanicked`];
//! the worker thread stays alive and keeps serving its slot.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};

use crate::foundation::error::{RenderError, RenderResult};

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Slot {
    job: Option<Job>,
    free: bool,
}

struct PoolState {
    slots: Vec<Slot>,
    shutdown: bool,
    panic: Option<String>,
}

impl PoolState {
    fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.free)
    }

    fn all_free(&self) -> bool {
        self.slots.iter().all(|s| s.free)
    }
}

struct Shared {
    state: Mutex<PoolState>,
    start: Condvar,
    ready: Condvar,
}

pub struct WorkerPool {
    shared: Arc<Shared>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Pool sized by [`WorkerPool::default_thread_count`].
    pub fn new() -> RenderResult<Self> {
        Self::with_threads(Self::default_thread_count())
    }

    /// `SOFTRENDER_THREADS` if set to a positive integer, otherwise hardware concurrency (min 1).
    pub fn default_thread_count() -> usize {
        std::env::var("SOFTRENDER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1)
    }

    #[tracing::instrument]
    pub fn with_threads(threads: usize) -> RenderResult<Self> {
        if threads == 0 {
            return Err(RenderError::validation(
                "worker pool needs at least one thread",
            ));
        }

        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState {
                slots: (0..threads)
                    .map(|_| Slot {
                        job: None,
                        free: false,
                    })
                    .collect(),
                shutdown: false,
                panic: None,
            }),
            start: Condvar::new(),
            ready: Condvar::new(),
        });

        let mut handles = Vec::with_capacity(threads);
        for idx in 0..threads {
            let worker_shared = Arc::clone(&shared);
            let spawned = std::thread::Builder::new()
                .name(format!("softrender-worker-{idx}"))
                .spawn(move || worker_loop(&worker_shared, idx));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    shared.state.lock().shutdown = true;
                    shared.start.notify_all();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(RenderError::Other(
                        anyhow::Error::new(err).context("spawn worker thread"),
                    ));
                }
            }
        }

        // Every worker flips its slot to free once it is parked and ready.
        {
            let mut state = shared.state.lock();
            while !state.all_free() {
                shared.ready.wait(&mut state);
            }
        }

        tracing::debug!(threads, "worker pool started");
        Ok(Self { shared, handles })
    }

    pub fn threads(&self) -> usize {
        self.handles.len()
    }

    /// Number of slots currently holding a dispatched, unfinished job.
    pub fn in_flight(&self) -> usize {
        self.shared
            .state
            .lock()
            .slots
            .iter()
            .filter(|s| !s.free)
            .count()
    }

    /// Hands `job` to the first free slot, blocking until one is available.
    ///
    /// Calling this from inside a job can deadlock once every slot is busy.
    pub fn add<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.state.lock();
        let idx = loop {
            if let Some(idx) = state.first_free() {
                break idx;
            }
            self.shared.ready.wait(&mut state);
        };
        let slot = &mut state.slots[idx];
        slot.free = false;
        slot.job = Some(Box::new(job));
        drop(state);
        self.shared.start.notify_all();
    }

    /// Blocks until every slot is free.
    ///
    /// Returns the first job panic recorded since the previous join, if any.
    pub fn join(&self) -> RenderResult<()> {
        let mut state = self.shared.state.lock();
        while !state.all_free() {
            self.shared.ready.wait(&mut state);
        }
        match state.panic.take() {
            Some(msg) => Err(RenderError::job_panicked(msg)),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads())
            .finish_non_exhaustive()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if let Err(err) = self.join() {
            tracing::warn!(%err, "worker pool dropped with an unreported job failure");
        }
        self.shared.state.lock().shutdown = true;
        self.shared.start.notify_all();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
        tracing::debug!("worker pool stopped");
    }
}

fn worker_loop(shared: &Shared, idx: usize) {
    shared.state.lock().slots[idx].free = true;
    shared.ready.notify_all();

    loop {
        let job = {
            let mut state = shared.state.lock();
            while state.slots[idx].job.is_none() && !state.shutdown {
                shared.start.wait(&mut state);
            }
            // An assigned job still runs after shutdown was requested.
            match state.slots[idx].job.take() {
                Some(job) => job,
                None => return,
            }
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(job));

        {
            let mut state = shared.state.lock();
            state.slots[idx].free = true;
            if let Err(payload) = outcome {
                let msg = panic_message(payload.as_ref());
                tracing::error!(worker = idx, %msg, "worker job panicked");
                state.panic.get_or_insert(msg);
            }
        }
        shared.ready.notify_all();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/threading/pool.rs"]
mod tests;
