//! State observers.
//!
//! Observers receive an immutable snapshot of the state after `init` and
//! after every `update`. The snapshot is an `Arc` of a copy taken at the
//! iteration boundary, so nothing the solver does afterwards can change what
//! an observer has seen. The solver does not wait on observers beyond the
//! `listen` call itself; deferring work is up to the observer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::info;

use super::state::SolverState;
use crate::order::PartiallyOrderedCollection;

/// Receives per-iteration snapshots.
pub trait StateObserver<St>: Send + Sync {
    /// Called with the snapshot of one iteration boundary.
    fn listen(&self, snapshot: Arc<St>);

    /// Called once when the run terminates normally.
    fn done(&self) {}
}

/// Logs one line per snapshot through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl<St: SolverState> StateObserver<St> for LogObserver {
    fn listen(&self, snapshot: Arc<St>) {
        let state = snapshot.population_state();
        let progress = state.progress();
        info!(
            "iteration {}: births={} evaluations={} population={} front={} elapsed={}ms",
            progress.n_of_iterations(),
            progress.n_of_births(),
            progress.n_of_quality_evaluations(),
            state.population().len(),
            state.population().firsts().len(),
            progress.elapsed_millis(),
        );
    }
}

/// Keeps every snapshot it receives.
#[derive(Debug)]
pub struct SnapshotCollector<St> {
    snapshots: Mutex<Vec<Arc<St>>>,
    done: AtomicBool,
}

impl<St> Default for SnapshotCollector<St> {
    fn default() -> Self {
        Self {
            snapshots: Mutex::new(Vec::new()),
            done: AtomicBool::new(false),
        }
    }
}

impl<St> SnapshotCollector<St> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots received so far, oldest first.
    pub fn snapshots(&self) -> Vec<Arc<St>> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the `done` signal has been received.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}

impl<St: Send + Sync> StateObserver<St> for SnapshotCollector<St> {
    fn listen(&self, snapshot: Arc<St>) {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot);
    }

    fn done(&self) {
        self.done.store(true, Ordering::Release);
    }
}
