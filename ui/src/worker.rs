use anyhow::{Context, Result};
use log::{error, trace};
use parking_lot::{Condvar, Mutex};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::thread;

use lifescan_core::prelude::*;

/// Request to compute something in the background.
pub type WorkFn = Box<dyn Send + FnOnce() -> WorkerResult>;

/// Result of a fallible background operation.
pub type WorkerResult = Result<TickReport>;

/// Data from the worker thread.
#[derive(Debug)]
pub enum WorkerData {
    /// The task is still running.
    None,
    /// The task has finished.
    Result(WorkerResult),
}

/// Worker thread state machine.
enum State {
    /// There is no running task.
    ///
    /// - Work requests lead to the `WorkRequested` state and wake the worker
    ///   thread.
    Idle,

    /// The main thread is requesting the worker thread to do some work.
    ///
    /// - Work requests are rejected.
    /// - The worker thread may take the work, leading to the `Working` state.
    WorkRequested(WorkFn),

    /// The worker thread is working.
    ///
    /// - Work requests are rejected.
    /// - `take_data()` returns `WorkerData::None`.
    /// - The worker thread may finish the work, leading to the `Done` state.
    Working,

    /// The worker thread is done with its work. This variant contains the
    /// result of the work.
    ///
    /// - Work requests are rejected.
    /// - `take_data()` returns the work result, leading to the `Idle` state.
    Done(WorkerResult),

    /// The `WorkerThread` object has been dropped; the thread itself should
    /// finish any work in progress and exit.
    Dropped,
}
impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Idle => write!(f, "State::Idle"),
            State::WorkRequested(_) => write!(f, "State::WorkRequested"),
            State::Working => write!(f, "State::Working"),
            State::Done(_) => write!(f, "State::Done"),
            State::Dropped => write!(f, "State::Dropped"),
        }
    }
}
impl State {
    fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Error returned when an operation fails because the worker is busy.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WorkerBusy;
impl fmt::Display for WorkerBusy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Worker thread is busy")
    }
}
impl Error for WorkerBusy {}
/// Error returned when an operation fails because the worker is idle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WorkerIdle;
impl fmt::Display for WorkerIdle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Worker thread is idle")
    }
}
impl Error for WorkerIdle {}

/// Interface to another thread that can do work in the background, one task at
/// a time.
#[derive(Debug)]
pub struct WorkerThread(Arc<(Mutex<State>, Condvar)>);
impl Drop for WorkerThread {
    fn drop(&mut self) {
        trace!("Dropping worker thread");
        let (lock, condvar) = &*self.0;
        let mut state = lock.lock();
        *state = State::Dropped;
        condvar.notify_one();
        drop(state);
    }
}
impl WorkerThread {
    /// Spawns the worker thread.
    pub fn new() -> Result<Self> {
        Self::with_builder(thread::Builder::new().name("lifescan-driver".to_owned()))
    }

    fn with_builder(builder: thread::Builder) -> Result<Self> {
        let lock_and_condvar = Arc::new((Mutex::new(State::Idle), Condvar::new()));

        let lock_and_condvar_2 = Arc::clone(&lock_and_condvar);
        builder
            .spawn(move || {
                let (lock, condvar) = &*lock_and_condvar_2;
                let mut state = lock.lock();
                loop {
                    match std::mem::replace(&mut *state, State::Idle) {
                        s @ State::Idle | s @ State::Done(_) => {
                            *state = s;
                            // Wait for the main thread to send more work.
                            condvar.wait(&mut state);
                        }
                        State::WorkRequested(work_fn) => {
                            *state = State::Working;
                            drop(state); // unlock mutex while working
                            let result = work_fn();
                            state = lock.lock(); // lock mutex again
                            if matches!(*state, State::Working) {
                                *state = State::Done(result);
                            }
                        }
                        State::Working => {
                            // The `Working` state only exists while this
                            // thread is doing work.
                            error!("Worker thread woken in state {:?}", state);
                            break;
                        }
                        State::Dropped => break,
                    }
                }
                trace!("Worker thread exited");
            })
            .context("Unable to spawn worker thread")?;

        Ok(Self(lock_and_condvar))
    }

    /// Returns `true` if a task is queued, running, or finished but not yet
    /// taken.
    pub fn is_busy(&self) -> bool {
        !self.is_idle()
    }
    /// Returns `true` if a new task can be requested.
    pub fn is_idle(&self) -> bool {
        let (lock, _condvar) = &*self.0;
        lock.lock().is_idle()
    }

    pub fn request(&mut self, work_fn: WorkFn) -> Result<(), WorkerBusy> {
        let (lock, condvar) = &*self.0;
        let mut state = lock.lock();
        if state.is_idle() {
            *state = State::WorkRequested(work_fn);
            condvar.notify_one();
            drop(state);
            Ok(())
        } else {
            Err(WorkerBusy)
        }
    }
    pub fn take_data(&mut self) -> Result<WorkerData, WorkerIdle> {
        let (lock, _condvar) = &*self.0;
        let mut state = lock.lock();
        match std::mem::replace(&mut *state, State::Idle) {
            s @ State::WorkRequested(_) | s @ State::Working => {
                *state = s; // unchanged
                Ok(WorkerData::None)
            }
            State::Done(result) => Ok(WorkerData::Result(result)),
            State::Dropped => {
                *state = State::Dropped;
                unreachable!("take_data() called on worker thread in dropped state")
            }
            State::Idle => Err(WorkerIdle),
        }
    }
}
