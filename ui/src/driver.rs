//! Periodic stepping of a session on a background thread.

use anyhow::{anyhow, Result};
use log::{debug, info, trace, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lifescan_core::prelude::*;

use crate::worker::{WorkerBusy, WorkerData, WorkerResult, WorkerThread};

/// How long `run()` sleeps between checks on the worker.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// What happened to a trigger.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A tick was requested from the worker.
    Requested,
    /// The previous tick is still outstanding, so this trigger was dropped.
    Dropped,
    /// The driver has been stopped.
    Stopped,
}

/// Requests at most one tick at a time from a background worker.
///
/// A trigger that arrives while a tick is outstanding is dropped and counted,
/// never queued. Edits to the session are refused while a tick is
/// outstanding.
#[derive(Debug)]
pub struct Driver {
    session: Arc<Mutex<Session>>,
    worker: WorkerThread,
    patterns: Arc<[PatternId]>,
    interval: Duration,

    stopped: bool,
    requested: u64,
    completed: u64,
    dropped: u64,
}

impl Driver {
    pub fn new(session: Session, patterns: &[PatternId], interval: Duration) -> Result<Self> {
        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            worker: WorkerThread::new()?,
            patterns: patterns.into(),
            interval,

            stopped: false,
            requested: 0,
            completed: 0,
            dropped: 0,
        })
    }

    /// Returns the session, which stays locked for as long as the guard is
    /// held. Hold it only while the driver is idle or stopped, or the next
    /// tick waits for it.
    pub fn session(&self) -> &Arc<Mutex<Session>> {
        &self.session
    }

    /// Returns `true` if a tick is outstanding.
    pub fn is_busy(&self) -> bool {
        self.worker.is_busy()
    }
    /// Returns `true` if `stop()` has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
    /// Returns the number of ticks requested.
    pub fn requested(&self) -> u64 {
        self.requested
    }
    /// Returns the number of ticks that have finished and been collected.
    pub fn completed(&self) -> u64 {
        self.completed
    }
    /// Returns the number of triggers dropped because a tick was
    /// outstanding.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Requests a tick if none is outstanding.
    pub fn trigger(&mut self) -> TriggerOutcome {
        if self.stopped {
            return TriggerOutcome::Stopped;
        }
        let session = Arc::clone(&self.session);
        let patterns = Arc::clone(&self.patterns);
        let work_fn = Box::new(move || -> WorkerResult { Ok(session.lock().tick(&patterns)) });
        match self.worker.request(work_fn) {
            Ok(()) => {
                self.requested += 1;
                trace!("Requested tick #{}", self.requested);
                TriggerOutcome::Requested
            }
            Err(WorkerBusy) => {
                self.dropped += 1;
                warn!("Dropped frame; {} dropped so far", self.dropped);
                TriggerOutcome::Dropped
            }
        }
    }

    /// Collects the outcome of the outstanding tick if it has finished.
    pub fn poll(&mut self) -> Option<WorkerResult> {
        match self.worker.take_data() {
            Ok(WorkerData::Result(result)) => {
                self.completed += 1;
                Some(result)
            }
            Ok(WorkerData::None) | Err(_) => None,
        }
    }

    /// Runs `f` on the session if no tick is outstanding.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> Result<R, WorkerBusy> {
        if self.is_busy() {
            return Err(WorkerBusy);
        }
        Ok(f(&mut self.session.lock()))
    }

    /// Prevents any further ticks from being requested. A tick that is already
    /// outstanding still finishes.
    pub fn stop(&mut self) {
        if !self.stopped {
            info!(
                "Stopping driver after {} ticks ({} dropped triggers)",
                self.completed, self.dropped,
            );
        }
        self.stopped = true;
    }

    /// Triggers once per interval until `generations` ticks have completed,
    /// calling `on_tick` with the outcome of each one, then stops.
    pub fn run(&mut self, generations: u64, mut on_tick: impl FnMut(&TickReport)) -> Result<()> {
        if self.is_stopped() {
            return Err(anyhow!("Driver has been stopped"));
        }
        let target = self.completed + generations;
        let mut next_trigger = Instant::now();
        while self.completed < target {
            if let Some(result) = self.poll() {
                let report = result?;
                for failure in report.step.failures.iter().chain(&report.detect.failures) {
                    warn!("Generation {}: {}", report.generation, failure);
                }
                on_tick(&report);
                continue;
            }
            let now = Instant::now();
            if now >= next_trigger && self.requested < target {
                self.trigger();
                next_trigger = now + self.interval;
            }
            std::thread::sleep(POLL_INTERVAL);
        }
        debug!("Completed {} generations", generations);
        self.stop();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> Driver {
        let mut config = SessionConfig::new(8, 8, Rule::ConwayStandard);
        config.threads = Some(2);
        let mut session = Session::new(config).unwrap();
        session
            .load_text("5x5\n00000\n00000\n01110\n00000\n00000\n")
            .unwrap();
        Driver::new(session, &[PatternId::Blinker], Duration::ZERO).unwrap()
    }

    fn wait_for_tick(driver: &mut Driver) -> TickReport {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if let Some(result) = driver.poll() {
                return result.unwrap();
            }
            std::thread::sleep(POLL_INTERVAL);
        }
        panic!("tick did not finish");
    }

    #[test]
    fn test_late_triggers_are_dropped() {
        let mut driver = driver();
        let session = Arc::clone(driver.session());

        // Holding the session keeps the tick outstanding.
        let guard = session.lock();
        assert_eq!(TriggerOutcome::Requested, driver.trigger());
        assert_eq!(TriggerOutcome::Dropped, driver.trigger());
        assert_eq!(TriggerOutcome::Dropped, driver.trigger());
        assert_eq!(Err(WorkerBusy), driver.edit(|s| s.toggle_cell(0, 0)));
        assert!(driver.is_busy());
        drop(guard);

        let report = wait_for_tick(&mut driver);
        assert_eq!(1, report.generation);
        assert_eq!((1, 1, 2), (driver.requested(), driver.completed(), driver.dropped()));

        // Only one tick ran.
        assert_eq!(1, session.lock().generation());
        assert!(!driver.is_busy());
        assert_eq!(Ok(true), driver.edit(|s| s.toggle_cell(0, 0)));
    }

    #[test]
    fn test_edit_loads_when_idle() {
        let mut driver = driver();
        driver.run(2, |_| ()).unwrap();
        let loaded = driver.edit(|s| s.load_text("2x2\n11\n11\n")).unwrap();
        assert!(loaded.is_ok());
        let s = driver.session().lock();
        assert_eq!((0, 4), (s.generation(), s.alive_count()));

        drop(s);
        let failed = driver.edit(|s| s.load_text("2x2\n11\n")).unwrap();
        assert!(failed.is_err());
        assert_eq!(4, driver.session().lock().alive_count());
    }

    #[test]
    fn test_stop() {
        let mut driver = driver();
        driver.stop();
        assert!(driver.is_stopped());
        assert_eq!(TriggerOutcome::Stopped, driver.trigger());
        assert!(driver.run(1, |_| ()).is_err());
        assert_eq!(0, driver.requested());
    }

    #[test]
    fn test_run() {
        let mut driver = driver();
        let mut seen = vec![];
        driver
            .run(4, |report| {
                let blinkers = report.detect.count(PatternId::Blinker);
                seen.push((report.generation, report.alive, blinkers))
            })
            .unwrap();
        assert_eq!(
            vec![(1, 3, Some(1)), (2, 3, Some(1)), (3, 3, Some(1)), (4, 3, Some(1))],
            seen
        );
        assert!(driver.is_stopped());
        assert_eq!(4, driver.completed());
    }
}
