//! Real-time cadence driver for the simulation engine.
//!
//! The scheduler owns the engine while a run is active. One worker thread
//! executes the tick pipeline at a fixed wall-clock period; the stop channel
//! doubles as the inter-tick sleep, so a stop request is observed between
//! ticks and the in-flight tick always completes.

use std::fmt;
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::reporting::ReportSink;

use super::engine::Engine;

/// Lifecycle errors surfaced by [`Scheduler::start`].
#[derive(Debug)]
pub enum SchedulerError {
    /// `start` was called while a run is already active.
    AlreadyRunning,
    /// The worker thread could not be spawned.
    Spawn(io::Error),
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "scheduler error: already running"),
            Self::Spawn(e) => write!(f, "scheduler error: failed to spawn tick thread: {e}"),
        }
    }
}

struct Worker {
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<Engine>,
}

/// Drives an [`Engine`] on a fixed real-time tick period.
///
/// Exactly one of `engine` / `worker` is populated: the engine sits here
/// while stopped and moves onto the worker thread while running.
pub struct Scheduler {
    tick_period: Duration,
    engine: Option<Engine>,
    worker: Option<Worker>,
}

impl Scheduler {
    /// Creates a stopped scheduler around an engine.
    pub fn new(engine: Engine, tick_period: Duration) -> Self {
        Self {
            tick_period,
            engine: Some(engine),
            worker: None,
        }
    }

    /// Returns `true` while the tick thread is active.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Returns the engine while the scheduler is stopped.
    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    /// Starts ticking, publishing every report into `sink`.
    ///
    /// The first tick runs immediately; subsequent ticks follow at the
    /// configured period. A sink failure is written to stderr and the run
    /// continues; the simulation is best-effort continuous, not
    /// transactional.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::AlreadyRunning`] when a run is active, and
    /// [`SchedulerError::Spawn`] when the OS refuses the worker thread.
    pub fn start<S>(&mut self, mut sink: S) -> Result<(), SchedulerError>
    where
        S: ReportSink + Send + 'static,
    {
        if self.worker.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }
        let mut engine = self
            .engine
            .take()
            .ok_or(SchedulerError::AlreadyRunning)?;

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let period = self.tick_period;

        let handle = thread::Builder::new()
            .name("bems-tick".to_string())
            .spawn(move || {
                loop {
                    let report = engine.step();
                    if let Err(e) = sink.publish(&report) {
                        eprintln!("report sink failed, tick continues: {e}");
                    }
                    match stop_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => {}
                        // Stop requested, or the scheduler was dropped.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                engine
            })
            .map_err(SchedulerError::Spawn)?;

        self.worker = Some(Worker { stop_tx, handle });
        Ok(())
    }

    /// Stops the run after the in-flight tick completes.
    ///
    /// A no-op when already stopped. The engine, with its advanced clock and
    /// mutated building, is recovered and available through
    /// [`Scheduler::engine`]; a later `start` continues from there as a
    /// fresh run.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = worker.stop_tx.send(());
        if let Ok(engine) = worker.handle.join() {
            self.engine = Some(engine);
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::sample_building;
    use crate::sim::engine::EngineSettings;
    use crate::sim::types::TickReport;
    use std::sync::{Arc, Mutex};

    /// Sink that appends every report to a shared vector.
    #[derive(Clone)]
    struct CollectingSink {
        reports: Arc<Mutex<Vec<TickReport>>>,
    }

    impl CollectingSink {
        fn new() -> Self {
            Self {
                reports: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn count(&self) -> usize {
            self.reports.lock().map(|r| r.len()).unwrap_or(0)
        }
    }

    impl ReportSink for CollectingSink {
        fn publish(&mut self, report: &TickReport) -> io::Result<()> {
            if let Ok(mut reports) = self.reports.lock() {
                reports.push(report.clone());
            }
            Ok(())
        }
    }

    /// Sink that always fails, to prove failures never stop the clock.
    struct FailingSink;

    impl ReportSink for FailingSink {
        fn publish(&mut self, _report: &TickReport) -> io::Result<()> {
            Err(io::Error::other("sink unavailable"))
        }
    }

    fn engine(seed: u64) -> Engine {
        let settings = EngineSettings {
            seed: Some(seed),
            ..EngineSettings::default()
        };
        Engine::new(sample_building(), &settings).expect("valid topology")
    }

    #[test]
    fn first_tick_fires_immediately() {
        let mut scheduler = Scheduler::new(engine(1), Duration::from_secs(60));
        let sink = CollectingSink::new();

        scheduler.start(sink.clone()).expect("start succeeds");
        // Long period: any published report must be the immediate first tick.
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while sink.count() == 0 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        scheduler.stop();

        assert_eq!(sink.count(), 1);
    }

    #[test]
    fn ticks_repeat_at_the_period() {
        let mut scheduler = Scheduler::new(engine(2), Duration::from_millis(10));
        let sink = CollectingSink::new();

        scheduler.start(sink.clone()).expect("start succeeds");
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while sink.count() < 3 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        scheduler.stop();

        assert!(sink.count() >= 3, "got {} ticks", sink.count());
    }

    #[test]
    fn double_start_is_an_error() {
        let mut scheduler = Scheduler::new(engine(3), Duration::from_secs(60));
        scheduler.start(CollectingSink::new()).expect("first start");

        let second = scheduler.start(CollectingSink::new());
        assert!(matches!(second, Err(SchedulerError::AlreadyRunning)));

        scheduler.stop();
    }

    #[test]
    fn stop_is_idempotent_and_recovers_the_engine() {
        let mut scheduler = Scheduler::new(engine(4), Duration::from_millis(10));
        assert!(scheduler.engine().is_some());

        scheduler.start(CollectingSink::new()).expect("start succeeds");
        assert!(scheduler.is_running());
        assert!(scheduler.engine().is_none());

        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());

        // The recovered engine carries the advanced clock.
        let engine = scheduler.engine().expect("engine recovered");
        assert_ne!(engine.now().format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn restart_after_stop_continues_the_run() {
        let mut scheduler = Scheduler::new(engine(5), Duration::from_millis(10));
        let sink = CollectingSink::new();

        scheduler.start(sink.clone()).expect("first start");
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while sink.count() == 0 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        scheduler.stop();
        let after_first_run = sink.count();
        assert!(after_first_run > 0);

        scheduler.start(sink.clone()).expect("second start");
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while sink.count() <= after_first_run && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        scheduler.stop();
        assert!(sink.count() > after_first_run);
    }

    #[test]
    fn sink_failure_does_not_stop_the_clock() {
        let mut scheduler = Scheduler::new(engine(6), Duration::from_millis(5));
        scheduler.start(FailingSink).expect("start succeeds");
        thread::sleep(Duration::from_millis(40));
        scheduler.stop();

        // The engine kept ticking through every sink failure.
        let engine = scheduler.engine().expect("engine recovered");
        assert_ne!(engine.now().format("%H:%M").to_string(), "00:00");
    }
}
