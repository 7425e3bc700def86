//! Simulation engine that sequences the tick pipeline.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rand::{SeedableRng, rngs::StdRng};

use crate::building::{Building, Equipment};

use super::clock::{SimClock, WorkingHours};
use super::environment;
use super::policy;
use super::types::TickReport;

/// Typed engine parameters, usually produced from [`crate::config::Settings`].
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Virtual time of the first tick's predecessor.
    pub start_time: NaiveDateTime,
    /// Simulated minutes the clock advances per tick.
    pub minutes_per_tick: u32,
    /// Daily activity window.
    pub working_hours: WorkingHours,
    /// HVAC comfort setpoint in degrees Celsius.
    pub hvac_setpoint_c: f64,
    /// Seed for the shared RNG; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            start_time: NaiveDate::from_ymd_opt(2024, 1, 1)
                .expect("valid date")
                .and_hms_opt(0, 0, 0)
                .expect("valid time"),
            minutes_per_tick: 1,
            working_hours: WorkingHours::default(),
            hvac_setpoint_c: 22.0,
            seed: None,
        }
    }
}

/// Topology handed to the engine cannot be simulated.
#[derive(Debug)]
pub struct TopologyError {
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "topology error: {}", self.message)
    }
}

/// Simulation engine owning the building, the virtual clock, and the RNG.
///
/// Each [`Engine::step`] runs the full pipeline for one tick: clock advance,
/// environment update, policy update, aggregation, snapshot. Ticks are
/// strictly sequential; the policy always observes the completed readings of
/// the same tick.
pub struct Engine {
    building: Building,
    clock: SimClock,
    hours: WorkingHours,
    hvac_setpoint_c: f64,
    rng: StdRng,
}

impl Engine {
    /// Creates an engine over a fully constructed building.
    ///
    /// Fails fast when the topology cannot be simulated: an elevator needs at
    /// least one floor to move between.
    pub fn new(building: Building, settings: &EngineSettings) -> Result<Self, TopologyError> {
        let has_elevator = building
            .equipment()
            .iter()
            .any(|unit| matches!(unit, Equipment::Elevator(_)));
        if has_elevator && building.floors().is_empty() {
            return Err(TopologyError {
                message: "building has an elevator but no floors".to_string(),
            });
        }

        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            building,
            clock: SimClock::new(settings.start_time, settings.minutes_per_tick),
            hours: settings.working_hours,
            hvac_setpoint_c: settings.hvac_setpoint_c,
            rng,
        })
    }

    /// Executes one tick and returns its snapshot.
    pub fn step(&mut self) -> TickReport {
        // 1. Advance the virtual clock
        let now = self.clock.advance();

        // 2. Environment writes a fresh reading into every sensor
        environment::update_sensors(&mut self.building, now, &self.hours, &mut self.rng);

        // 3. Policy reacts to the completed readings
        policy::update_equipment(
            &mut self.building,
            now.time(),
            &self.hours,
            self.hvac_setpoint_c,
            &mut self.rng,
        );

        // 4. Aggregate and snapshot
        TickReport::snapshot(now, &self.building)
    }

    /// Executes `ticks` steps back to back and collects the snapshots.
    ///
    /// This is the headless batch mode; the real-time cadence lives in the
    /// scheduler.
    pub fn run(&mut self, ticks: usize) -> Vec<TickReport> {
        let mut reports = Vec::with_capacity(ticks);
        for _ in 0..ticks {
            reports.push(self.step());
        }
        reports
    }

    /// Returns the building in its current state.
    pub fn building(&self) -> &Building {
        &self.building
    }

    /// Returns the current simulated time.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}
