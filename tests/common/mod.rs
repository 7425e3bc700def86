//! Shared test fixtures for integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use bems_sim::building::{Building, Equipment, Floor, Hvac, Sensor, SensorKind};
use bems_sim::reporting::ReportSink;
use bems_sim::sim::engine::EngineSettings;
use bems_sim::sim::types::TickReport;
use chrono::NaiveDate;

/// Engine settings with a fixed seed, starting at the given wall time.
pub fn settings_at(h: u32, m: u32, seed: u64) -> EngineSettings {
    EngineSettings {
        start_time: NaiveDate::from_ymd_opt(2024, 1, 1)
            .expect("valid date")
            .and_hms_opt(h, m, 0)
            .expect("valid time"),
        seed: Some(seed),
        ..EngineSettings::default()
    }
}

/// One floor, one temperature sensor, one HVAC unit.
pub fn one_room_building() -> Building {
    let mut building = Building::new();
    let mut floor = Floor::new(1);
    floor.add_sensor(Sensor::new(SensorKind::Temperature, "TEMP1", "Floor 1"));
    building.add_floor(floor);
    building.add_equipment(Equipment::Hvac(Hvac::new("HVAC1", "Central HVAC")));
    building
}

/// Sink that appends every published report to a shared vector.
#[derive(Clone, Default)]
pub struct CollectingSink {
    reports: Arc<Mutex<Vec<TickReport>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<TickReport> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
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
