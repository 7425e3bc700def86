//! Tick snapshot types handed to reporting sinks.

use std::fmt;

use chrono::NaiveDateTime;

use crate::building::{Building, SensorKind};

/// One sensor's contribution to a tick report.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSample {
    /// Number of the floor the sensor sits on.
    pub floor: u32,
    /// Sensor id.
    pub sensor_id: String,
    /// Sensor kind.
    pub kind: SensorKind,
    /// Reading value; `None` for a sensor no tick has updated yet.
    pub value: Option<f64>,
}

/// One equipment unit's status within a tick report.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentStatus {
    /// Equipment id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the unit was running after the policy step.
    pub running: bool,
    /// Derived instantaneous draw in watts.
    pub consumption_w: f64,
}

/// Immutable snapshot of one completed tick.
///
/// The snapshot owns deep copies of everything it carries, so a reporter
/// holding one can never race the next tick's mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Simulated time of the tick.
    pub timestamp: NaiveDateTime,
    /// Sum of all equipment draw, in watts.
    pub total_consumption_w: f64,
    /// Per-sensor readings, floor by floor in topology order.
    pub sensors: Vec<SensorSample>,
    /// Per-equipment status, in topology order.
    pub equipment: Vec<EquipmentStatus>,
}

impl TickReport {
    /// Captures the building state at the end of a tick.
    ///
    /// The per-equipment consumption entries are the same derived values the
    /// total is summed from, so the two always agree exactly.
    pub fn snapshot(timestamp: NaiveDateTime, building: &Building) -> Self {
        let sensors = building
            .floors()
            .iter()
            .flat_map(|floor| {
                floor.sensors().iter().map(move |sensor| SensorSample {
                    floor: floor.number(),
                    sensor_id: sensor.id().to_string(),
                    kind: sensor.kind(),
                    value: sensor.current_reading().map(|r| r.value),
                })
            })
            .collect();

        let equipment: Vec<EquipmentStatus> = building
            .equipment()
            .iter()
            .map(|unit| EquipmentStatus {
                id: unit.id().to_string(),
                name: unit.name().to_string(),
                running: unit.is_running(),
                consumption_w: unit.consumption_w(),
            })
            .collect();

        let total_consumption_w = equipment.iter().map(|e| e.consumption_w).sum();

        Self {
            timestamp,
            total_consumption_w,
            sensors,
            equipment,
        }
    }

    /// Returns the total consumption in kilowatts.
    pub fn total_consumption_kw(&self) -> f64 {
        self.total_consumption_w / 1000.0
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let running = self.equipment.iter().filter(|e| e.running).count();
        write!(
            f,
            "{} | total={:.2} kW | {} sensors, {}/{} equipment running",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.total_consumption_kw(),
            self.sensors.len(),
            running,
            self.equipment.len(),
        )
    }
}
