//! Building and floor topology.
//!
//! The topology is constructed once before a run and stays structurally
//! fixed; only the contained sensors and equipment mutate tick to tick.

use super::equipment::Equipment;
use super::sensor::{Sensor, SensorKind};
use super::space::Space;

/// One floor of the building, identified by an integer floor number.
///
/// Floor numbers are not required to be unique; the sample layout uses 1..=5.
#[derive(Debug, Clone)]
pub struct Floor {
    number: u32,
    spaces: Vec<Space>,
    sensors: Vec<Sensor>,
}

impl Floor {
    /// Creates an empty floor.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            spaces: Vec::new(),
            sensors: Vec::new(),
        }
    }

    /// Returns the floor number.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn add_space(&mut self, space: Space) {
        self.spaces.push(space);
    }

    pub fn add_sensor(&mut self, sensor: Sensor) {
        self.sensors.push(sensor);
    }

    /// Returns the spaces on this floor, in insertion order.
    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    /// Returns the sensors on this floor, in insertion order.
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Returns mutable access to the sensors for the environment update.
    pub fn sensors_mut(&mut self) -> &mut [Sensor] {
        &mut self.sensors
    }
}

/// The whole building: an ordered set of floors plus shared equipment.
#[derive(Debug, Clone, Default)]
pub struct Building {
    floors: Vec<Floor>,
    equipment: Vec<Equipment>,
}

impl Building {
    /// Creates an empty building.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_floor(&mut self, floor: Floor) {
        self.floors.push(floor);
    }

    pub fn add_equipment(&mut self, equipment: Equipment) {
        self.equipment.push(equipment);
    }

    /// Returns the floors, in insertion order.
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    /// Returns mutable access to the floors for the environment update.
    pub fn floors_mut(&mut self) -> &mut [Floor] {
        &mut self.floors
    }

    /// Returns the equipment units, in insertion order.
    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    /// Returns mutable access to the equipment for the policy update.
    pub fn equipment_mut(&mut self) -> &mut [Equipment] {
        &mut self.equipment
    }

    /// Iterates over every sensor on every floor.
    pub fn sensors(&self) -> impl Iterator<Item = &Sensor> {
        self.floors.iter().flat_map(|floor| floor.sensors().iter())
    }

    /// Averages the current readings of all sensors of the given kind.
    ///
    /// Returns `None` when no sensor of that kind has a reading yet; callers
    /// supply their own default in that case.
    pub fn average_reading(&self, kind: SensorKind) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for sensor in self.sensors() {
            if sensor.kind() == kind
                && let Some(reading) = sensor.current_reading()
            {
                sum += reading.value;
                count += 1;
            }
        }
        (count > 0).then(|| sum / count as f64)
    }

    /// Sums the derived consumption of every equipment unit, in watts.
    pub fn total_consumption_w(&self) -> f64 {
        self.equipment.iter().map(Equipment::consumption_w).sum()
    }
}
