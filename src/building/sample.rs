//! Fixed sample building layout used by the CLI and the tests.

use super::equipment::{Elevator, Equipment, Hvac, Lighting};
use super::sensor::{Sensor, SensorKind};
use super::space::{Space, SpaceType};
use super::topology::{Building, Floor};

/// Number of floors in the sample layout.
const SAMPLE_FLOORS: u32 = 5;

/// Builds the five-floor office building the simulator ships with.
///
/// Each floor carries an office, a meeting room, and a lounge, plus one
/// sensor of every kind. The building shares one HVAC unit, one lighting
/// system, and one elevator.
pub fn sample_building() -> Building {
    let mut building = Building::new();

    for i in 1..=SAMPLE_FLOORS {
        let mut floor = Floor::new(i);
        floor.add_space(Space::new(format!("Office {i}"), 600.0, SpaceType::Office));
        floor.add_space(Space::new(
            format!("Meeting Room {i}"),
            200.0,
            SpaceType::MeetingRoom,
        ));
        floor.add_space(Space::new(format!("Lounge {i}"), 100.0, SpaceType::Lounge));

        let location = format!("Floor {i}");
        floor.add_sensor(Sensor::new(
            SensorKind::Temperature,
            format!("TEMP{i}"),
            &location,
        ));
        floor.add_sensor(Sensor::new(
            SensorKind::Humidity,
            format!("HUM{i}"),
            &location,
        ));
        floor.add_sensor(Sensor::new(
            SensorKind::Light,
            format!("LIGHT{i}"),
            &location,
        ));
        floor.add_sensor(Sensor::new(
            SensorKind::Power,
            format!("POWER{i}"),
            &location,
        ));
        floor.add_sensor(Sensor::new(
            SensorKind::Occupancy,
            format!("OCC{i}"),
            &location,
        ));

        building.add_floor(floor);
    }

    building.add_equipment(Equipment::Hvac(Hvac::new("HVAC1", "Central HVAC")));
    building.add_equipment(Equipment::Lighting(Lighting::new(
        "LIGHT1",
        "Central Lighting",
    )));
    building.add_equipment(Equipment::Elevator(Elevator::new("ELEV1", "Elevator 1")));

    building
}
