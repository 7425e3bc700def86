//! Threshold control policy for building equipment.
//!
//! Runs after the environment update, so the aggregates it reads always
//! reflect the current tick.

use chrono::NaiveTime;
use rand::{Rng, rngs::StdRng};

use crate::building::{Building, Equipment, SensorKind};

use super::clock::WorkingHours;

/// Temperature gap beyond which the HVAC target takes a damped step.
const HVAC_DEADBAND_C: f64 = 0.5;
/// Average light level when no light sensor has reported yet.
const DEFAULT_LIGHT_LUX: f64 = 500.0;

/// Updates the running flag and variant state of every equipment unit.
///
/// `setpoint_c` is the configured HVAC comfort temperature; it doubles as
/// the average-temperature fallback so a sensorless building reads as
/// on-target.
pub fn update_equipment(
    building: &mut Building,
    time: NaiveTime,
    hours: &WorkingHours,
    setpoint_c: f64,
    rng: &mut StdRng,
) {
    let working = hours.contains(time);
    let avg_temp_c = building
        .average_reading(SensorKind::Temperature)
        .unwrap_or(setpoint_c);
    let avg_light_lux = building
        .average_reading(SensorKind::Light)
        .unwrap_or(DEFAULT_LIGHT_LUX);
    let floor_count = building.floors().len() as u32;

    for unit in building.equipment_mut() {
        match unit {
            Equipment::Hvac(hvac) => {
                if working {
                    hvac.turn_on();
                    hvac.set_target_temp_c(hvac_target_c(avg_temp_c, setpoint_c));
                } else {
                    hvac.turn_off();
                }
            }
            Equipment::Lighting(lighting) => {
                if working {
                    lighting.turn_on();
                    lighting.set_brightness(brightness_for(avg_light_lux));
                } else {
                    lighting.turn_off();
                }
            }
            Equipment::Elevator(elevator) => {
                if working {
                    elevator.turn_on();
                    if floor_count > 0 {
                        elevator.move_to_floor(rng.random_range(1..=floor_count));
                    }
                } else {
                    elevator.turn_off();
                }
            }
        }
    }
}

/// Damped HVAC target step.
///
/// Outside the deadband the target moves one degree toward the setpoint
/// rather than snapping to it; inside, it rests at the setpoint exactly.
pub fn hvac_target_c(avg_temp_c: f64, setpoint_c: f64) -> f64 {
    if (avg_temp_c - setpoint_c).abs() > HVAC_DEADBAND_C {
        if setpoint_c > avg_temp_c {
            setpoint_c + 1.0
        } else {
            setpoint_c - 1.0
        }
    } else {
        setpoint_c
    }
}

/// Brightness percent for an average light level: darker rooms get more.
pub fn brightness_for(avg_light_lux: f64) -> i32 {
    if avg_light_lux < 400.0 {
        100
    } else if avg_light_lux < 500.0 {
        75
    } else {
        50
    }
}
