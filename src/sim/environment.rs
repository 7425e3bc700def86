//! Synthetic sensor environment.
//!
//! Each tick produces one fresh reading per sensor, derived from the sensor
//! kind, the simulated time, and a bounded draw from the shared RNG.

use chrono::{NaiveDateTime, Timelike};
use rand::{Rng, rngs::StdRng};

use crate::building::{Building, SensorKind, SensorReading};

use super::clock::WorkingHours;

/// Fraction of working-hours minutes in which a space reads as occupied.
const OCCUPANCY_PROBABILITY: f64 = 0.8;

/// Writes a new reading into every sensor on every floor.
pub fn update_sensors(
    building: &mut Building,
    now: NaiveDateTime,
    hours: &WorkingHours,
    rng: &mut StdRng,
) {
    let working = hours.contains(now.time());
    let hour = now.hour();

    for floor in building.floors_mut() {
        for sensor in floor.sensors_mut() {
            let value = match sensor.kind() {
                SensorKind::Temperature => temperature_c(hour, rng),
                SensorKind::Humidity => humidity_pct(rng),
                SensorKind::Light => light_lux(working, rng),
                SensorKind::Power => power_w(working, rng),
                SensorKind::Occupancy => occupancy(working, rng),
            };
            let reading = SensorReading::new(sensor.id(), now, value);
            sensor.record(reading);
        }
    }
}

/// Uniform draw in `[lo, hi)`.
fn uniform(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    rng.random_range(lo..hi)
}

/// Indoor temperature: a daily sine around 22 degrees plus jitter.
pub fn temperature_c(hour: u32, rng: &mut StdRng) -> f64 {
    let time_variation = 2.0 * (f64::from(hour) * std::f64::consts::PI / 12.0).sin();
    22.0 + time_variation + uniform(rng, -0.25, 0.25)
}

/// Relative humidity around 50 percent, clamped to the plausible band.
pub fn humidity_pct(rng: &mut StdRng) -> f64 {
    (50.0 + uniform(rng, -2.5, 2.5)).clamp(30.0, 70.0)
}

/// Light level: 500 lux in working hours, 50 otherwise, never negative.
pub fn light_lux(working: bool, rng: &mut StdRng) -> f64 {
    let base = if working { 500.0 } else { 50.0 };
    (base + uniform(rng, -25.0, 25.0)).max(0.0)
}

/// Metered floor power: 5 kW in working hours, 1 kW otherwise, never negative.
pub fn power_w(working: bool, rng: &mut StdRng) -> f64 {
    let base = if working { 5000.0 } else { 1000.0 };
    (base + uniform(rng, -250.0, 250.0)).max(0.0)
}

/// Occupancy encoded as 1.0/0.0; spaces are empty outside working hours.
pub fn occupancy(working: bool, rng: &mut StdRng) -> f64 {
    if working && rng.random::<f64>() < OCCUPANCY_PROBABILITY {
        1.0
    } else {
        0.0
    }
}
