//! Domain model for the simulated building.

/// Equipment models: HVAC, lighting, elevator.
pub mod equipment;
/// Fixed sample building layout.
pub mod sample;
/// Sensors and their readings.
pub mod sensor;
/// Spaces within a floor.
pub mod space;
/// Building and floor topology.
pub mod topology;

// Re-export the main types for convenience
pub use equipment::{Elevator, Equipment, Hvac, Lighting};
pub use sample::sample_building;
pub use sensor::{Sensor, SensorKind, SensorReading};
pub use space::{Space, SpaceType};
pub use topology::{Building, Floor};
