use chrono::NaiveDateTime;

/// The closed set of sensor variants the environment model knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Temperature,
    Humidity,
    Light,
    Power,
    Occupancy,
}

impl SensorKind {
    /// Returns a human-readable label for the sensor kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Light => "light",
            Self::Power => "power",
            Self::Occupancy => "occupancy",
        }
    }
}

/// One timestamped measurement. Constructed fresh each tick, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Id of the sensor that produced the reading.
    pub sensor_id: String,
    /// Simulated time at which the reading was taken.
    pub timestamp: NaiveDateTime,
    /// Measured value (unit depends on the sensor kind).
    pub value: f64,
}

impl SensorReading {
    /// Creates a new reading.
    pub fn new(sensor_id: impl Into<String>, timestamp: NaiveDateTime, value: f64) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            timestamp,
            value,
        }
    }
}

/// A sensor mounted somewhere in the building.
///
/// The current reading is absent until the first simulation tick and is
/// replaced wholesale by [`Sensor::record`] on every subsequent tick.
#[derive(Debug, Clone)]
pub struct Sensor {
    id: String,
    location: String,
    kind: SensorKind,
    reading: Option<SensorReading>,
}

impl Sensor {
    /// Creates a new sensor with no reading yet.
    pub fn new(kind: SensorKind, id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            kind,
            reading: None,
        }
    }

    /// Returns the sensor id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the mounting location description.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the sensor kind.
    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Returns the most recent reading, if any tick has produced one.
    pub fn current_reading(&self) -> Option<&SensorReading> {
        self.reading.as_ref()
    }

    /// Replaces the current reading with a freshly constructed one.
    pub fn record(&mut self, reading: SensorReading) {
        self.reading = Some(reading);
    }
}
