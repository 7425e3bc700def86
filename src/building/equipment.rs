//! Equipment models with derived power consumption.
//!
//! Consumption is always computed from the current state, never stored.

/// HVAC consumption while running (W).
const HVAC_RUNNING_W: f64 = 5000.0;
/// Lighting consumption per brightness percent while running (W).
const LIGHTING_W_PER_PCT: f64 = 2.0;
/// Elevator consumption while running (W).
const ELEVATOR_RUNNING_W: f64 = 2000.0;
/// Elevator standby draw while off (W).
const ELEVATOR_STANDBY_W: f64 = 100.0;

/// Central heating, ventilation, and air conditioning unit.
#[derive(Debug, Clone)]
pub struct Hvac {
    id: String,
    name: String,
    running: bool,
    target_temp_c: f64,
}

impl Hvac {
    /// Creates a new HVAC unit, off, with a 22.0 degree target.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            running: false,
            target_temp_c: 22.0,
        }
    }

    pub fn turn_on(&mut self) {
        self.running = true;
    }

    pub fn turn_off(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the current temperature target in degrees Celsius.
    pub fn target_temp_c(&self) -> f64 {
        self.target_temp_c
    }

    /// Sets the temperature target in degrees Celsius.
    pub fn set_target_temp_c(&mut self, temp_c: f64) {
        self.target_temp_c = temp_c;
    }

    /// Returns the instantaneous power draw in watts.
    pub fn consumption_w(&self) -> f64 {
        if self.running { HVAC_RUNNING_W } else { 0.0 }
    }
}

/// Central lighting system with a dimmable brightness level.
#[derive(Debug, Clone)]
pub struct Lighting {
    id: String,
    name: String,
    running: bool,
    brightness_pct: u8,
}

impl Lighting {
    /// Creates a new lighting system, off, at full brightness.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            running: false,
            brightness_pct: 100,
        }
    }

    pub fn turn_on(&mut self) {
        self.running = true;
    }

    pub fn turn_off(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the brightness level in percent.
    pub fn brightness_pct(&self) -> u8 {
        self.brightness_pct
    }

    /// Sets the brightness level, clamping any input into [0, 100].
    pub fn set_brightness(&mut self, pct: i32) {
        self.brightness_pct = pct.clamp(0, 100) as u8;
    }

    /// Returns the instantaneous power draw in watts.
    pub fn consumption_w(&self) -> f64 {
        if self.running {
            f64::from(self.brightness_pct) * LIGHTING_W_PER_PCT
        } else {
            0.0
        }
    }
}

/// An elevator that keeps a standby draw even when nominally off.
#[derive(Debug, Clone)]
pub struct Elevator {
    id: String,
    name: String,
    running: bool,
    current_floor: u32,
}

impl Elevator {
    /// Creates a new elevator, off, parked at floor 1.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            running: false,
            current_floor: 1,
        }
    }

    pub fn turn_on(&mut self) {
        self.running = true;
    }

    pub fn turn_off(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the floor the elevator is currently at.
    pub fn current_floor(&self) -> u32 {
        self.current_floor
    }

    /// Moves the elevator to the given floor.
    pub fn move_to_floor(&mut self, floor: u32) {
        self.current_floor = floor;
    }

    /// Returns the instantaneous power draw in watts.
    pub fn consumption_w(&self) -> f64 {
        if self.running {
            ELEVATOR_RUNNING_W
        } else {
            ELEVATOR_STANDBY_W
        }
    }
}

/// Closed set of equipment variants.
///
/// Enum dispatch keeps the variant-specific state typed while the policy and
/// the aggregator work against the common surface.
#[derive(Debug, Clone)]
pub enum Equipment {
    Hvac(Hvac),
    Lighting(Lighting),
    Elevator(Elevator),
}

impl Equipment {
    /// Returns the equipment id.
    pub fn id(&self) -> &str {
        match self {
            Self::Hvac(e) => &e.id,
            Self::Lighting(e) => &e.id,
            Self::Elevator(e) => &e.id,
        }
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Hvac(e) => &e.name,
            Self::Lighting(e) => &e.name,
            Self::Elevator(e) => &e.name,
        }
    }

    /// Returns whether the unit is running.
    pub fn is_running(&self) -> bool {
        match self {
            Self::Hvac(e) => e.is_running(),
            Self::Lighting(e) => e.is_running(),
            Self::Elevator(e) => e.is_running(),
        }
    }

    pub fn turn_on(&mut self) {
        match self {
            Self::Hvac(e) => e.turn_on(),
            Self::Lighting(e) => e.turn_on(),
            Self::Elevator(e) => e.turn_on(),
        }
    }

    pub fn turn_off(&mut self) {
        match self {
            Self::Hvac(e) => e.turn_off(),
            Self::Lighting(e) => e.turn_off(),
            Self::Elevator(e) => e.turn_off(),
        }
    }

    /// Returns the instantaneous power draw in watts, derived from state.
    pub fn consumption_w(&self) -> f64 {
        match self {
            Self::Hvac(e) => e.consumption_w(),
            Self::Lighting(e) => e.consumption_w(),
            Self::Elevator(e) => e.consumption_w(),
        }
    }
}
