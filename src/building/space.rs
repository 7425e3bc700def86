/// Usage category of a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceType {
    Office,
    MeetingRoom,
    Lounge,
}

/// A named area on a floor. Immutable after creation.
#[derive(Debug, Clone)]
pub struct Space {
    name: String,
    area_m2: f64,
    space_type: SpaceType,
}

impl Space {
    /// Creates a new space.
    ///
    /// # Panics
    ///
    /// Panics if `area_m2` is not positive.
    pub fn new(name: impl Into<String>, area_m2: f64, space_type: SpaceType) -> Self {
        assert!(area_m2 > 0.0, "area_m2 must be > 0");
        Self {
            name: name.into(),
            area_m2,
            space_type,
        }
    }

    /// Returns the space name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the floor area in square meters.
    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    /// Returns the usage category.
    pub fn space_type(&self) -> SpaceType {
        self.space_type
    }
}
