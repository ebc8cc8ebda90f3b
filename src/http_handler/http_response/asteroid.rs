use super::response_common::SerdeJSONBodyHTTPResponseType;

/// A single near-Earth object as returned by the lookup endpoint and embedded
/// in the weekly feed. Immutable once received; a newer query replaces it
/// wholesale.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct AsteroidRecord {
    id: String,
    name: String,
    absolute_magnitude_h: f64,
    estimated_diameter: EstimatedDiameter,
    is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    close_approach_data: Vec<CloseApproachEvent>,
    /// Present on lookup responses; the weekly feed omits it.
    #[serde(default)]
    orbital_data: Option<OrbitalData>,
}

impl SerdeJSONBodyHTTPResponseType for AsteroidRecord {}

impl AsteroidRecord {
    pub fn id(&self) -> &str { self.id.as_str() }
    pub fn name(&self) -> &str { self.name.as_str() }
    pub fn absolute_magnitude(&self) -> f64 { self.absolute_magnitude_h }
    pub fn estimated_diameter(&self) -> &EstimatedDiameter { &self.estimated_diameter }
    pub fn is_hazardous(&self) -> bool { self.is_potentially_hazardous_asteroid }
    pub fn close_approaches(&self) -> &[CloseApproachEvent] { &self.close_approach_data }
    pub fn orbital_data(&self) -> Option<&OrbitalData> { self.orbital_data.as_ref() }

    /// The earliest listed close approach (index 0). The feed view summarizes
    /// each record by this event alone.
    pub fn first_approach(&self) -> Option<&CloseApproachEvent> {
        self.close_approach_data.first()
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct EstimatedDiameter {
    kilometers: DiameterRange,
    meters: DiameterRange,
}

impl EstimatedDiameter {
    pub fn kilometers(&self) -> &DiameterRange { &self.kilometers }
    pub fn meters(&self) -> &DiameterRange { &self.meters }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct DiameterRange {
    estimated_diameter_min: f64,
    estimated_diameter_max: f64,
}

impl DiameterRange {
    pub fn min(&self) -> f64 { self.estimated_diameter_min }
    pub fn max(&self) -> f64 { self.estimated_diameter_max }
}

/// One close approach of a record. Velocity and distance arrive as decimal
/// strings and are parsed at the formatting boundary.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct CloseApproachEvent {
    close_approach_date_full: String,
    relative_velocity: RelativeVelocity,
    miss_distance: MissDistance,
}

impl CloseApproachEvent {
    pub fn date_full(&self) -> &str { self.close_approach_date_full.as_str() }
    pub fn velocity_kms(&self) -> &str { self.relative_velocity.kilometers_per_second.as_str() }
    pub fn miss_distance_km(&self) -> &str { self.miss_distance.kilometers.as_str() }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct RelativeVelocity {
    kilometers_per_second: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct MissDistance {
    kilometers: String,
}

/// Orbital parameters, all decimal strings convertible to float.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct OrbitalData {
    eccentricity: String,
    semi_major_axis: String,
    orbital_period: String,
    perihelion_distance: String,
    aphelion_distance: String,
    inclination: String,
    orbit_class: OrbitClass,
}

impl OrbitalData {
    pub fn eccentricity(&self) -> &str { self.eccentricity.as_str() }
    pub fn semi_major_axis(&self) -> &str { self.semi_major_axis.as_str() }
    pub fn orbital_period(&self) -> &str { self.orbital_period.as_str() }
    pub fn perihelion_distance(&self) -> &str { self.perihelion_distance.as_str() }
    pub fn aphelion_distance(&self) -> &str { self.aphelion_distance.as_str() }
    pub fn inclination(&self) -> &str { self.inclination.as_str() }
    pub fn orbit_class(&self) -> &OrbitClass { &self.orbit_class }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct OrbitClass {
    orbit_class_type: String,
    orbit_class_description: String,
}

impl OrbitClass {
    pub fn class_type(&self) -> &str { self.orbit_class_type.as_str() }
    pub fn description(&self) -> &str { self.orbit_class_description.as_str() }
}
