use serde::{Deserialize, Serialize};

/// A latitude/longitude pair. Values are validated on construction and on
/// deserialization; a `Coordinates` in hand is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawCoordinates {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.lat, raw.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    Latitude(f64),
    Longitude(f64),
}

impl std::fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateError::Latitude(value) => {
                write!(f, "latitude {value} is outside -90..90")
            }
            CoordinateError::Longitude(value) => {
                write!(f, "longitude {value} is outside -180..180")
            }
        }
    }
}

impl std::error::Error for CoordinateError {}

/// The outcome of a location resolution. `using_fallback` marks a recovered
/// failure; `reason` is then a non-empty human-readable explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationFix {
    pub coordinates: Coordinates,
    pub using_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    #[test]
    fn new__should_accept_in_range_values() {
        // When
        let coords = Coordinates::new(34.0517, -118.0732).expect("valid coordinates");

        // Then
        assert_eq!(coords.lat, 34.0517);
        assert_eq!(coords.lng, -118.0732);
    }

    #[test]
    fn new__should_reject_out_of_range_latitude() {
        // Then
        assert!(matches!(
            Coordinates::new(90.5, 0.0),
            Err(CoordinateError::Latitude(_))
        ));
        assert!(matches!(
            Coordinates::new(-91.0, 0.0),
            Err(CoordinateError::Latitude(_))
        ));
    }

    #[test]
    fn new__should_reject_out_of_range_longitude() {
        // Then
        assert!(matches!(
            Coordinates::new(0.0, 180.1),
            Err(CoordinateError::Longitude(_))
        ));
    }

    #[test]
    fn new__should_reject_nan() {
        // Then
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn deserialize__should_funnel_through_validation() {
        // Given
        let valid = r#"{"lat": 33.5, "lng": -118.0}"#;
        let invalid = r#"{"lat": 120.0, "lng": 0.0}"#;

        // When
        let coords: Coordinates = serde_json::from_str(valid).expect("valid json");

        // Then
        assert_eq!(coords.lat, 33.5);
        assert!(serde_json::from_str::<Coordinates>(invalid).is_err());
    }
}
