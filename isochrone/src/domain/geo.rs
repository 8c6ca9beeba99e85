//! WGS84 geographic points.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use geo::{Distance, HaversineMeasure, Point};

use super::TimetableError;

/// Equatorial radius of the Earth in metres.
const EARTH_RADIUS: f64 = 6_378_137.0;

/// A point on the WGS84 ellipsoid, in radians.
///
/// Longitude lies in `[-π, π]` and latitude in `[-π/2, π/2]`.
#[derive(Clone, Copy, PartialEq)]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    /// Create a point from longitude and latitude in radians.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, TimetableError> {
        if !(-PI..=PI).contains(&longitude) || !(-FRAC_PI_2..=FRAC_PI_2).contains(&latitude) {
            return Err(TimetableError::InvalidPosition {
                longitude,
                latitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Create a point from longitude and latitude in degrees.
    pub fn from_degrees(longitude: f64, latitude: f64) -> Result<Self, TimetableError> {
        Self::new(longitude.to_radians(), latitude.to_radians())
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Great-circle distance to `other` in metres (haversine formula).
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        HaversineMeasure::new(EARTH_RADIUS).distance(self.to_point(), other.to_point())
    }

    /// As a `geo` point in degrees.
    fn to_point(self) -> Point<f64> {
        Point::new(self.longitude.to_degrees(), self.latitude.to_degrees())
    }

    pub(crate) fn bits(&self) -> (u64, u64) {
        (self.longitude.to_bits(), self.latitude.to_bits())
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint{self}")
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})",
            self.longitude.to_degrees(),
            self.latitude.to_degrees()
        )
    }
}
