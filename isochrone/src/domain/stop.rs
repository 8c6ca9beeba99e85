//! Transit stops.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::GeoPoint;

/// A named stop at a fixed position: a vertex of the transit graph.
///
/// Stops are cheap to clone (the name is shared) and compare equal when
/// both name and position match exactly.
///
/// # Examples
///
/// ```
/// use isochrone::domain::{GeoPoint, Stop};
///
/// let flon = Stop::new("Lausanne-Flon", GeoPoint::from_degrees(6.6303, 46.5206).unwrap());
/// assert_eq!(flon.name(), "Lausanne-Flon");
/// assert_eq!(flon.to_string(), "Lausanne-Flon");
/// assert_eq!(flon.clone(), flon);
/// ```
#[derive(Clone)]
pub struct Stop {
    name: Arc<str>,
    position: GeoPoint,
}

impl Stop {
    /// Create a stop.
    pub fn new(name: impl Into<Arc<str>>, position: GeoPoint) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    /// Returns the stop name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stop position.
    pub fn position(&self) -> GeoPoint {
        self.position
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.position.bits() == other.position.bits()
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.position.bits().hash(state);
    }
}

impl fmt::Debug for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stop({} {})", self.name, self.position)
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn point(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint::from_degrees(lon, lat).unwrap()
    }

    #[test]
    fn equality_uses_name_and_position() {
        let a = Stop::new("EPFL", point(6.56591465573, 46.5221889086));
        let b = Stop::new("EPFL", point(6.56591465573, 46.5221889086));
        let renamed = Stop::new("Epfl", point(6.56591465573, 46.5221889086));
        let moved = Stop::new("EPFL", point(6.5659, 46.5221));
        assert_eq!(a, b);
        assert_ne!(a, renamed);
        assert_ne!(a, moved);
    }

    #[test]
    fn hash_consistent_with_eq() {
        let mut set = HashSet::new();
        set.insert(Stop::new("Stand", point(6.5624795866, 46.5327194855)));
        assert!(set.contains(&Stop::new("Stand", point(6.5624795866, 46.5327194855))));
        assert!(!set.contains(&Stop::new("EPFL", point(6.56591465573, 46.5221889086))));
    }

    #[test]
    fn debug_shows_position() {
        let stop = Stop::new("Origin", point(0.0, 0.0));
        assert_eq!(format!("{stop:?}"), "Stop(Origin (0,0))");
    }
}
