//! Graph edges and the packed trip encoding.
//!
//! Each edge stores its scheduled trips as single integers,
//! `departure * 10_000 + duration`. Since a duration never reaches 10 000
//! seconds, sorting the packed values sorts trips by departure and then by
//! duration, which lets [`GraphEdge::earliest_arrival_time`] binary-search
//! for the first trip leaving after a given time.

use std::collections::HashSet;

use crate::domain::TimetableError;
use crate::domain::time::{INFINITE, MAX_SECONDS};

use super::StopId;

const SHIFT: i32 = 10_000;
const MAX_DURATION: i32 = 9_999;

/// Pack a trip departing at `departure` and arriving at `arrival`.
///
/// # Examples
///
/// ```
/// use isochrone::graph::{pack_trip, unpack_arrival, unpack_departure, unpack_duration};
///
/// let packed = pack_trip(22_080, 22_152).unwrap();
/// assert_eq!(packed, 220_800_072);
/// assert_eq!(unpack_departure(packed), 22_080);
/// assert_eq!(unpack_duration(packed), 72);
/// assert_eq!(unpack_arrival(packed), 22_152);
///
/// // Trips longer than 9 999 seconds cannot be packed
/// assert!(pack_trip(0, 10_000).is_err());
/// ```
pub fn pack_trip(departure: i32, arrival: i32) -> Result<i32, TimetableError> {
    let duration = arrival.checked_sub(departure);
    match duration {
        Some(duration)
            if (0..=MAX_SECONDS).contains(&departure) && (0..=MAX_DURATION).contains(&duration) =>
        {
            Ok(departure * SHIFT + duration)
        }
        _ => Err(TimetableError::InvalidTrip { departure, arrival }),
    }
}

/// Departure time of a packed trip.
pub fn unpack_departure(packed: i32) -> i32 {
    packed.div_euclid(SHIFT)
}

/// Duration of a packed trip.
pub fn unpack_duration(packed: i32) -> i32 {
    packed.rem_euclid(SHIFT)
}

/// Arrival time of a packed trip.
pub fn unpack_arrival(packed: i32) -> i32 {
    unpack_departure(packed) + unpack_duration(packed)
}

/// A directed edge: a walking connection, scheduled trips, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    destination: StopId,
    walking_time: Option<i32>,
    trips: Box<[i32]>,
}

impl GraphEdge {
    /// Create an edge from a walking time and packed trips.
    ///
    /// Trips are sorted and deduplicated; invalid packed values are rejected.
    pub fn new(
        destination: StopId,
        walking_time: Option<i32>,
        trips: impl IntoIterator<Item = i32>,
    ) -> Result<Self, TimetableError> {
        if let Some(time) = walking_time.filter(|t| *t < 0) {
            return Err(TimetableError::InvalidWalkingTime(time));
        }

        let mut trips: Vec<i32> = trips.into_iter().collect();
        for &packed in &trips {
            pack_trip(unpack_departure(packed), unpack_arrival(packed))?;
        }
        trips.sort_unstable();
        trips.dedup();

        Ok(Self {
            destination,
            walking_time,
            trips: trips.into_boxed_slice(),
        })
    }

    /// The stop this edge leads to.
    pub fn destination(&self) -> StopId {
        self.destination
    }

    /// Walking time in seconds, if the destination is walkable.
    pub fn walking_time(&self) -> Option<i32> {
        self.walking_time
    }

    /// Packed trips in ascending order.
    pub fn trips(&self) -> &[i32] {
        &self.trips
    }

    /// Earliest arrival at the destination when leaving at `departure`.
    ///
    /// Combines walking with the best trip departing no earlier than
    /// `departure`. Returns [`INFINITE`] when neither is possible.
    pub fn earliest_arrival_time(&self, departure: i32) -> i32 {
        let mut best = match self.walking_time {
            Some(walk) => departure.saturating_add(walk),
            None => INFINITE,
        };

        let shift = i64::from(SHIFT);
        let lower = i64::from(departure) * shift;
        let first = self.trips.partition_point(|&p| i64::from(p) < lower);

        // Trips leaving at or after the best arrival cannot improve on it.
        for &packed in &self.trips[first..] {
            if i64::from(packed) >= i64::from(best) * shift {
                break;
            }
            best = best.min(unpack_arrival(packed));
        }

        best.min(INFINITE)
    }
}

/// Accumulates the trips and walking time of one edge.
#[derive(Debug, Clone)]
pub struct GraphEdgeBuilder {
    destination: StopId,
    walking_time: Option<i32>,
    trips: HashSet<i32>,
}

impl GraphEdgeBuilder {
    /// Start an edge leading to `destination`.
    pub fn new(destination: StopId) -> Self {
        Self {
            destination,
            walking_time: None,
            trips: HashSet::new(),
        }
    }

    /// Set the walking time, replacing any previous one.
    pub fn set_walking_time(&mut self, walking_time: i32) -> Result<&mut Self, TimetableError> {
        if walking_time < 0 {
            return Err(TimetableError::InvalidWalkingTime(walking_time));
        }
        self.walking_time = Some(walking_time);
        Ok(self)
    }

    /// Add a scheduled trip. Identical trips are kept once.
    pub fn add_trip(&mut self, departure: i32, arrival: i32) -> Result<&mut Self, TimetableError> {
        self.trips.insert(pack_trip(departure, arrival)?);
        Ok(self)
    }

    /// Freeze into a sorted [`GraphEdge`].
    pub fn build(self) -> GraphEdge {
        let mut trips: Vec<i32> = self.trips.into_iter().collect();
        trips.sort_unstable();
        GraphEdge {
            destination: self.destination,
            walking_time: self.walking_time,
            trips: trips.into_boxed_slice(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn trip() -> impl Strategy<Value = (i32, i32)> {
        (0..=MAX_SECONDS, 0..=MAX_DURATION).prop_map(|(dep, dur)| (dep, dep + dur))
    }

    proptest! {
        /// Packing then unpacking returns departure and duration
        #[test]
        fn codec_roundtrip((dep, arr) in trip()) {
            let packed = pack_trip(dep, arr).unwrap();
            prop_assert_eq!(unpack_departure(packed), dep);
            prop_assert_eq!(unpack_duration(packed), arr - dep);
            prop_assert_eq!(unpack_arrival(packed), arr);
        }

        /// Packed order is departure order, then duration order
        #[test]
        fn packed_order((d1, a1) in trip(), (d2, a2) in trip()) {
            let p1 = pack_trip(d1, a1).unwrap();
            let p2 = pack_trip(d2, a2).unwrap();
            prop_assert_eq!(p1.cmp(&p2), (d1, a1 - d1).cmp(&(d2, a2 - d2)));
        }

        /// Earliest arrival never precedes departure and matches a brute-force minimum
        #[test]
        fn earliest_arrival_matches_scan(
            walk in proptest::option::of(0..5_000i32),
            trips in proptest::collection::vec(trip(), 0..20),
            departure in 0..=MAX_SECONDS,
        ) {
            let mut builder = GraphEdgeBuilder::new(StopId(0));
            if let Some(w) = walk {
                builder.set_walking_time(w).unwrap();
            }
            for &(d, a) in &trips {
                builder.add_trip(d, a).unwrap();
            }
            let edge = builder.build();

            let walking = walk.map_or(INFINITE, |w| departure + w);
            let riding = trips
                .iter()
                .filter(|(d, _)| *d >= departure)
                .map(|(_, a)| *a)
                .min()
                .unwrap_or(INFINITE);
            let expected = walking.min(riding).min(INFINITE);

            let actual = edge.earliest_arrival_time(departure);
            prop_assert_eq!(actual, expected);
            prop_assert!(actual >= departure);
        }

        /// Leaving later never arrives earlier
        #[test]
        fn earliest_arrival_monotone(
            walk in proptest::option::of(0..5_000i32),
            trips in proptest::collection::vec(trip(), 0..20),
            departure in 0..MAX_SECONDS,
            delay in 0..3_600i32,
        ) {
            let mut builder = GraphEdgeBuilder::new(StopId(0));
            if let Some(w) = walk {
                builder.set_walking_time(w).unwrap();
            }
            for &(d, a) in &trips {
                builder.add_trip(d, a).unwrap();
            }
            let edge = builder.build();
            prop_assert!(
                edge.earliest_arrival_time(departure) <= edge.earliest_arrival_time(departure + delay)
            );
        }
    }
}
