//! Fastest-path trees: the result of a routing query.

use std::collections::HashMap;

use crate::domain::{Stop, TimetableError};
use crate::domain::time::INFINITE;

/// Earliest arrival times and predecessors for every stop reached from a
/// starting stop.
///
/// Stops that were never reached are absent: their arrival time is
/// [`INFINITE`] and they have no path.
#[derive(Debug, Clone)]
pub struct FastestPathTree {
    starting_stop: Stop,
    arrival_time: HashMap<Stop, i32>,
    predecessor: HashMap<Stop, Option<Stop>>,
}

impl FastestPathTree {
    /// The stop the tree grows from.
    pub fn starting_stop(&self) -> &Stop {
        &self.starting_stop
    }

    /// Departure time from the starting stop.
    pub fn starting_time(&self) -> i32 {
        self.arrival_time(&self.starting_stop)
    }

    /// Stops with a known arrival time, in no particular order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.arrival_time.keys()
    }

    /// Number of stops in the tree.
    pub fn len(&self) -> usize {
        self.arrival_time.len()
    }

    /// Returns true if the tree holds no stops. A built tree always holds
    /// at least its starting stop.
    pub fn is_empty(&self) -> bool {
        self.arrival_time.is_empty()
    }

    /// Returns true if `stop` was reached.
    pub fn contains(&self, stop: &Stop) -> bool {
        self.arrival_time.contains_key(stop)
    }

    /// Earliest arrival time at `stop`, or [`INFINITE`] if unreached.
    pub fn arrival_time(&self, stop: &Stop) -> i32 {
        self.arrival_time.get(stop).copied().unwrap_or(INFINITE)
    }

    /// The stop preceding `stop` on its fastest path.
    ///
    /// `None` for the starting stop and for unreached stops.
    pub fn predecessor(&self, stop: &Stop) -> Option<&Stop> {
        self.predecessor.get(stop).and_then(Option::as_ref)
    }

    /// Stops on the fastest path to `stop`, starting stop first.
    pub fn path_to(&self, stop: &Stop) -> Result<Vec<Stop>, TimetableError> {
        if !self.contains(stop) {
            return Err(TimetableError::UnknownStop(stop.name().to_string()));
        }

        let mut path = vec![stop.clone()];
        let mut current = stop;
        while let Some(previous) = self.predecessor(current) {
            if path.len() > self.len() {
                return Err(TimetableError::BrokenPath(stop.name().to_string()));
            }
            path.push(previous.clone());
            current = previous;
        }
        path.reverse();
        Ok(path)
    }
}

/// Builds a [`FastestPathTree`] one arrival at a time.
#[derive(Debug, Clone)]
pub struct FastestPathTreeBuilder {
    starting_time: i32,
    tree: FastestPathTree,
}

impl FastestPathTreeBuilder {
    /// Start a tree at `starting_stop`, leaving at `starting_time`.
    pub fn new(starting_stop: Stop, starting_time: i32) -> Result<Self, TimetableError> {
        if starting_time < 0 {
            return Err(TimetableError::InvalidStart(starting_time));
        }
        let tree = FastestPathTree {
            arrival_time: HashMap::from([(starting_stop.clone(), starting_time)]),
            predecessor: HashMap::from([(starting_stop.clone(), None)]),
            starting_stop,
        };
        Ok(Self {
            starting_time,
            tree,
        })
    }

    /// Record that `stop` is reached at `time` coming from `predecessor`.
    ///
    /// Replaces any earlier record for `stop`.
    pub fn set_arrival_time(
        &mut self,
        stop: Stop,
        time: i32,
        predecessor: Stop,
    ) -> Result<&mut Self, TimetableError> {
        if time < self.starting_time {
            return Err(TimetableError::ArrivalBeforeStart {
                stop: stop.name().to_string(),
                time,
                start: self.starting_time,
            });
        }
        // The starting stop is the root of every path.
        if stop == self.tree.starting_stop {
            return Err(TimetableError::BrokenPath(stop.name().to_string()));
        }
        if !self.tree.contains(&predecessor) {
            return Err(TimetableError::UnknownStop(predecessor.name().to_string()));
        }
        self.tree.arrival_time.insert(stop.clone(), time);
        self.tree.predecessor.insert(stop, Some(predecessor));
        Ok(self)
    }

    /// Arrival time recorded so far for `stop`, or [`INFINITE`].
    pub fn arrival_time(&self, stop: &Stop) -> i32 {
        self.tree.arrival_time(stop)
    }

    /// Freeze the tree.
    pub fn build(self) -> FastestPathTree {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;

    fn stop(name: &str) -> Stop {
        Stop::new(name, GeoPoint::from_degrees(6.6, 46.5).unwrap())
    }

    #[test]
    fn negative_start_rejected() {
        assert_eq!(
            FastestPathTreeBuilder::new(stop("Stand"), -1).unwrap_err(),
            TimetableError::InvalidStart(-1)
        );
    }

    #[test]
    fn arrival_before_start_rejected() {
        let mut builder = FastestPathTreeBuilder::new(stop("Stand"), 10).unwrap();
        let err = builder
            .set_arrival_time(stop("EPFL"), 8, stop("Stand"))
            .unwrap_err();
        assert!(matches!(err, TimetableError::ArrivalBeforeStart { time: 8, start: 10, .. }));
    }

    #[test]
    fn unknown_predecessor_rejected() {
        let mut builder = FastestPathTreeBuilder::new(stop("Stand"), 10).unwrap();
        assert_eq!(
            builder.set_arrival_time(stop("EPFL"), 20, stop("Ours")).unwrap_err(),
            TimetableError::UnknownStop("Ours".into())
        );
    }

    #[test]
    fn starting_stop_cannot_be_reparented() {
        let mut builder = FastestPathTreeBuilder::new(stop("Stand"), 10).unwrap();
        builder.set_arrival_time(stop("EPFL"), 20, stop("Stand")).unwrap();
        assert_eq!(
            builder.set_arrival_time(stop("Stand"), 30, stop("EPFL")).unwrap_err(),
            TimetableError::BrokenPath("Stand".into())
        );
        assert_eq!(builder.build().predecessor(&stop("Stand")), None);
    }

    #[test]
    fn starting_stop_only() {
        let tree = FastestPathTreeBuilder::new(stop("Stand"), 100).unwrap().build();
        assert_eq!(tree.starting_stop(), &stop("Stand"));
        assert_eq!(tree.starting_time(), 100);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.predecessor(&stop("Stand")), None);
        assert_eq!(tree.path_to(&stop("Stand")).unwrap(), vec![stop("Stand")]);
    }

    #[test]
    fn path_follows_predecessors() {
        let mut builder = FastestPathTreeBuilder::new(stop("A"), 0).unwrap();
        builder
            .set_arrival_time(stop("B"), 10, stop("A"))
            .unwrap()
            .set_arrival_time(stop("C"), 20, stop("B"))
            .unwrap()
            .set_arrival_time(stop("D"), 15, stop("A"))
            .unwrap();
        assert_eq!(builder.arrival_time(&stop("C")), 20);
        let tree = builder.build();

        assert_eq!(tree.path_to(&stop("C")).unwrap(), vec![stop("A"), stop("B"), stop("C")]);
        assert_eq!(tree.path_to(&stop("D")).unwrap(), vec![stop("A"), stop("D")]);
        assert_eq!(tree.predecessor(&stop("C")), Some(&stop("B")));
        let mut names: Vec<&str> = tree.stops().map(Stop::name).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn unreached_stop() {
        let tree = FastestPathTreeBuilder::new(stop("A"), 0).unwrap().build();
        assert_eq!(tree.arrival_time(&stop("Z")), INFINITE);
        assert_eq!(
            tree.path_to(&stop("Z")).unwrap_err(),
            TimetableError::UnknownStop("Z".into())
        );
    }

    #[test]
    fn later_record_replaces_earlier() {
        let mut builder = FastestPathTreeBuilder::new(stop("A"), 0).unwrap();
        builder.set_arrival_time(stop("B"), 50, stop("A")).unwrap();
        builder.set_arrival_time(stop("C"), 10, stop("A")).unwrap();
        builder.set_arrival_time(stop("B"), 30, stop("C")).unwrap();
        let tree = builder.build();
        assert_eq!(tree.arrival_time(&stop("B")), 30);
        assert_eq!(tree.path_to(&stop("B")).unwrap(), vec![stop("A"), stop("C"), stop("B")]);
    }

    #[test]
    fn looping_chain_detected() {
        let mut builder = FastestPathTreeBuilder::new(stop("A"), 0).unwrap();
        builder.set_arrival_time(stop("B"), 10, stop("A")).unwrap();
        builder.set_arrival_time(stop("C"), 10, stop("B")).unwrap();
        builder.set_arrival_time(stop("B"), 10, stop("C")).unwrap();
        let tree = builder.build();
        assert_eq!(
            tree.path_to(&stop("C")).unwrap_err(),
            TimetableError::BrokenPath("C".into())
        );
    }
}
