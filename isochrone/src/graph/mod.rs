//! The transit graph and the fastest-path search over it.
//!
//! A [`Graph`] is built once by [`GraphBuilder`] from scheduled trips and
//! walking connections, then only read. [`Graph::fastest_paths`] runs a
//! time-dependent Dijkstra search: the cost of an edge depends on when the
//! traveller reaches its origin, and is evaluated by
//! [`GraphEdge::earliest_arrival_time`] at each relaxation.

mod edge;
mod queue;
mod tree;


use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::domain::time::INFINITE;
use crate::domain::{Stop, TimetableError};

use queue::IndexedMinQueue;

pub use edge::{
    GraphEdge, GraphEdgeBuilder, pack_trip, unpack_arrival, unpack_departure, unpack_duration,
};
pub use tree::{FastestPathTree, FastestPathTreeBuilder};

/// Dense index of a stop within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopId(pub usize);

/// An immutable adjacency structure over a set of stops.
#[derive(Debug, Clone)]
pub struct Graph {
    stops: Vec<Stop>,
    index: HashMap<Stop, StopId>,
    outgoing: Vec<Vec<GraphEdge>>,
}

impl Graph {
    /// The vertices of the graph.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns true if `stop` is a vertex of the graph.
    pub fn contains(&self, stop: &Stop) -> bool {
        self.index.contains_key(stop)
    }

    /// Index of `stop`, if it is a vertex.
    pub fn stop_id(&self, stop: &Stop) -> Option<StopId> {
        self.index.get(stop).copied()
    }

    /// The stop at `id`.
    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id.0)
    }

    /// Edges leaving `stop`.
    pub fn outgoing_edges(&self, stop: &Stop) -> Result<&[GraphEdge], TimetableError> {
        let id = self.require(stop)?;
        Ok(&self.outgoing[id.0])
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    /// Earliest arrival times at every stop reachable from `start` when
    /// leaving at `departure_time`.
    ///
    /// The search settles stops in order of arrival time and stops as soon
    /// as the next stop to settle is unreachable.
    pub fn fastest_paths(
        &self,
        start: &Stop,
        departure_time: i32,
    ) -> Result<FastestPathTree, TimetableError> {
        let start_id = self.require(start)?;
        let mut tree = FastestPathTreeBuilder::new(start.clone(), departure_time)?;

        let mut priorities = vec![INFINITE; self.stops.len()];
        priorities[start_id.0] = departure_time;
        let mut queue = IndexedMinQueue::with_priorities(priorities);

        let mut settled = 0usize;
        while let Some((u, arrival)) = queue.pop() {
            if arrival >= INFINITE {
                break;
            }
            settled += 1;

            for edge in &self.outgoing[u] {
                let v = edge.destination().0;
                // Settled stops are no longer queued.
                let Some(current) = queue.priority(v) else {
                    continue;
                };
                let candidate = edge.earliest_arrival_time(arrival);
                if candidate < current && queue.decrease_priority(v, candidate) {
                    tree.set_arrival_time(self.stops[v].clone(), candidate, self.stops[u].clone())?;
                }
            }
        }

        debug!(
            start = %start,
            departure_time,
            settled,
            unreached = queue.len(),
            "fastest paths computed"
        );

        Ok(tree.build())
    }

    fn require(&self, stop: &Stop) -> Result<StopId, TimetableError> {
        self.stop_id(stop)
            .ok_or_else(|| TimetableError::UnknownStop(stop.name().to_string()))
    }
}

/// Seconds needed to walk `distance` metres, rounded half to even, if that
/// is strictly less than `max_walking_time`.
fn walking_time(distance: f64, walking_speed: f64, max_walking_time: i32) -> Option<i32> {
    let time = (distance / walking_speed).round_ties_even();
    (time < f64::from(max_walking_time)).then_some(time as i32)
}

/// Accumulates trip and walking edges, then freezes them into a [`Graph`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    stops: Vec<Stop>,
    index: HashMap<Stop, StopId>,
    edges: Vec<BTreeMap<StopId, GraphEdgeBuilder>>,
}

impl GraphBuilder {
    /// Start a graph over `stops`. Duplicates are ignored.
    pub fn new(stops: impl IntoIterator<Item = Stop>) -> Self {
        let mut builder = Self {
            stops: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        };
        for stop in stops {
            if builder.index.contains_key(&stop) {
                continue;
            }
            builder.index.insert(stop.clone(), StopId(builder.stops.len()));
            builder.stops.push(stop);
            builder.edges.push(BTreeMap::new());
        }
        builder
    }

    /// Add a scheduled trip from `from` leaving at `departure` to `to`
    /// arriving at `arrival`.
    pub fn add_trip_edge(
        &mut self,
        from: &Stop,
        to: &Stop,
        departure: i32,
        arrival: i32,
    ) -> Result<&mut Self, TimetableError> {
        let from_id = self.require(from)?;
        let to_id = self.require(to)?;
        if departure < 0 || arrival < departure {
            return Err(TimetableError::InvalidTrip { departure, arrival });
        }
        self.edge_builder(from_id, to_id).add_trip(departure, arrival)?;
        Ok(self)
    }

    /// Connect every pair of stops whose walking time, at `walking_speed`
    /// metres per second, is below `max_walking_time` seconds.
    ///
    /// Walking edges are symmetric. This compares every pair of stops.
    pub fn add_all_walk_edges(
        &mut self,
        max_walking_time: i32,
        walking_speed: f64,
    ) -> Result<&mut Self, TimetableError> {
        if max_walking_time < 0 || !(walking_speed > 0.0) {
            return Err(TimetableError::InvalidWalkParameters {
                max_walking_time,
                walking_speed,
            });
        }

        let positions: Vec<_> = self.stops.iter().map(Stop::position).collect();
        let n = positions.len();

        let walks: Vec<(usize, usize, i32)> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                let positions = &positions;
                (i + 1..n).filter_map(move |j| {
                    let distance = positions[i].distance_to(&positions[j]);
                    walking_time(distance, walking_speed, max_walking_time)
                        .map(|time| (i, j, time))
                })
            })
            .collect();

        for &(i, j, time) in &walks {
            self.edge_builder(StopId(i), StopId(j)).set_walking_time(time)?;
            self.edge_builder(StopId(j), StopId(i)).set_walking_time(time)?;
        }

        trace!(pairs = walks.len(), max_walking_time, walking_speed, "walk edges added");
        Ok(self)
    }

    /// Freeze all accumulated edges.
    pub fn build(self) -> Graph {
        let outgoing: Vec<Vec<GraphEdge>> = self
            .edges
            .into_iter()
            .map(|edges| edges.into_values().map(GraphEdgeBuilder::build).collect())
            .collect();

        let graph = Graph {
            stops: self.stops,
            index: self.index,
            outgoing,
        };
        debug!(
            stops = graph.stops.len(),
            edges = graph.edge_count(),
            "graph built"
        );
        graph
    }

    fn require(&self, stop: &Stop) -> Result<StopId, TimetableError> {
        self.index
            .get(stop)
            .copied()
            .ok_or_else(|| TimetableError::UnknownStop(stop.name().to_string()))
    }

    fn edge_builder(&mut self, from: StopId, to: StopId) -> &mut GraphEdgeBuilder {
        self.edges[from.0]
            .entry(to)
            .or_insert_with(|| GraphEdgeBuilder::new(to))
    }
}
