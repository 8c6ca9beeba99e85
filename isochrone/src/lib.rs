//! Public-transit isochrone engine.
//!
//! Answers: "leaving this stop at this time on this date, how soon can I
//! reach every other stop?" Timetables are turned into a time-dependent
//! graph for one day, and a Dijkstra search over it produces a tree of
//! earliest arrivals and the paths that achieve them.

pub mod domain;
pub mod graph;
pub mod planner;
pub mod sample;
pub mod timetable;
