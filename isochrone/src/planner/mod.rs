//! Isochrone planning over a timetable.
//!
//! A [`Planner`] holds a timetable and the trips of its services. For a
//! given date it keeps the trips of the services running that day, links
//! nearby stops with walking edges, and runs the fastest-path search from a
//! named stop. [`IsochroneReport`] turns the result into a serializable
//! summary.

mod config;
mod plan;
mod report;

pub use config::PlannerConfig;
pub use plan::{Planner, TripRecord};
pub use report::{IsochroneReport, StopArrival};
