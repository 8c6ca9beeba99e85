//! Serializable summaries of a fastest-path tree.

use serde::Serialize;

use crate::domain::{Stop, TimetableError};
use crate::graph::FastestPathTree;

/// Everything reachable from one stop at one departure time.
#[derive(Debug, Serialize)]
pub struct IsochroneReport {
    /// Starting stop name
    pub start: String,

    /// Departure time as `hh:mm:ss`
    pub departure: String,

    /// Reached stops, sorted by name
    pub arrivals: Vec<StopArrival>,
}

/// A reached stop.
#[derive(Debug, Serialize)]
pub struct StopArrival {
    /// Stop name
    pub stop: String,

    /// Arrival time as `hh:mm:ss`
    pub arrival: String,

    /// Seconds between departure and arrival
    pub duration_secs: i32,

    /// Names of the stops passed through, starting stop first
    pub path: Vec<String>,
}

impl IsochroneReport {
    /// Summarise a tree.
    pub fn from_tree(tree: &FastestPathTree) -> Result<Self, TimetableError> {
        let departure = tree.starting_time();

        let mut stops: Vec<&Stop> = tree.stops().collect();
        stops.sort_by(|a, b| a.name().cmp(b.name()));

        let arrivals = stops
            .into_iter()
            .map(|stop| {
                let arrival = tree.arrival_time(stop);
                Ok(StopArrival {
                    stop: stop.name().to_string(),
                    arrival: format_uncapped(arrival),
                    duration_secs: arrival - departure,
                    path: tree
                        .path_to(stop)?
                        .iter()
                        .map(|s| s.name().to_string())
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>, TimetableError>>()?;

        Ok(Self {
            start: tree.starting_stop().name().to_string(),
            departure: format_uncapped(departure),
            arrivals,
        })
    }
}

/// `hh:mm:ss` without the service-day cap of [`crate::domain::time::format_hms`]: trips may
/// arrive after 29:59:59.
fn format_uncapped(spm: i32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        spm.div_euclid(3600),
        spm.div_euclid(60).rem_euclid(60),
        spm.rem_euclid(60)
    )
}
