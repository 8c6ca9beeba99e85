//! Turning a timetable and its trips into a per-day graph.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::domain::{CalendarDate, Service, Stop, TimetableError};
use crate::graph::{FastestPathTree, Graph, GraphBuilder};
use crate::timetable::Timetable;

use super::config::PlannerConfig;

/// One scheduled hop between two consecutive stops of a vehicle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    /// Name of the service the run belongs to.
    pub service: String,
    /// Name of the stop the hop leaves from.
    pub from: String,
    /// Departure in seconds after midnight.
    pub departure: i32,
    /// Name of the stop the hop arrives at.
    pub to: String,
    /// Arrival in seconds after midnight.
    pub arrival: i32,
}

impl TripRecord {
    pub fn new(
        service: impl Into<String>,
        from: impl Into<String>,
        departure: i32,
        to: impl Into<String>,
        arrival: i32,
    ) -> Self {
        Self {
            service: service.into(),
            from: from.into(),
            departure,
            to: to.into(),
            arrival,
        }
    }
}

/// A timetable together with every trip its services run.
///
/// Graphs are built on demand for a single date; nothing is cached between
/// calls.
#[derive(Debug, Clone)]
pub struct Planner {
    timetable: Timetable,
    trips: Vec<TripRecord>,
}

impl Planner {
    pub fn new(timetable: Timetable, trips: Vec<TripRecord>) -> Self {
        Self { timetable, trips }
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    /// Services running on `date`.
    pub fn active_services(&self, date: CalendarDate) -> Vec<&Service> {
        let active = self.timetable.services_for_date(date);
        info!(%date, active = active.len(), "active services");
        active
    }

    /// Build the graph of every trip running on `date`, plus walking edges
    /// between all stops within reach.
    ///
    /// Fails if a trip names a service or stop the timetable lacks, or if
    /// the walking parameters are invalid.
    pub fn graph_for_date(
        &self,
        date: CalendarDate,
        config: &PlannerConfig,
    ) -> Result<Graph, TimetableError> {
        config.validate()?;

        let active: HashSet<&str> = self
            .active_services(date)
            .into_iter()
            .map(Service::name)
            .collect();

        // Sorted so stop indices, and therefore tie-breaking, do not depend
        // on hash order.
        let mut stops: Vec<&Stop> = self.timetable.stops().iter().collect();
        stops.sort_by(|a, b| a.name().cmp(b.name()));
        let by_name: HashMap<&str, &Stop> = stops.iter().map(|s| (s.name(), *s)).collect();
        let resolve = |name: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| TimetableError::UnknownStop(name.to_string()))
        };

        let mut builder = GraphBuilder::new(stops.iter().map(|s| (*s).clone()));
        let mut added = 0usize;
        for trip in &self.trips {
            if self.timetable.service_named(&trip.service).is_none() {
                return Err(TimetableError::UnknownService(trip.service.clone()));
            }
            if !active.contains(trip.service.as_str()) {
                continue;
            }
            let from = resolve(&trip.from)?;
            let to = resolve(&trip.to)?;
            builder.add_trip_edge(from, to, trip.departure, trip.arrival)?;
            added += 1;
        }
        debug!(%date, trips = added, skipped = self.trips.len() - added, "trip edges added");

        builder.add_all_walk_edges(config.max_walking_time, config.walking_speed)?;
        Ok(builder.build())
    }

    /// Fastest paths from the stop named `start` on `date`, leaving at
    /// `departure` seconds after midnight.
    pub fn fastest_paths(
        &self,
        date: CalendarDate,
        start: &str,
        departure: i32,
        config: &PlannerConfig,
    ) -> Result<FastestPathTree, TimetableError> {
        let start = self
            .timetable
            .stop_named(start)
            .ok_or_else(|| TimetableError::UnknownStop(start.to_string()))?;
        let graph = self.graph_for_date(date, config)?;
        let tree = graph.fastest_paths(start, departure)?;
        info!(start = %start, departure, reached = tree.len(), "isochrone computed");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time::from_hms;
    use crate::domain::{DayOfWeek, GeoPoint, ServiceBuilder};
    use crate::timetable::TimetableBuilder;

    fn date(y: i32, m: i32, d: i32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn hms(h: i32, m: i32, s: i32) -> i32 {
        from_hms(h, m, s).unwrap()
    }

    fn stop(name: &str, lon: f64) -> Stop {
        Stop::new(name, GeoPoint::from_degrees(lon, 46.5).unwrap())
    }

    /// Two services over three stops 1 km apart: a weekday one A→B and a
    /// weekend one B→C.
    fn planner(trips: Vec<TripRecord>) -> Planner {
        let weekday = ServiceBuilder::new("weekday", date(2014, 3, 1), date(2014, 3, 31))
            .unwrap()
            .add_operating_day(DayOfWeek::Monday)
            .add_operating_day(DayOfWeek::Tuesday)
            .add_operating_day(DayOfWeek::Wednesday)
            .add_operating_day(DayOfWeek::Thursday)
            .add_operating_day(DayOfWeek::Friday)
            .build();
        let weekend = ServiceBuilder::new("weekend", date(2014, 3, 1), date(2014, 3, 31))
            .unwrap()
            .add_operating_day(DayOfWeek::Saturday)
            .add_operating_day(DayOfWeek::Sunday)
            .build();
        let timetable = TimetableBuilder::new()
            .add_stop(stop("A", 6.600))
            .add_stop(stop("B", 6.613))
            .add_stop(stop("C", 6.626))
            .add_service(weekday)
            .add_service(weekend)
            .build()
            .unwrap();
        Planner::new(timetable, trips)
    }

    fn default_trips() -> Vec<TripRecord> {
        vec![
            TripRecord::new("weekday", "A", hms(8, 0, 0), "B", hms(8, 5, 0)),
            TripRecord::new("weekend", "B", hms(8, 10, 0), "C", hms(8, 15, 0)),
        ]
    }

    #[test]
    fn graph_only_holds_active_trips() {
        let planner = planner(default_trips());
        let config = PlannerConfig::default();

        let friday = planner.graph_for_date(date(2014, 3, 28), &config).unwrap();
        assert_eq!(friday.edge_count(), 1);
        assert_eq!(friday.stops().len(), 3);

        let saturday = planner.graph_for_date(date(2014, 3, 29), &config).unwrap();
        assert_eq!(saturday.edge_count(), 1);
        assert!(saturday.outgoing_edges(&stop("A", 6.600)).unwrap().is_empty());

        let april = planner.graph_for_date(date(2014, 4, 1), &config).unwrap();
        assert_eq!(april.edge_count(), 0);
    }

    #[test]
    fn active_services_by_day() {
        let planner = planner(Vec::new());
        let names: Vec<&str> = planner
            .active_services(date(2014, 3, 29))
            .into_iter()
            .map(Service::name)
            .collect();
        assert_eq!(names, vec!["weekend"]);
    }

    #[test]
    fn unknown_names_rejected() {
        let config = PlannerConfig::default();
        let friday = date(2014, 3, 28);

        let bad_service = planner(vec![TripRecord::new("night", "A", 0, "B", 10)]);
        assert_eq!(
            bad_service.graph_for_date(friday, &config).unwrap_err(),
            TimetableError::UnknownService("night".into())
        );

        let bad_stop = planner(vec![TripRecord::new("weekday", "A", 0, "Z", 10)]);
        assert_eq!(
            bad_stop.graph_for_date(friday, &config).unwrap_err(),
            TimetableError::UnknownStop("Z".into())
        );

        // Trips of inactive services are not resolved.
        let inactive = planner(vec![TripRecord::new("weekend", "A", 0, "Z", 10)]);
        assert!(inactive.graph_for_date(friday, &config).is_ok());
    }

    #[test]
    fn invalid_config_rejected() {
        let planner = planner(default_trips());
        assert!(matches!(
            planner
                .graph_for_date(date(2014, 3, 28), &PlannerConfig::new(300, 0.0))
                .unwrap_err(),
            TimetableError::InvalidWalkParameters { .. }
        ));
    }

    #[test]
    fn fastest_paths_by_name() {
        let planner = planner(default_trips());
        let config = PlannerConfig::default();

        let tree = planner
            .fastest_paths(date(2014, 3, 28), "A", hms(7, 0, 0), &config)
            .unwrap();
        assert_eq!(tree.arrival_time(&stop("B", 6.613)), hms(8, 5, 0));
        assert!(!tree.contains(&stop("C", 6.626)));

        assert_eq!(
            planner
                .fastest_paths(date(2014, 3, 28), "Nowhere", 0, &config)
                .unwrap_err(),
            TimetableError::UnknownStop("Nowhere".into())
        );
    }
}
