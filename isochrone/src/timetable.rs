//! Timetables: the stops of a network and the services that run on it.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::domain::{CalendarDate, Service, Stop, TimetableError};

/// An immutable set of stops and services.
///
/// Stop names are unique, so [`Timetable::stop_named`] always finds the same
/// stop.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    stops: HashSet<Stop>,
    services: Vec<Service>,
}

impl Timetable {
    /// Create a timetable from stops and services.
    ///
    /// Identical stops collapse into one. Two different stops sharing a name
    /// are rejected.
    pub fn new(
        stops: impl IntoIterator<Item = Stop>,
        services: impl IntoIterator<Item = Service>,
    ) -> Result<Self, TimetableError> {
        let mut by_name: HashMap<String, Stop> = HashMap::new();
        for stop in stops {
            match by_name.get(stop.name()) {
                Some(known) if *known != stop => {
                    return Err(TimetableError::DuplicateStop(stop.name().to_string()));
                }
                Some(_) => {}
                None => {
                    by_name.insert(stop.name().to_string(), stop);
                }
            }
        }
        Ok(Self {
            stops: by_name.into_values().collect(),
            services: services.into_iter().collect(),
        })
    }

    pub fn stops(&self) -> &HashSet<Stop> {
        &self.stops
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Find a stop by name.
    pub fn stop_named(&self, name: &str) -> Option<&Stop> {
        self.stops.iter().find(|s| s.name() == name)
    }

    /// Find a service by name.
    pub fn service_named(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name() == name)
    }

    /// Services running on `date`.
    pub fn services_for_date(&self, date: CalendarDate) -> Vec<&Service> {
        let active: Vec<&Service> = self
            .services
            .iter()
            .filter(|s| s.is_operating_on(date))
            .collect();
        trace!(%date, active = active.len(), total = self.services.len(), "services for date");
        active
    }
}

/// Builder for [`Timetable`].
#[derive(Debug, Default)]
pub struct TimetableBuilder {
    stops: Vec<Stop>,
    services: Vec<Service>,
}

impl TimetableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop.
    pub fn add_stop(mut self, stop: Stop) -> Self {
        self.stops.push(stop);
        self
    }

    /// Add a service.
    pub fn add_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Build the timetable, checking stop names are unique.
    pub fn build(self) -> Result<Timetable, TimetableError> {
        Timetable::new(self.stops, self.services)
    }
}
