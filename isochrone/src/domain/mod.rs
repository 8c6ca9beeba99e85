//! Domain types for the transit isochrone engine.
//!
//! This module contains the validated value types the engine works with:
//! calendar dates, service rules, stops and their positions. All types
//! enforce their invariants at construction time, so code that receives
//! them can trust their validity.

mod date;
mod error;
mod geo;
mod service;
mod stop;
pub mod time;

pub use date::{CalendarDate, DayOfWeek, Month, days_in_month, is_leap_year};
pub use error::TimetableError;
pub use geo::GeoPoint;
pub use service::{Service, ServiceBuilder};
pub use stop::Stop;
