//! Domain error types.
//!
//! Every validation failure in the engine is reported through
//! [`TimetableError`]. All checks happen eagerly when a value or builder is
//! touched, so a value that exists is valid.

/// Errors raised while building or querying timetables, graphs and trees.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimetableError {
    /// Day, month or year outside the Gregorian calendar.
    #[error("invalid date: {day}/{month}/{year}")]
    InvalidDate { day: i32, month: i32, year: i32 },

    /// Fixed day number whose year does not fit in an `i32`.
    #[error("fixed day number {0} is outside the supported calendar")]
    DateOutOfRange(i64),

    /// Month ordinal outside 1..=12.
    #[error("invalid month: {0} (expected 1-12)")]
    InvalidMonth(i32),

    /// Day-of-week ordinal outside 1..=7.
    #[error("invalid day of week: {0} (expected 1-7)")]
    InvalidDayOfWeek(i32),

    /// Service rule violating its date range or exception sets.
    #[error("invalid service rule: {0}")]
    InvalidServiceRule(String),

    /// Trip outside the representable departure or duration range.
    #[error("invalid trip: departure {departure}, arrival {arrival}")]
    InvalidTrip { departure: i32, arrival: i32 },

    /// Negative walking time on an edge.
    #[error("invalid walking time: {0}")]
    InvalidWalkingTime(i32),

    /// Stop not part of the graph or tree being queried.
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// Two different stops sharing one name.
    #[error("duplicate stop name: {0}")]
    DuplicateStop(String),

    /// Service name not present in the timetable.
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// Negative departure time given to the routing engine.
    #[error("invalid start time: {0}")]
    InvalidStart(i32),

    /// Arrival recorded earlier than the tree's starting time.
    #[error("arrival {time} at {stop} is before the starting time {start}")]
    ArrivalBeforeStart { stop: String, time: i32, start: i32 },

    /// Predecessor chain that loops instead of reaching the starting stop.
    #[error("path to {0} does not lead back to the starting stop")]
    BrokenPath(String),

    /// Walk edge parameters out of range.
    #[error("invalid walk parameters: max walking time {max_walking_time}, speed {walking_speed}")]
    InvalidWalkParameters {
        max_walking_time: i32,
        walking_speed: f64,
    },

    /// Time of day outside the supported range, or unparsable.
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Text that does not match the expected format.
    #[error("cannot parse {0}")]
    Parse(String),

    /// Longitude or latitude outside its range.
    #[error("invalid position: longitude {longitude}, latitude {latitude}")]
    InvalidPosition { longitude: f64, latitude: f64 },
}
