//! Configuration for graph construction.

use serde::Deserialize;

use crate::domain::TimetableError;

/// Walking parameters used when connecting nearby stops.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Longest walk to consider (seconds). Walks taking this long or longer
    /// are not added to the graph.
    pub max_walking_time: i32,

    /// Walking speed (metres per second).
    pub walking_speed: f64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_walking_time: i32, walking_speed: f64) -> Self {
        Self {
            max_walking_time,
            walking_speed,
        }
    }

    /// Check that the walk limit is non-negative and the speed positive.
    pub fn validate(&self) -> Result<(), TimetableError> {
        if self.max_walking_time < 0 || !(self.walking_speed > 0.0) {
            return Err(TimetableError::InvalidWalkParameters {
                max_walking_time: self.max_walking_time,
                walking_speed: self.walking_speed,
            });
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_walking_time: 300, // 5 minutes
            walking_speed: 1.25,
        }
    }
}
