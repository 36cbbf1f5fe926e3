//! Host Load Port
//!
//! Defines the contract for reading the host load average shown in the
//! status view.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 1, 5 and 15 minute load averages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

impl fmt::Display for LoadAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {:.2} {:.2}", self.one, self.five, self.fifteen)
    }
}

/// Host load reader
pub trait SystemLoadProvider: Send + Sync {
    /// Current load average of the host
    fn load_average(&self) -> LoadAverage;
}
