//! Simulation parameters carried alongside a generated field.

use serde::{Deserialize, Serialize};

use crate::error::{WindFieldError, WindFieldResult};

/// Time discretisation of a simulated wind field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Number of time steps in each series.
    pub n_samples: usize,
    /// Time between consecutive samples in seconds.
    pub sample_time: f64,
}

impl SimulationParameters {
    /// Create parameters, rejecting a non-positive or non-finite time step.
    pub fn new(n_samples: usize, sample_time: f64) -> WindFieldResult<Self> {
        if !(sample_time.is_finite() && sample_time > 0.0) {
            return Err(WindFieldError::InvalidParameter(format!(
                "sample_time must be > 0, got {}",
                sample_time
            )));
        }
        Ok(Self {
            n_samples,
            sample_time,
        })
    }

    /// Total simulated duration in seconds.
    pub fn duration(&self) -> f64 {
        self.n_samples as f64 * self.sample_time
    }
}
