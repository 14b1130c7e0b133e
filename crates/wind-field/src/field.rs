//! The wind field aggregate handed from generators to writers.

use crate::locations::Locations;
use crate::params::SimulationParameters;
use crate::tensor::{Component, UvwTensor};

/// A generated wind field.
///
/// The tensor's `y` and `z` indices refer to the sorted unique coordinates
/// of `locations`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindField {
    pub locations: Locations,
    pub params: SimulationParameters,
    uvwt: UvwTensor,
}

impl WindField {
    pub fn new(locations: Locations, params: SimulationParameters, uvwt: UvwTensor) -> Self {
        Self {
            locations,
            params,
            uvwt,
        }
    }

    /// Velocity samples, shape `(3, ny, nz, nt)`.
    pub fn uvwt(&self) -> &UvwTensor {
        &self.uvwt
    }

    /// Mean longitudinal velocity over the whole grid and series.
    pub fn umean(&self) -> f64 {
        self.uvwt.mean(Component::U)
    }
}
