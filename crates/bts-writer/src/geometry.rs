//! Grid axes derived from an unordered set of sample locations.

use serde::{Deserialize, Serialize};
use wind_field::Locations;

use crate::error::{BtsError, Result};

/// Sorted unique grid coordinates and their mean spacings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridAxes {
    /// Lateral coordinates, ascending.
    pub y: Vec<f64>,
    /// Vertical coordinates, ascending.
    pub z: Vec<f64>,
    /// Mean lateral spacing (0 for a single column).
    pub dy: f64,
    /// Mean vertical spacing (0 for a single row).
    pub dz: f64,
}

impl GridAxes {
    /// Derive the axes from every location in the set.
    ///
    /// Coordinates are deduplicated exactly; generators place points on
    /// a regular grid so no tolerance is applied.
    pub fn from_locations(locations: &Locations) -> Result<Self> {
        if locations.is_empty() {
            return Err(BtsError::empty_input("no sample locations"));
        }

        let y = unique_sorted(locations.y_array());
        let z = unique_sorted(locations.z_array());
        let dy = mean_spacing(&y);
        let dz = mean_spacing(&z);

        Ok(Self { y, z, dy, dz })
    }

    pub fn ny(&self) -> usize {
        self.y.len()
    }

    pub fn nz(&self) -> usize {
        self.z.len()
    }

    /// Lowest z coordinate.
    pub fn z_bottom(&self) -> f64 {
        self.z[0]
    }
}

fn unique_sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// Mean of consecutive differences, 0 for fewer than two values.
fn mean_spacing(axis: &[f64]) -> f64 {
    if axis.len() < 2 {
        return 0.0;
    }
    let total: f64 = axis.windows(2).map(|w| w[1] - w[0]).sum();
    total / (axis.len() - 1) as f64
}
