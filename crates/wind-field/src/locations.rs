//! Sample locations on the y–z plane.

use serde::{Deserialize, Serialize};

/// A single sample point: lateral (`y`) and vertical (`z`) position in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(y: f64, z: f64) -> Self {
        Self { y, z }
    }
}

/// Unordered collection of sample points.
///
/// Generators may emit points in any order and may repeat coordinates
/// along an axis; consumers derive the grid axes themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Locations {
    points: Vec<Location>,
}

impl Locations {
    pub fn new(points: Vec<Location>) -> Self {
        Self { points }
    }

    /// Build the full rectangular grid `ys × zs`, y varying slowest.
    pub fn grid(ys: &[f64], zs: &[f64]) -> Self {
        let points = ys
            .iter()
            .flat_map(|&y| zs.iter().map(move |&z| Location::new(y, z)))
            .collect();
        Self { points }
    }

    /// Build a regular grid of `ny × nz` points starting at `(y0, z0)`.
    pub fn regular(ny: usize, nz: usize, y0: f64, z0: f64, dy: f64, dz: f64) -> Self {
        let ys: Vec<f64> = (0..ny).map(|i| y0 + i as f64 * dy).collect();
        let zs: Vec<f64> = (0..nz).map(|i| z0 + i as f64 * dz).collect();
        Self::grid(&ys, &zs)
    }

    pub fn push(&mut self, location: Location) {
        self.points.push(location);
    }

    pub fn points(&self) -> &[Location] {
        &self.points
    }

    /// All y coordinates, in point order (duplicates kept).
    pub fn y_array(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// All z coordinates, in point order (duplicates kept).
    pub fn z_array(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.z).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<Location> for Locations {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
