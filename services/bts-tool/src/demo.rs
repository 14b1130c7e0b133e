//! Deterministic test-pattern fields.
//!
//! The pattern is a sum of sinusoids around a mean speed with a
//! power-law shear profile. It is not turbulence.

use anyhow::{ensure, Result};
use wind_field::{Component, Locations, SimulationParameters, UvwTensor, WindField};

/// Shear exponent of the mean profile.
const SHEAR_EXPONENT: f64 = 0.14;

/// Grid and mean flow of a demo field.
#[derive(Debug, Clone, Copy)]
pub struct DemoSpec {
    pub ny: usize,
    pub nz: usize,
    pub nt: usize,
    pub dy: f64,
    pub dz: f64,
    pub dt: f64,
    pub z_bottom: f64,
    pub umean: f64,
}

pub fn demo_field(spec: &DemoSpec) -> Result<WindField> {
    ensure!(spec.ny > 0 && spec.nz > 0 && spec.nt > 0, "grid dimensions must be > 0");
    ensure!(spec.z_bottom > 0.0, "z_bottom must be above ground");

    let params = SimulationParameters::new(spec.nt, spec.dt)?;
    let y0 = -(spec.ny as f64 - 1.0) * spec.dy / 2.0;
    let locations = Locations::regular(spec.ny, spec.nz, y0, spec.z_bottom, spec.dy, spec.dz);

    // reference height for the shear profile: middle of the grid
    let z_ref = spec.z_bottom + (spec.nz / 2) as f64 * spec.dz;

    let uvwt = UvwTensor::from_fn(spec.ny, spec.nz, spec.nt, |c, iy, iz, it| {
        let z = spec.z_bottom + iz as f64 * spec.dz;
        let t = it as f64 * spec.dt;
        let phase = 0.9 * t + 0.2 * iy as f64 + 0.35 * iz as f64;
        match c {
            Component::U => {
                spec.umean * (z / z_ref).powf(SHEAR_EXPONENT)
                    + 0.12 * spec.umean * (phase.sin() + 0.5 * (2.3 * phase).sin())
            }
            Component::V => 0.08 * spec.umean * (1.7 * phase).cos(),
            Component::W => 0.05 * spec.umean * (0.6 * phase + 1.0).sin(),
        }
    });

    Ok(WindField::new(locations, params, uvwt))
}
