//! Synthetic wind field generators.
//!
//! These are deterministic patterns, not turbulence: values are chosen so
//! a decoded sample can be traced back to its exact tensor index.

use wind_field::{Component, Locations, SimulationParameters, UvwTensor, WindField};

use crate::fixtures::grid::GridScenario;

/// Lowest z coordinate used by the generators.
pub const Z_BOTTOM: f64 = 70.0;

/// Locations for a scenario, with y centered on zero.
pub fn scenario_locations(s: &GridScenario) -> Locations {
    let y0 = -(s.ny as f64 - 1.0) * s.dy / 2.0;
    Locations::regular(s.ny, s.nz, y0, Z_BOTTOM, s.dy, s.dz)
}

/// Build a field over a scenario grid with values from `f(component, iy, iz, it)`.
pub fn field_from_fn<F>(s: &GridScenario, f: F) -> WindField
where
    F: FnMut(Component, usize, usize, usize) -> f64,
{
    let params = SimulationParameters::new(s.nt, s.dt).expect("scenario dt must be positive");
    let uvwt = UvwTensor::from_fn(s.ny, s.nz, s.nt, f);
    WindField::new(scenario_locations(s), params, uvwt)
}

/// Field whose value encodes its own index.
///
/// `u = 10 + iy + 0.1*iz + 0.01*it`, `v = -(iy + iz + it)`,
/// `w = iy*100 + iz*10 + it`.
pub fn indexed_field(s: &GridScenario) -> WindField {
    field_from_fn(s, |c, iy, iz, it| match c {
        Component::U => 10.0 + iy as f64 + 0.1 * iz as f64 + 0.01 * it as f64,
        Component::V => -((iy + iz + it) as f64),
        Component::W => (iy * 100 + iz * 10 + it) as f64,
    })
}

/// Smooth sinusoidal field around a mean wind speed.
pub fn sinusoidal_field(s: &GridScenario, umean: f64) -> WindField {
    field_from_fn(s, |c, iy, iz, it| {
        let phase = it as f64 * s.dt + 0.3 * iy as f64 + 0.7 * iz as f64;
        match c {
            Component::U => umean + 1.5 * phase.sin(),
            Component::V => 0.8 * (1.3 * phase).cos(),
            Component::W => 0.4 * (0.7 * phase).sin(),
        }
    })
}

/// Field where one component is `value` everywhere and the others vary.
pub fn constant_component_field(s: &GridScenario, constant: Component, value: f64) -> WindField {
    field_from_fn(s, move |c, iy, iz, it| {
        if c == constant {
            value
        } else {
            (iy + 2 * iz + 3 * it) as f64 + c.index() as f64
        }
    })
}
