//! Hub reference height and speed written into the header.

use serde::{Deserialize, Serialize};

use crate::geometry::GridAxes;

/// Reference wind speed (`uhub`, m/s) at reference height (`zhub`, m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HubReference {
    pub uhub: f64,
    pub zhub: f64,
}

impl HubReference {
    pub fn new(uhub: f64, zhub: f64) -> Self {
        Self { uhub, zhub }
    }
}

/// Pick the hub reference for a field.
///
/// An explicit reference is returned unchanged, without checking it against
/// the grid. Otherwise the height is the z coordinate at index `nz / 2`
/// (the upper of the two middle points for even counts) and the speed is
/// `umean`, the mean longitudinal velocity over the whole field rather than
/// at the hub point itself.
pub fn resolve_hub(explicit: Option<HubReference>, axes: &GridAxes, umean: f64) -> HubReference {
    match explicit {
        Some(hub) => hub,
        None => HubReference {
            uhub: umean,
            zhub: axes.z[axes.nz() / 2],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes_with_z(z: Vec<f64>) -> GridAxes {
        GridAxes {
            y: vec![0.0],
            z,
            dy: 0.0,
            dz: 10.0,
        }
    }

    #[test]
    fn test_default_hub_odd_count() {
        let axes = axes_with_z(vec![70.0, 80.0, 90.0]);
        let hub = resolve_hub(None, &axes, 11.2);
        assert_eq!(hub.zhub, 80.0);
        assert_eq!(hub.uhub, 11.2);
    }

    #[test]
    fn test_default_hub_even_count_takes_upper_middle() {
        let axes = axes_with_z(vec![70.0, 80.0, 90.0, 100.0]);
        let hub = resolve_hub(None, &axes, 9.0);
        assert_eq!(hub.zhub, 90.0);
    }

    #[test]
    fn test_explicit_hub_used_verbatim() {
        let axes = axes_with_z(vec![70.0, 80.0, 90.0]);
        let hub = resolve_hub(Some(HubReference::new(8.3, 500.0)), &axes, 11.2);
        assert_eq!(hub, HubReference::new(8.3, 500.0));
    }
}
