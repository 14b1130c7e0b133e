//! Per-component affine quantization to 16-bit codes.
//!
//! Each velocity component gets its own `(scale, offset)` pair so that
//! its minimum maps to `i16::MIN` and its maximum to `i16::MAX`:
//!
//! ```text
//! code  = round(value * scale + offset)
//! value = (code - offset) / scale
//! ```

use serde::{Deserialize, Serialize};
use wind_field::{Component, UvwTensor};

use crate::error::{BtsError, Result};

/// Lowest code, assigned to each component's minimum.
pub const CODE_MIN: f64 = -32768.0;

/// Highest code, assigned to each component's maximum.
pub const CODE_MAX: f64 = 32767.0;

/// Width of the code range.
pub const CODE_RANGE: f64 = 65535.0;

/// Affine map for one component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantizationParams {
    pub min: f64,
    pub max: f64,
    pub scale: f64,
    pub offset: f64,
}

impl QuantizationParams {
    /// Build the map for values spanning `[min, max]`.
    ///
    /// A range that is zero within tolerance gets `scale = 1`, which sends
    /// the whole channel to `CODE_MIN`.
    pub fn from_range(min: f64, max: f64) -> Self {
        let scale = if is_close(min, max) {
            1.0
        } else {
            CODE_RANGE / (max - min)
        };
        let offset = CODE_MIN - scale * min;
        Self {
            min,
            max,
            scale,
            offset,
        }
    }

    /// Scan one component's samples for their range.
    ///
    /// Fails on an empty slice or on the first NaN/infinite sample.
    pub fn from_samples(component: Component, samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(BtsError::empty_input(format!(
                "{} component has no samples",
                component
            )));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (index, &value) in samples.iter().enumerate() {
            if !value.is_finite() {
                return Err(BtsError::NonFiniteValue {
                    component,
                    index,
                    value,
                });
            }
            min = min.min(value);
            max = max.max(value);
        }

        Ok(Self::from_range(min, max))
    }

    /// True when the channel was treated as constant.
    pub fn is_constant(&self) -> bool {
        is_close(self.min, self.max)
    }

    /// Map a value to its code, rounding to nearest and clamping to i16.
    #[inline]
    pub fn quantize(&self, value: f64) -> i16 {
        (value * self.scale + self.offset)
            .round()
            .clamp(CODE_MIN, CODE_MAX) as i16
    }

    /// Recover the approximate value of a code.
    #[inline]
    pub fn dequantize(&self, code: i16) -> f64 {
        (code as f64 - self.offset) / self.scale
    }
}

/// Same tolerance as numpy's `isclose` with default `rtol`/`atol`.
fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-8 + 1e-5 * b.abs()
}

/// Quantized tensor with the parameters used for each component.
///
/// Codes keep the source layout: row-major over `(component, y, z, time)`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedField {
    params: [QuantizationParams; 3],
    ny: usize,
    nz: usize,
    nt: usize,
    codes: Vec<i16>,
}

impl QuantizedField {
    pub fn params(&self, component: Component) -> &QuantizationParams {
        &self.params[component.index()]
    }

    pub fn all_params(&self) -> &[QuantizationParams; 3] {
        &self.params
    }

    /// Shape as `[3, ny, nz, nt]`.
    pub fn shape(&self) -> [usize; 4] {
        [3, self.ny, self.nz, self.nt]
    }

    pub fn get(&self, component: Component, iy: usize, iz: usize, it: usize) -> Option<i16> {
        if iy >= self.ny || iz >= self.nz || it >= self.nt {
            return None;
        }
        let index = ((component.index() * self.ny + iy) * self.nz + iz) * self.nt + it;
        self.codes.get(index).copied()
    }

    pub fn component(&self, component: Component) -> &[i16] {
        let n = self.ny * self.nz * self.nt;
        let start = component.index() * n;
        &self.codes[start..start + n]
    }

    /// Codes in source layout.
    pub fn codes(&self) -> &[i16] {
        &self.codes
    }
}

/// Quantize every component of a tensor independently.
pub fn quantize_field(tensor: &UvwTensor) -> Result<QuantizedField> {
    if tensor.is_empty() {
        return Err(BtsError::empty_input(format!(
            "velocity tensor of shape {:?} has no samples",
            tensor.shape()
        )));
    }

    let mut codes = Vec::with_capacity(tensor.len());
    let mut params = [QuantizationParams::from_range(0.0, 0.0); 3];

    for component in Component::ALL {
        let samples = tensor.component(component);
        let p = QuantizationParams::from_samples(component, samples)?;

        tracing::debug!(
            component = %component,
            min = p.min,
            max = p.max,
            scale = p.scale,
            offset = p.offset,
            constant = p.is_constant(),
            "Computed quantization parameters"
        );

        codes.extend(samples.iter().map(|&v| p.quantize(v)));
        params[component.index()] = p;
    }

    Ok(QuantizedField {
        params,
        ny: tensor.ny(),
        nz: tensor.nz(),
        nt: tensor.nt(),
        codes,
    })
}
