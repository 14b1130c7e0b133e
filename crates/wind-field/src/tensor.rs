//! Fixed-rank velocity tensor.
//!
//! Samples are stored row-major over `(component, y, z, time)`, so time
//! varies fastest and each component occupies one contiguous block.

use serde::{Deserialize, Serialize};

use crate::error::{WindFieldError, WindFieldResult};

/// Velocity component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// Longitudinal (along-wind).
    U,
    /// Lateral.
    V,
    /// Vertical.
    W,
}

impl Component {
    /// All components in storage order.
    pub const ALL: [Component; 3] = [Component::U, Component::V, Component::W];

    /// Position of this component along the first tensor axis.
    pub fn index(self) -> usize {
        match self {
            Self::U => 0,
            Self::V => 1,
            Self::W => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U => "u",
            Self::V => "v",
            Self::W => "w",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dense `(3, ny, nz, nt)` tensor of velocity samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvwTensor {
    ny: usize,
    nz: usize,
    nt: usize,
    data: Vec<f64>,
}

impl UvwTensor {
    /// Wrap a row-major `(component, y, z, time)` buffer.
    pub fn new(ny: usize, nz: usize, nt: usize, data: Vec<f64>) -> WindFieldResult<Self> {
        let expected = 3 * ny * nz * nt;
        if data.len() != expected {
            return Err(WindFieldError::DataLength {
                shape: [3, ny, nz, nt],
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { ny, nz, nt, data })
    }

    pub fn zeros(ny: usize, nz: usize, nt: usize) -> Self {
        Self {
            ny,
            nz,
            nt,
            data: vec![0.0; 3 * ny * nz * nt],
        }
    }

    /// Build a tensor by evaluating `f(component, iy, iz, it)` at every index.
    pub fn from_fn<F>(ny: usize, nz: usize, nt: usize, mut f: F) -> Self
    where
        F: FnMut(Component, usize, usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(3 * ny * nz * nt);
        for c in Component::ALL {
            for iy in 0..ny {
                for iz in 0..nz {
                    for it in 0..nt {
                        data.push(f(c, iy, iz, it));
                    }
                }
            }
        }
        Self { ny, nz, nt, data }
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn nz(&self) -> usize {
        self.nz
    }

    pub fn nt(&self) -> usize {
        self.nt
    }

    /// Shape as `[3, ny, nz, nt]`.
    pub fn shape(&self) -> [usize; 4] {
        [3, self.ny, self.nz, self.nt]
    }

    /// Number of samples per component.
    pub fn component_len(&self) -> usize {
        self.ny * self.nz * self.nt
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn offset(&self, component: Component, iy: usize, iz: usize, it: usize) -> Option<usize> {
        if iy >= self.ny || iz >= self.nz || it >= self.nt {
            return None;
        }
        Some(((component.index() * self.ny + iy) * self.nz + iz) * self.nt + it)
    }

    /// Sample at `(component, iy, iz, it)`, or `None` when out of bounds.
    pub fn get(&self, component: Component, iy: usize, iz: usize, it: usize) -> Option<f64> {
        self.offset(component, iy, iz, it).map(|i| self.data[i])
    }

    /// Overwrite one sample. Returns `false` when the index is out of bounds.
    pub fn set(&mut self, component: Component, iy: usize, iz: usize, it: usize, value: f64) -> bool {
        match self.offset(component, iy, iz, it) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// Contiguous `(y, z, time)` block of one component.
    pub fn component(&self, component: Component) -> &[f64] {
        let n = self.component_len();
        let start = component.index() * n;
        &self.data[start..start + n]
    }

    /// Time series at grid point `(iy, iz)` for one component.
    pub fn series(&self, component: Component, iy: usize, iz: usize) -> Option<&[f64]> {
        let start = self.offset(component, iy, iz, 0)?;
        Some(&self.data[start..start + self.nt])
    }

    /// Mean of one component over all grid points and time steps.
    pub fn mean(&self, component: Component) -> f64 {
        let block = self.component(component);
        if block.is_empty() {
            return 0.0;
        }
        block.iter().sum::<f64>() / block.len() as f64
    }

    /// Raw row-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
