//! BTS byte layout.
//!
//! A stream is a 70-byte little-endian header, a UTF-8 description whose
//! length is the last header field, and the int16 sample matrix:
//!
//! | Offset | Field | Type |
//! |--------|-------|------|
//! | 0 | marker (7 = non-periodic, 8 = periodic) | i16 |
//! | 2 | nz | i32 |
//! | 6 | ny | i32 |
//! | 10 | tower points (always 0) | i32 |
//! | 14 | nt | i32 |
//! | 18 | dz, dy, dt | f32 × 3 |
//! | 30 | uhub, zhub, z bottom | f32 × 3 |
//! | 42 | scale/offset for u, v, w | f32 × 6 |
//! | 66 | description length | i32 |
//! | 70 | description | UTF-8 |
//!
//! In the sample matrix the component index varies fastest, then y, then
//! z, with time slowest.

use bytes::{Buf, BufMut};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BtsError, Result};

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 70;

/// Marker for a series that must not be looped.
pub const MARKER_NON_PERIODIC: i16 = 7;

/// Marker for a periodic series.
pub const MARKER_PERIODIC: i16 = 8;

/// One typed header field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderField {
    I16(i16),
    I32(i32),
    F32(f32),
}

impl HeaderField {
    /// Encoded width in bytes.
    pub fn width(&self) -> usize {
        match self {
            Self::I16(_) => 2,
            Self::I32(_) | Self::F32(_) => 4,
        }
    }

    /// Append the field in little-endian order.
    pub fn put<B: BufMut>(&self, buf: &mut B) {
        match *self {
            Self::I16(v) => buf.put_i16_le(v),
            Self::I32(v) => buf.put_i32_le(v),
            Self::F32(v) => buf.put_f32_le(v),
        }
    }
}

/// Decoded BTS header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BtsHeader {
    pub marker: i16,
    pub nz: i32,
    pub ny: i32,
    pub tower_points: i32,
    pub nt: i32,
    pub dz: f32,
    pub dy: f32,
    pub dt: f32,
    pub uhub: f32,
    pub zhub: f32,
    pub z_bottom: f32,
    /// Scale for u, v, w.
    pub scales: [f32; 3],
    /// Offset for u, v, w.
    pub offsets: [f32; 3],
    pub description_len: i32,
}

impl BtsHeader {
    pub fn is_periodic(&self) -> bool {
        self.marker == MARKER_PERIODIC
    }

    /// Header fields in stream order.
    pub fn fields(&self) -> [HeaderField; 18] {
        use HeaderField::*;
        [
            I16(self.marker),
            I32(self.nz),
            I32(self.ny),
            I32(self.tower_points),
            I32(self.nt),
            F32(self.dz),
            F32(self.dy),
            F32(self.dt),
            F32(self.uhub),
            F32(self.zhub),
            F32(self.z_bottom),
            F32(self.scales[0]),
            F32(self.offsets[0]),
            F32(self.scales[1]),
            F32(self.offsets[1]),
            F32(self.scales[2]),
            F32(self.offsets[2]),
            I32(self.description_len),
        ]
    }

    /// Append the 70 header bytes.
    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        for field in self.fields() {
            field.put(buf);
        }
    }

    /// Parse a header from the front of `buf`.
    pub fn parse<B: Buf>(buf: &mut B) -> Result<Self> {
        if buf.remaining() < HEADER_LEN {
            return Err(BtsError::invalid_stream(format!(
                "header needs {} bytes, only {} available",
                HEADER_LEN,
                buf.remaining()
            )));
        }

        let marker = buf.get_i16_le();
        if marker != MARKER_PERIODIC && marker != MARKER_NON_PERIODIC {
            return Err(BtsError::invalid_stream(format!(
                "unknown format marker {}",
                marker
            )));
        }

        let nz = buf.get_i32_le();
        let ny = buf.get_i32_le();
        let tower_points = buf.get_i32_le();
        let nt = buf.get_i32_le();
        let dz = buf.get_f32_le();
        let dy = buf.get_f32_le();
        let dt = buf.get_f32_le();
        let uhub = buf.get_f32_le();
        let zhub = buf.get_f32_le();
        let z_bottom = buf.get_f32_le();
        let mut scales = [0.0f32; 3];
        let mut offsets = [0.0f32; 3];
        for i in 0..3 {
            scales[i] = buf.get_f32_le();
            offsets[i] = buf.get_f32_le();
        }
        let description_len = buf.get_i32_le();

        Ok(Self {
            marker,
            nz,
            ny,
            tower_points,
            nt,
            dz,
            dy,
            dt,
            uhub,
            zhub,
            z_bottom,
            scales,
            offsets,
            description_len,
        })
    }

    /// Number of int16 values in the sample matrix.
    ///
    /// Fails on negative dimensions and on counts that overflow `usize`.
    pub fn sample_count(&self) -> Result<usize> {
        let dims = [self.ny, self.nz, self.nt];
        if dims.iter().any(|&d| d < 0) {
            return Err(BtsError::invalid_stream(format!(
                "negative grid dimension in ny={}, nz={}, nt={}",
                self.ny, self.nz, self.nt
            )));
        }
        if self.tower_points != 0 {
            return Err(BtsError::invalid_stream(format!(
                "{} tower points below the grid are not supported",
                self.tower_points
            )));
        }
        dims.iter()
            .try_fold(3usize, |acc, &d| acc.checked_mul(d as usize))
            .ok_or_else(|| {
                BtsError::invalid_stream(format!(
                    "sample count for ny={}, nz={}, nt={} overflows",
                    self.ny, self.nz, self.nt
                ))
            })
    }

    /// Byte length of the sample matrix.
    pub fn sample_bytes(&self) -> Result<usize> {
        self.sample_count()?.checked_mul(2).ok_or_else(|| {
            BtsError::invalid_stream(format!(
                "sample matrix size for ny={}, nz={}, nt={} overflows",
                self.ny, self.nz, self.nt
            ))
        })
    }

    /// Serialize to JSON for display.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Marker value for the periodic flag.
pub fn marker_for(periodic: bool) -> i16 {
    if periodic {
        MARKER_PERIODIC
    } else {
        MARKER_NON_PERIODIC
    }
}

/// Who produced a stream and when; rendered into the description text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub tool_name: String,
    pub version: String,
    pub generated_at: DateTime<Utc>,
}

impl Provenance {
    pub fn new(
        tool_name: impl Into<String>,
        version: impl Into<String>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            version: version.into(),
            generated_at,
        }
    }

    /// Description text, e.g. `generated by bts-writer v0.1.0, Mar 05, 2024, 14:07 (UTC).`
    pub fn description(&self) -> String {
        format!(
            "generated by {} v{}, {}.",
            self.tool_name,
            self.version,
            self.generated_at.format("%b %d, %Y, %H:%M (UTC)")
        )
    }
}

/// Reorder codes from `(component, y, z, time)` row-major storage into
/// stream order, where component varies fastest, then y, then z, then time.
pub fn to_stream_order(codes: &[i16], ny: usize, nz: usize, nt: usize) -> Vec<i16> {
    debug_assert_eq!(codes.len(), 3 * ny * nz * nt);
    let mut out = Vec::with_capacity(codes.len());
    for it in 0..nt {
        for iz in 0..nz {
            for iy in 0..ny {
                for c in 0..3 {
                    out.push(codes[((c * ny + iy) * nz + iz) * nt + it]);
                }
            }
        }
    }
    out
}

/// Inverse of [`to_stream_order`].
pub fn from_stream_order(stream: &[i16], ny: usize, nz: usize, nt: usize) -> Vec<i16> {
    debug_assert_eq!(stream.len(), 3 * ny * nz * nt);
    let mut out = vec![0i16; stream.len()];
    let mut values = stream.iter();
    for it in 0..nt {
        for iz in 0..nz {
            for iy in 0..ny {
                for c in 0..3 {
                    if let Some(&v) = values.next() {
                        out[((c * ny + iy) * nz + iz) * nt + it] = v;
                    }
                }
            }
        }
    }
    out
}
