//! Decoding BTS streams.

use std::io::Read;
use std::path::Path;

use bytes::Buf;
use wind_field::{Component, UvwTensor};

use crate::error::{BtsError, Result};
use crate::layout::{from_stream_order, BtsHeader};

/// A parsed BTS stream.
#[derive(Debug, Clone, PartialEq)]
pub struct BtsFile {
    pub header: BtsHeader,
    pub description: String,
    /// Codes rearranged into `(component, y, z, time)` row-major order.
    codes: Vec<i16>,
}

impl BtsFile {
    /// Parse a complete stream.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut buf = bytes;
        let header = BtsHeader::parse(&mut buf)?;

        let description_len = usize::try_from(header.description_len).map_err(|_| {
            BtsError::invalid_stream(format!(
                "negative description length {}",
                header.description_len
            ))
        })?;
        if buf.remaining() < description_len {
            return Err(BtsError::invalid_stream(format!(
                "description needs {} bytes, only {} available",
                description_len,
                buf.remaining()
            )));
        }
        let description = std::str::from_utf8(&buf[..description_len])
            .map_err(|e| BtsError::invalid_stream(format!("description is not UTF-8: {}", e)))?
            .to_string();
        buf.advance(description_len);

        let count = header.sample_count()?;
        let sample_bytes = header.sample_bytes()?;
        if buf.remaining() != sample_bytes {
            return Err(BtsError::invalid_stream(format!(
                "sample matrix should hold {} bytes, found {}",
                sample_bytes,
                buf.remaining()
            )));
        }
        let mut stream = Vec::with_capacity(count);
        while buf.has_remaining() {
            stream.push(buf.get_i16_le());
        }

        let (ny, nz, nt) = (header.ny as usize, header.nz as usize, header.nt as usize);
        let codes = from_stream_order(&stream, ny, nz, nt);

        Ok(Self {
            header,
            description,
            codes,
        })
    }

    /// Read and parse a whole stream from a reader.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(BtsError::ReadFailed)?;
        Self::parse(&bytes)
    }

    /// Read and parse a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref()).map_err(BtsError::ReadFailed)?;
        Self::parse(&bytes)
    }

    pub fn ny(&self) -> usize {
        self.header.ny as usize
    }

    pub fn nz(&self) -> usize {
        self.header.nz as usize
    }

    pub fn nt(&self) -> usize {
        self.header.nt as usize
    }

    /// Raw code at `(component, iy, iz, it)`.
    pub fn code(&self, component: Component, iy: usize, iz: usize, it: usize) -> Option<i16> {
        let (ny, nz, nt) = (self.ny(), self.nz(), self.nt());
        if iy >= ny || iz >= nz || it >= nt {
            return None;
        }
        self.codes
            .get(((component.index() * ny + iy) * nz + iz) * nt + it)
            .copied()
    }

    /// Codes in `(component, y, z, time)` row-major order.
    pub fn codes(&self) -> &[i16] {
        &self.codes
    }

    /// Vertical grid coordinates implied by the header.
    pub fn z_axis(&self) -> Vec<f64> {
        (0..self.nz())
            .map(|i| self.header.z_bottom as f64 + i as f64 * self.header.dz as f64)
            .collect()
    }

    /// Dequantize with the header's stored scale and offset.
    pub fn to_tensor(&self) -> UvwTensor {
        let scales = self.header.scales.map(f64::from);
        let offsets = self.header.offsets.map(f64::from);
        UvwTensor::from_fn(self.ny(), self.nz(), self.nt(), |c, iy, iz, it| {
            let i = c.index();
            let code = self.code(c, iy, iz, it).unwrap_or_default();
            (code as f64 - offsets[i]) / scales[i]
        })
    }
}
