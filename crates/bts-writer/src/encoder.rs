//! End-to-end encoding of a wind field into a BTS stream.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;
use wind_field::WindField;

use crate::config::EncoderConfig;
use crate::error::{BtsError, Result};
use crate::geometry::GridAxes;
use crate::hub::{resolve_hub, HubReference};
use crate::layout::{marker_for, to_stream_order, BtsHeader, Provenance, HEADER_LEN};
use crate::quantize::{quantize_field, QuantizationParams};

/// File extension appended to output paths.
pub const BTS_EXTENSION: &str = "bts";

/// Per-call encoding choices.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOptions {
    /// Explicit hub reference; derived from the field when `None`.
    pub hub: Option<HubReference>,
    pub periodic: bool,
    pub provenance: Provenance,
}

impl EncodeOptions {
    /// Periodic output with a derived hub reference.
    pub fn new(provenance: Provenance) -> Self {
        Self {
            hub: None,
            periodic: true,
            provenance,
        }
    }

    /// Options taken from a validated encoder configuration.
    pub fn from_config(config: &EncoderConfig, provenance: Provenance) -> Result<Self> {
        config.validate().map_err(BtsError::Config)?;
        Ok(Self {
            hub: None,
            periodic: config.periodic,
            provenance,
        })
    }

    pub fn with_hub(mut self, hub: HubReference) -> Self {
        self.hub = Some(hub);
        self
    }

    pub fn with_periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }
}

/// What was derived and written during one encode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeSummary {
    pub axes: GridAxes,
    pub hub: HubReference,
    /// Parameters for u, v, w.
    pub params: [QuantizationParams; 3],
    pub header: BtsHeader,
    pub description: String,
    pub bytes_written: usize,
}

fn header_dim(field: &'static str, value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| BtsError::DimensionOverflow { field, value })
}

/// Build the complete stream in memory.
///
/// Nothing is written anywhere; callers decide where the bytes go.
pub fn encode_to_bytes(field: &WindField, options: &EncodeOptions) -> Result<(Bytes, EncodeSummary)> {
    let nt = field.params.n_samples;
    if nt == 0 {
        return Err(BtsError::empty_input("n_samples is 0"));
    }

    let axes = GridAxes::from_locations(&field.locations)?;
    let (ny, nz) = (axes.ny(), axes.nz());

    tracing::debug!(ny, nz, nt, dy = axes.dy, dz = axes.dz, "Derived grid axes");

    let tensor = field.uvwt();
    let expected = [3, ny, nz, nt];
    if tensor.shape() != expected {
        return Err(BtsError::ShapeMismatch {
            expected,
            actual: tensor.shape(),
        });
    }

    let hub = resolve_hub(options.hub, &axes, field.umean());
    tracing::debug!(
        uhub = hub.uhub,
        zhub = hub.zhub,
        explicit = options.hub.is_some(),
        "Resolved hub reference"
    );

    let quantized = quantize_field(tensor)?;
    let params = *quantized.all_params();

    let description = options.provenance.description();
    let description_len = description.len();

    let header = BtsHeader {
        marker: marker_for(options.periodic),
        nz: header_dim("nz", nz)?,
        ny: header_dim("ny", ny)?,
        tower_points: 0,
        nt: header_dim("nt", nt)?,
        dz: axes.dz as f32,
        dy: axes.dy as f32,
        dt: field.params.sample_time as f32,
        uhub: hub.uhub as f32,
        zhub: hub.zhub as f32,
        z_bottom: axes.z_bottom() as f32,
        scales: params.map(|p| p.scale as f32),
        offsets: params.map(|p| p.offset as f32),
        description_len: header_dim("description_len", description_len)?,
    };

    let samples = to_stream_order(quantized.codes(), ny, nz, nt);

    let mut buf = BytesMut::with_capacity(HEADER_LEN + description_len + samples.len() * 2);
    header.write_to(&mut buf);

    let before = buf.len();
    buf.put_slice(description.as_bytes());
    let written = buf.len() - before;
    if written != header.description_len as usize {
        return Err(BtsError::EncodingLengthMismatch {
            declared: header.description_len as usize,
            actual: written,
        });
    }

    for code in samples {
        buf.put_i16_le(code);
    }

    let bytes = buf.freeze();
    let summary = EncodeSummary {
        axes,
        hub,
        params,
        header,
        description,
        bytes_written: bytes.len(),
    };

    Ok((bytes, summary))
}

/// Encode a field and write the stream to `sink` in a single write.
///
/// All validation and quantization happens before the first byte reaches
/// the sink.
pub fn encode<W: Write>(field: &WindField, sink: &mut W, options: &EncodeOptions) -> Result<EncodeSummary> {
    let (bytes, summary) = encode_to_bytes(field, options)?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    Ok(summary)
}

/// Append `.bts` unless the path already ends with it.
pub fn normalize_bts_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some_and(|ext| ext == BTS_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(BTS_EXTENSION);
    PathBuf::from(name)
}

/// Encode a field to a `.bts` file.
///
/// The stream goes to a temporary file next to the target, which is
/// renamed into place only after the full stream has been written.
/// Returns the final path.
pub fn write_bts_file(
    field: &WindField,
    path: impl AsRef<Path>,
    options: &EncodeOptions,
) -> Result<(PathBuf, EncodeSummary)> {
    let target = normalize_bts_path(path);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let (bytes, summary) = encode_to_bytes(field, options)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| BtsError::SinkWrite(e.error))?;

    tracing::info!(
        path = %target.display(),
        bytes = summary.bytes_written,
        ny = summary.header.ny,
        nz = summary.header.nz,
        nt = summary.header.nt,
        "Wrote BTS file"
    );

    Ok((target, summary))
}
