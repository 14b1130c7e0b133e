//! Quantizing encoder for the BTS turbulence time-series format.
//!
//! Load-simulation tools read synthetic wind fields as BTS files: a fixed
//! little-endian header, a short description string, and every velocity
//! sample packed into a 16-bit code. This crate turns a
//! [`wind_field::WindField`] into that stream and reads it back.
//!
//! # Pipeline
//!
//! ```text
//! WindField
//!      │
//!      ├─► GridAxes::from_locations     sorted unique y/z, dy, dz
//!      │
//!      ├─► resolve_hub                  (uhub, zhub)
//!      │
//!      ├─► quantize_field               per-component scale/offset, i16 codes
//!      │
//!      └─► encode                       header + description + samples
//!               │
//!               ▼
//!          single write to the sink
//! ```
//!
//! # Example
//!
//! ```ignore
//! use bts_writer::{write_bts_file, EncodeOptions, EncoderConfig, HubReference};
//!
//! let config = EncoderConfig::from_env();
//! let options = EncodeOptions::from_config(&config, config.provenance(chrono::Utc::now()))?
//!     .with_hub(HubReference::new(8.3, 90.0));
//! let (path, summary) = write_bts_file(&field, "turbulence", &options)?;
//! ```

pub mod config;
pub mod encoder;
pub mod error;
pub mod geometry;
pub mod hub;
pub mod layout;
pub mod quantize;
pub mod reader;

// Re-export commonly used types at crate root
pub use config::EncoderConfig;
pub use encoder::{
    encode, encode_to_bytes, normalize_bts_path, write_bts_file, EncodeOptions, EncodeSummary,
};
pub use error::{BtsError, Result};
pub use geometry::GridAxes;
pub use hub::{resolve_hub, HubReference};
pub use layout::{to_stream_order, BtsHeader, Provenance, HEADER_LEN};
pub use quantize::{quantize_field, QuantizationParams, QuantizedField};
pub use reader::BtsFile;
