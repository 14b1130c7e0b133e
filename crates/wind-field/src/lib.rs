//! Data model for synthetic 3-component wind fields.
//!
//! A [`WindField`] pairs the grid of sample [`Location`]s with the
//! [`SimulationParameters`] used to generate it and the dense
//! [`UvwTensor`] of velocity samples. Generators produce these; writers
//! such as `bts-writer` only read them.

pub mod error;
pub mod field;
pub mod locations;
pub mod params;
pub mod tensor;

pub use error::{WindFieldError, WindFieldResult};
pub use field::WindField;
pub use locations::{Location, Locations};
pub use params::SimulationParameters;
pub use tensor::{Component, UvwTensor};
