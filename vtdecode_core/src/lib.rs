//! Byte-level building blocks for the vector tile decoder: the [`Blob`] buffer type and
//! protobuf value readers/writers.

pub mod io;

pub mod types;

pub use types::*;
