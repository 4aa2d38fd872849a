//! Protobuf value readers and writers.
//!
//! [`ValueReader`] and [`ValueReaderSlice`] decode varints, zigzag varints, fixed-width floats,
//! field keys, embedded messages and packed repeated fields from an in-memory slice.
//! `ValueWriter` and `ValueWriterBlob` produce the same encodings. They build wire-exact
//! fixtures and are only available in tests or with the `test` feature.
//!
//! ```rust
//! use vtdecode_core::io::*;
//! ```

mod value_reader;
mod value_reader_slice;
#[cfg(any(test, feature = "test"))]
mod value_writer;
#[cfg(any(test, feature = "test"))]
mod value_writer_blob;

pub use value_reader::*;
pub use value_reader_slice::*;
#[cfg(any(test, feature = "test"))]
pub use value_writer::*;
#[cfg(any(test, feature = "test"))]
pub use value_writer_blob::*;
