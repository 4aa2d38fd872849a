//! Vector Tile (MVT) decoding.
//!
//! Bytes flow through these submodules in order:
//!
//! - [`tile`]: parses the `Tile` message into layers keyed by name.
//! - [`layer`]: parses one layer, segregates its raw features by geometry type and
//!   exposes six lazily decoded, memoized feature sequences.
//! - [`command`]: turns a feature's command integers into absolute draw ops.
//! - [`assemble`]: builds single or multi geometries from draw ops, classifying polygon
//!   rings by winding.
//! - [`property_manager`]: resolves tag index pairs against the layer dictionaries.
//!
//! Decode failures of a single feature are reported as [`DecodeError`]; everything on
//! the wire level (truncated messages, bad wire types, missing layer names) surfaces as
//! an `anyhow::Error`.

mod assemble;
mod command;
mod error;
mod feature;
mod geometry_type;
mod layer;
mod lazy;
mod property_manager;
mod tile;
mod value;

#[cfg(any(test, feature = "test"))]
pub mod fixture;

pub use assemble::{assemble_lines, assemble_points, assemble_polygons};
pub use command::{CMD_CLOSE_PATH, CMD_LINE_TO, CMD_MOVE_TO, DrawOp, decode_commands, encode_command, zigzag_decode, zigzag_encode};
pub use error::DecodeError;
pub use feature::RawFeature;
pub use geometry_type::GeomType;
pub use layer::{DEFAULT_EXTENT, DEFAULT_VERSION, GeometrySummary, VectorTileLayer};
pub use lazy::{Decoded, LazyFeatures};
pub use property_manager::PropertyManager;
pub use tile::VectorTile;
pub use value::GeoValuePBF;
