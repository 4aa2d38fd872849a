//! # vtdecode
//!
//! Decoder for Mapbox Vector Tiles. A tile's layers are parsed eagerly; the geometry
//! and attributes of each feature are decoded on first access and memoized.
//!
//! ## Usage Example
//!
//! ```rust
//! use vtdecode::{Blob, geometry::vector_tile::VectorTile};
//!
//! // an empty tile
//! let tile = VectorTile::from_blob(&Blob::new_empty()).unwrap();
//! assert!(tile.is_empty());
//! for layer in tile.layers() {
//!     for point in layer.points() {
//!         println!("{:?}", point.unwrap().geometry);
//!     }
//! }
//! ```

mod compression;

pub use compression::{decompress_gzip, load_tile};
pub use vtdecode_core as core;
pub use vtdecode_core::Blob;
pub use vtdecode_geometry as geometry;
