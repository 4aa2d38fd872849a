mod geo;
pub mod vector_tile;

pub use geo::*;
