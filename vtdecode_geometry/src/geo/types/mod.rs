// Integer geometry primitives produced by the vector tile decoder.
//
// Coordinates stay in tile space (`0..extent`, y pointing down). The single types
// (`PointGeometry`, `LineStringGeometry`, `PolygonGeometry`) convert into their multi
// counterparts through `SingleGeometryTrait`; vector-backed types share
// `CompositeGeometryTrait`.

mod coordinates;
mod linestring;
mod macros;
mod multi_linestring;
mod multi_point;
mod multi_polygon;
mod point;
mod polygon;
mod ring;
mod traits;

pub use coordinates::*;
pub use linestring::*;
pub use multi_linestring::*;
pub use multi_point::*;
pub use multi_polygon::*;
pub use point::*;
pub use polygon::*;
pub use ring::*;
pub use traits::*;
