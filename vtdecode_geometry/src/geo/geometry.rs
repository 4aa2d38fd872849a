use super::{
	GeometryTrait, LineStringGeometry, MultiLineStringGeometry, MultiPointGeometry, MultiPolygonGeometry,
	PointGeometry, PolygonGeometry, SingleGeometryTrait,
};
use std::fmt::Debug;

/// Any decoded geometry, single or multi.
#[derive(Clone, PartialEq, Eq)]
pub enum Geometry {
	Point(PointGeometry),
	LineString(LineStringGeometry),
	Polygon(PolygonGeometry),
	MultiPoint(MultiPointGeometry),
	MultiLineString(MultiLineStringGeometry),
	MultiPolygon(MultiPolygonGeometry),
}

impl Geometry {
	#[must_use]
	pub fn get_type(&self) -> &'static str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::LineString(_) => "LineString",
			Geometry::Polygon(_) => "Polygon",
			Geometry::MultiPoint(_) => "MultiPoint",
			Geometry::MultiLineString(_) => "MultiLineString",
			Geometry::MultiPolygon(_) => "MultiPolygon",
		}
	}

	#[must_use]
	pub fn is_multi(&self) -> bool {
		matches!(
			self,
			Geometry::MultiPoint(_) | Geometry::MultiLineString(_) | Geometry::MultiPolygon(_)
		)
	}

	#[must_use]
	pub fn into_multi(self) -> Self {
		match self {
			Geometry::Point(g) => Geometry::MultiPoint(g.into_multi()),
			Geometry::LineString(g) => Geometry::MultiLineString(g.into_multi()),
			Geometry::Polygon(g) => Geometry::MultiPolygon(g.into_multi()),
			Geometry::MultiPoint(_) | Geometry::MultiLineString(_) | Geometry::MultiPolygon(_) => self,
		}
	}

	#[must_use]
	pub fn area(&self) -> f64 {
		match self {
			Geometry::Point(g) => g.area(),
			Geometry::LineString(g) => g.area(),
			Geometry::Polygon(g) => g.area(),
			Geometry::MultiPoint(g) => g.area(),
			Geometry::MultiLineString(g) => g.area(),
			Geometry::MultiPolygon(g) => g.area(),
		}
	}

	#[must_use]
	pub fn compute_bounds(&self) -> Option<[i32; 4]> {
		match self {
			Geometry::Point(g) => g.compute_bounds(),
			Geometry::LineString(g) => g.compute_bounds(),
			Geometry::Polygon(g) => g.compute_bounds(),
			Geometry::MultiPoint(g) => g.compute_bounds(),
			Geometry::MultiLineString(g) => g.compute_bounds(),
			Geometry::MultiPolygon(g) => g.compute_bounds(),
		}
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner: &dyn Debug = match self {
			Geometry::Point(g) => g,
			Geometry::LineString(g) => g,
			Geometry::Polygon(g) => g,
			Geometry::MultiPoint(g) => g,
			Geometry::MultiLineString(g) => g,
			Geometry::MultiPolygon(g) => g,
		};
		f.debug_tuple(self.get_type()).field(inner).finish()
	}
}

macro_rules! impl_from_geometry {
	($($t:ty => $variant:ident),*) => {$(
		impl From<$t> for Geometry {
			fn from(geometry: $t) -> Self {
				Geometry::$variant(geometry)
			}
		}
	)*};
}

impl_from_geometry!(
	PointGeometry => Point,
	LineStringGeometry => LineString,
	PolygonGeometry => Polygon,
	MultiPointGeometry => MultiPoint,
	MultiLineStringGeometry => MultiLineString,
	MultiPolygonGeometry => MultiPolygon
);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
	use super::*;
	use crate::geo::RingGeometry;

	#[test]
	fn into_multi() {
		let point = Geometry::from(PointGeometry::from([1, 2]));
		assert!(!point.is_multi());
		let multi = point.into_multi();
		assert_eq!(multi.get_type(), "MultiPoint");
		assert_eq!(multi.clone().into_multi(), multi);
	}

	#[test]
	fn debug() {
		let line = Geometry::from(LineStringGeometry::from(&[[0, 0], [1, 1]]));
		assert_eq!(format!("{line:?}"), "LineString([[0, 0], [1, 1]])");
	}

	#[test]
	fn area_and_bounds() {
		let polygon = Geometry::from(PolygonGeometry::new(RingGeometry::from(&[[0, 0], [4, 0], [4, 4], [0, 4]])));
		assert_eq!(polygon.area(), 16.0);
		assert_eq!(polygon.compute_bounds(), Some([0, 0, 4, 4]));
	}
}
