use super::{Coordinates, GeometryTrait, MultiPointGeometry, SingleGeometryTrait};
use anyhow::Result;
use std::fmt::Debug;

/// A single position, produced by a point feature with exactly one `MoveTo`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointGeometry(pub Coordinates);

impl PointGeometry {
	#[must_use]
	pub fn new(c: Coordinates) -> Self {
		Self(c)
	}
	#[must_use]
	pub fn x(&self) -> i32 {
		self.0.x()
	}
	#[must_use]
	pub fn y(&self) -> i32 {
		self.0.y()
	}
	#[must_use]
	pub fn as_coord(&self) -> &Coordinates {
		&self.0
	}
}

impl GeometryTrait for PointGeometry {
	fn area(&self) -> f64 {
		0.0
	}

	fn verify(&self) -> Result<()> {
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[i32; 4]> {
		Some([self.x(), self.y(), self.x(), self.y()])
	}
}

impl SingleGeometryTrait<MultiPointGeometry> for PointGeometry {
	fn into_multi(self) -> MultiPointGeometry {
		MultiPointGeometry(vec![self])
	}
}

impl Debug for PointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl From<Coordinates> for PointGeometry {
	fn from(value: Coordinates) -> Self {
		Self(value)
	}
}

impl From<[i32; 2]> for PointGeometry {
	fn from(value: [i32; 2]) -> Self {
		Self(Coordinates::from(value))
	}
}

impl<'a> From<&'a [i32; 2]> for PointGeometry {
	fn from(value: &'a [i32; 2]) -> Self {
		Self(Coordinates::from(value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accessors_and_debug() {
		let point = PointGeometry::from([7, 9]);
		assert_eq!(point.x(), 7);
		assert_eq!(point.y(), 9);
		assert_eq!(point.as_coord(), &Coordinates::new(7, 9));
		assert_eq!(format!("{point:?}"), "[7, 9]");
	}

	#[test]
	fn geometry_trait() {
		let point = PointGeometry::from([7, 9]);
		assert_eq!(point.area(), 0.0);
		assert!(point.verify().is_ok());
		assert_eq!(point.compute_bounds(), Some([7, 9, 7, 9]));
	}

	#[test]
	fn into_multi() {
		let multi = PointGeometry::from([1, 2]).into_multi();
		assert_eq!(multi, MultiPointGeometry::from(&[[1, 2]]));
	}
}
