use super::{Coordinates, GeometryTrait, bounds_of};
use anyhow::{Result, ensure};
use itertools::Itertools;
use std::fmt::Debug;

/// Orientation class of a ring, derived from the sign of its shoelace sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingWinding {
	/// Clockwise on screen in y-down tile space. Opens a new polygon.
	Exterior,
	/// Counter-clockwise on screen. A hole in the preceding exterior ring.
	Interior,
	/// Zero area, neither orientation.
	Degenerate,
}

/// A closed ring of a polygon.
///
/// Only the distinct vertices are stored. The closing edge from the last vertex back to
/// the first is implicit, exactly as a `ClosePath` command implies it on the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct RingGeometry(pub Vec<Coordinates>);

impl RingGeometry {
	/// Twice the signed area, computed exactly over integer coordinates.
	///
	/// Sums `(x[i-1] - x[i]) * (y[i] + y[i-1])` over every edge including the implicit
	/// closing edge. This equals the plain shoelace sum `sum(x[i] * y[i+1] - x[i+1] * y[i])`
	/// over the raw tile coordinates and is positive for rings that run clockwise on a
	/// y-down screen.
	///
	/// Measured with the y axis flipped up, the signed area of a ring is the negation of
	/// this value: exterior rings have a negative signed area there and a positive
	/// `twice_area` here. [`GeometryTrait::area`] follows `twice_area`.
	#[must_use]
	pub fn twice_area(&self) -> i128 {
		let mut sum = 0i128;
		if let Some(mut p2) = self.0.last() {
			for p1 in &self.0 {
				let dx = i128::from(p2.x()) - i128::from(p1.x());
				let sy = i128::from(p1.y()) + i128::from(p2.y());
				sum += dx * sy;
				p2 = p1;
			}
		}
		sum
	}

	#[must_use]
	pub fn winding(&self) -> RingWinding {
		match self.twice_area() {
			0 => RingWinding::Degenerate,
			a if a > 0 => RingWinding::Exterior,
			_ => RingWinding::Interior,
		}
	}

	/// Number of distinct vertices in the ring.
	#[must_use]
	pub fn distinct_count(&self) -> usize {
		self.0.iter().unique().count()
	}

	/// Returns the vertices with the first one repeated at the end.
	#[must_use]
	pub fn closed_coordinates(&self) -> Vec<Coordinates> {
		let mut coordinates = self.0.clone();
		if let Some(first) = self.0.first() {
			coordinates.push(*first);
		}
		coordinates
	}
}

impl GeometryTrait for RingGeometry {
	/// Signed area: positive for exterior rings, negative for holes.
	fn area(&self) -> f64 {
		self.twice_area() as f64 / 2.0
	}

	fn verify(&self) -> Result<()> {
		ensure!(
			self.distinct_count() >= 3,
			"Ring must have at least 3 distinct points"
		);
		ensure!(self.twice_area() != 0, "Ring must enclose a non-zero area");
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[i32; 4]> {
		bounds_of(&self.0)
	}
}

impl Debug for RingGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(RingGeometry, Coordinates);
crate::impl_composite!(RingGeometry, Coordinates);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
	use super::*;
	use crate::geo::CompositeGeometryTrait;
	use rstest::rstest;

	fn square() -> RingGeometry {
		RingGeometry::from(&[[0, 0], [10, 0], [10, 10], [0, 10]])
	}

	#[test]
	fn square_is_exterior() {
		let ring = square();
		assert_eq!(ring.twice_area(), 200);
		assert_eq!(ring.area(), 100.0);
		assert_eq!(ring.winding(), RingWinding::Exterior);
	}

	#[test]
	fn twice_area_is_negated_signed_area_with_y_up() {
		let ring = square();
		let shoelace: i128 = ring
			.closed_coordinates()
			.windows(2)
			.map(|w| {
				i128::from(w[0].x()) * i128::from(w[1].y()) - i128::from(w[1].x()) * i128::from(w[0].y())
			})
			.sum();
		assert_eq!(ring.twice_area(), shoelace);

		let mirrored = RingGeometry::from(&[[0, 0], [10, 0], [10, -10], [0, -10]]);
		assert_eq!(mirrored.twice_area(), -ring.twice_area());
		assert_eq!(mirrored.winding(), RingWinding::Interior);
	}

	#[test]
	fn reversed_square_is_interior() {
		let ring = RingGeometry::from(&[[0, 0], [0, 10], [10, 10], [10, 0]]);
		assert_eq!(ring.area(), -100.0);
		assert_eq!(ring.winding(), RingWinding::Interior);
	}

	#[test]
	fn collinear_ring_is_degenerate() {
		let ring = RingGeometry::from(&[[0, 0], [5, 5], [10, 10]]);
		assert_eq!(ring.winding(), RingWinding::Degenerate);
		assert!(ring.verify().is_err());
	}

	#[rstest]
	#[case(&[[0, 0], [10, 0], [10, 10]], true)]
	#[case(&[[0, 0], [10, 0], [0, 0]], false)]
	#[case(&[[0, 0], [10, 0]], false)]
	fn verify_distinct_vertices(#[case] coords: &[[i32; 2]], #[case] ok: bool) {
		assert_eq!(RingGeometry::from(coords).verify().is_ok(), ok);
	}

	#[test]
	fn extreme_coordinates_do_not_overflow() {
		let ring = RingGeometry::from(&[[i32::MIN, i32::MIN], [i32::MAX, i32::MIN], [i32::MAX, i32::MAX]]);
		assert_eq!(ring.winding(), RingWinding::Exterior);
	}

	#[test]
	fn closed_coordinates() {
		assert_eq!(
			square().closed_coordinates(),
			vec![
				Coordinates::new(0, 0),
				Coordinates::new(10, 0),
				Coordinates::new(10, 10),
				Coordinates::new(0, 10),
				Coordinates::new(0, 0),
			]
		);
		assert!(RingGeometry::new().closed_coordinates().is_empty());
	}

	#[test]
	fn bounds() {
		assert_eq!(square().compute_bounds(), Some([0, 0, 10, 10]));
	}
}
