use anyhow::Result;
use std::fmt::Debug;

/// Defines the basic interface shared by all decoded geometry types.
pub trait GeometryTrait: Debug + Clone + Sized {
	/// Returns the area of the geometry in square tile units.
	///
	/// Points and lines have no area and return 0. Rings return their signed area, which is
	/// positive for exterior rings and negative for holes (see [`super::RingGeometry`]), so
	/// the area of a polygon is the sum over its rings.
	fn area(&self) -> f64;

	/// Verifies the structural validity of the geometry, e.g. enough vertices per part.
	fn verify(&self) -> Result<()>;

	/// Returns `Some([x_min, y_min, x_max, y_max])`, or `None` if the geometry is empty.
	fn compute_bounds(&self) -> Option<[i32; 4]>;
}

/// Geometries that can be wrapped into their multi-geometry counterpart.
pub trait SingleGeometryTrait<Multi>: Debug + Clone {
	fn into_multi(self) -> Multi;
}

/// Composite geometries backed by a vector of simpler elements.
/// For example, a multi-polygon is made of polygons and a line string of coordinates.
pub trait CompositeGeometryTrait<Item>: Debug + Clone {
	/// Creates a new, empty composite geometry.
	fn new() -> Self;

	/// Returns an immutable reference to the inner collection of elements.
	fn as_vec(&self) -> &Vec<Item>;

	/// Returns a mutable reference to the inner collection of elements.
	fn as_mut_vec(&mut self) -> &mut Vec<Item>;

	/// Consumes the composite geometry and returns the inner collection of elements.
	fn into_inner(self) -> Vec<Item>;

	fn iter(&self) -> std::slice::Iter<'_, Item> {
		self.as_vec().iter()
	}

	fn is_empty(&self) -> bool {
		self.as_vec().is_empty()
	}

	fn len(&self) -> usize {
		self.as_vec().len()
	}

	fn push(&mut self, item: Item) {
		self.as_mut_vec().push(item);
	}

	fn first(&self) -> Option<&Item> {
		self.as_vec().first()
	}

	fn last(&self) -> Option<&Item> {
		self.as_vec().last()
	}
}
