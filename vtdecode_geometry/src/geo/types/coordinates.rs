use std::fmt::Debug;

/// An absolute position in tile-local integer coordinates.
///
/// The origin is the top-left corner of the tile, `x` grows to the right and `y` grows
/// downwards. Values normally lie in `0..extent`, but geometries may overshoot the tile
/// edge into the buffer area, so negative values are valid.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinates([i32; 2]);

impl Coordinates {
	#[must_use]
	pub fn new(x: i32, y: i32) -> Self {
		Self([x, y])
	}

	#[must_use]
	pub fn x(&self) -> i32 {
		self.0[0]
	}

	#[must_use]
	pub fn y(&self) -> i32 {
		self.0[1]
	}

	/// Scales the coordinates into the unit square `[0, 1]` using the layer extent.
	#[must_use]
	pub fn to_normalized(&self, extent: u32) -> [f64; 2] {
		let extent = f64::from(extent);
		[f64::from(self.0[0]) / extent, f64::from(self.0[1]) / extent]
	}
}

/// Returns `[x_min, y_min, x_max, y_max]` over all coordinates, or `None` if there are none.
pub(crate) fn bounds_of<'a, I>(coordinates: I) -> Option<[i32; 4]>
where
	I: IntoIterator<Item = &'a Coordinates>,
{
	coordinates.into_iter().fold(None, |bounds, c| {
		Some(match bounds {
			None => [c.x(), c.y(), c.x(), c.y()],
			Some([x0, y0, x1, y1]) => [x0.min(c.x()), y0.min(c.y()), x1.max(c.x()), y1.max(c.y())],
		})
	})
}

/// Merges two optional bounding boxes.
pub(crate) fn merge_bounds(a: Option<[i32; 4]>, b: Option<[i32; 4]>) -> Option<[i32; 4]> {
	match (a, b) {
		(None, b) => b,
		(a, None) => a,
		(Some(a), Some(b)) => Some([a[0].min(b[0]), a[1].min(b[1]), a[2].max(b[2]), a[3].max(b[3])]),
	}
}

impl From<[i32; 2]> for Coordinates {
	fn from(value: [i32; 2]) -> Self {
		Coordinates(value)
	}
}

impl<'a> From<&'a [i32; 2]> for Coordinates {
	fn from(value: &'a [i32; 2]) -> Self {
		Coordinates(*value)
	}
}

impl From<(i32, i32)> for Coordinates {
	fn from(value: (i32, i32)) -> Self {
		Coordinates([value.0, value.1])
	}
}

impl From<Coordinates> for [i32; 2] {
	fn from(value: Coordinates) -> Self {
		value.0
	}
}

impl Debug for Coordinates {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}
