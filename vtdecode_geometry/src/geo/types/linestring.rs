use super::{Coordinates, GeometryTrait, MultiLineStringGeometry, SingleGeometryTrait, bounds_of};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// An open polyline: a `MoveTo` followed by one or more `LineTo` vertices.
#[derive(Clone, PartialEq, Eq)]
pub struct LineStringGeometry(pub Vec<Coordinates>);

impl GeometryTrait for LineStringGeometry {
	fn area(&self) -> f64 {
		0.0
	}

	fn verify(&self) -> Result<()> {
		ensure!(self.0.len() >= 2, "LineString must have at least two points");
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[i32; 4]> {
		bounds_of(&self.0)
	}
}

impl LineStringGeometry {
	/// Euclidean length of the polyline in tile units.
	#[must_use]
	pub fn length(&self) -> f64 {
		self
			.0
			.windows(2)
			.map(|w| {
				let dx = f64::from(w[1].x()) - f64::from(w[0].x());
				let dy = f64::from(w[1].y()) - f64::from(w[0].y());
				dx.hypot(dy)
			})
			.sum()
	}
}

impl SingleGeometryTrait<MultiLineStringGeometry> for LineStringGeometry {
	fn into_multi(self) -> MultiLineStringGeometry {
		MultiLineStringGeometry(vec![self])
	}
}

impl Debug for LineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(LineStringGeometry, Coordinates);
crate::impl_composite!(LineStringGeometry, Coordinates);
