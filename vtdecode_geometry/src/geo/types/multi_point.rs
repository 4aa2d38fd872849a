use super::{GeometryTrait, PointGeometry, bounds_of};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// Several points belonging to one feature, in command order.
#[derive(Clone, PartialEq, Eq)]
pub struct MultiPointGeometry(pub Vec<PointGeometry>);

impl GeometryTrait for MultiPointGeometry {
	fn area(&self) -> f64 {
		0.0
	}

	fn verify(&self) -> Result<()> {
		ensure!(!self.0.is_empty(), "MultiPoint must have at least one point");
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[i32; 4]> {
		bounds_of(self.0.iter().map(PointGeometry::as_coord))
	}
}

impl Debug for MultiPointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(MultiPointGeometry, PointGeometry);
crate::impl_composite!(MultiPointGeometry, PointGeometry);
