use super::{GeometryTrait, PolygonGeometry, merge_bounds};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// Several polygons of one feature, each owning the holes that followed its exterior ring.
#[derive(Clone, PartialEq, Eq)]
pub struct MultiPolygonGeometry(pub Vec<PolygonGeometry>);

impl GeometryTrait for MultiPolygonGeometry {
	fn area(&self) -> f64 {
		self.0.iter().map(GeometryTrait::area).sum()
	}

	fn verify(&self) -> Result<()> {
		ensure!(!self.0.is_empty(), "MultiPolygon must have at least one polygon");
		for polygon in &self.0 {
			polygon.verify()?;
		}
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[i32; 4]> {
		self.0.iter().map(GeometryTrait::compute_bounds).fold(None, merge_bounds)
	}
}

impl MultiPolygonGeometry {
	/// Total number of holes over all member polygons.
	#[must_use]
	pub fn interior_count(&self) -> usize {
		self.0.iter().map(|p| p.interiors.len()).sum()
	}
}

impl Debug for MultiPolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

impl From<Vec<PolygonGeometry>> for MultiPolygonGeometry {
	fn from(value: Vec<PolygonGeometry>) -> Self {
		Self(value)
	}
}

crate::impl_composite!(MultiPolygonGeometry, PolygonGeometry);
