use super::{GeometryTrait, MultiPolygonGeometry, RingGeometry, RingWinding, SingleGeometryTrait};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// One exterior ring plus zero or more holes.
#[derive(Clone, PartialEq, Eq)]
pub struct PolygonGeometry {
	pub exterior: RingGeometry,
	pub interiors: Vec<RingGeometry>,
}

impl PolygonGeometry {
	#[must_use]
	pub fn new(exterior: RingGeometry) -> Self {
		Self {
			exterior,
			interiors: Vec::new(),
		}
	}

	pub fn add_interior(&mut self, ring: RingGeometry) {
		self.interiors.push(ring);
	}

	/// Iterates over all rings, exterior first.
	pub fn rings(&self) -> impl Iterator<Item = &RingGeometry> {
		std::iter::once(&self.exterior).chain(&self.interiors)
	}
}

impl GeometryTrait for PolygonGeometry {
	/// Exterior area minus the area of the holes.
	fn area(&self) -> f64 {
		self.rings().map(RingGeometry::area).sum()
	}

	fn verify(&self) -> Result<()> {
		self.exterior.verify()?;
		ensure!(
			self.exterior.winding() == RingWinding::Exterior,
			"Polygon exterior ring has the orientation of a hole"
		);
		for ring in &self.interiors {
			ring.verify()?;
			ensure!(
				ring.winding() == RingWinding::Interior,
				"Polygon hole has the orientation of an exterior ring"
			);
		}
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[i32; 4]> {
		self.exterior.compute_bounds()
	}
}

impl SingleGeometryTrait<MultiPolygonGeometry> for PolygonGeometry {
	fn into_multi(self) -> MultiPolygonGeometry {
		MultiPolygonGeometry(vec![self])
	}
}

impl Debug for PolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.rings()).finish()
	}
}

impl From<RingGeometry> for PolygonGeometry {
	fn from(exterior: RingGeometry) -> Self {
		Self::new(exterior)
	}
}
