use super::{GeometryTrait, LineStringGeometry, merge_bounds};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// Several line strings belonging to one feature, in command order.
#[derive(Clone, PartialEq, Eq)]
pub struct MultiLineStringGeometry(pub Vec<LineStringGeometry>);

impl GeometryTrait for MultiLineStringGeometry {
	fn area(&self) -> f64 {
		0.0
	}

	fn verify(&self) -> Result<()> {
		ensure!(!self.0.is_empty(), "MultiLineString must have at least one line");
		for line in &self.0 {
			line.verify()?;
		}
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[i32; 4]> {
		self.0.iter().map(GeometryTrait::compute_bounds).fold(None, merge_bounds)
	}
}

impl MultiLineStringGeometry {
	/// Sum of the lengths of all member lines.
	#[must_use]
	pub fn length(&self) -> f64 {
		self.0.iter().map(LineStringGeometry::length).sum()
	}
}

impl Debug for MultiLineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(MultiLineStringGeometry, LineStringGeometry);
crate::impl_composite!(MultiLineStringGeometry, LineStringGeometry);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geo::CompositeGeometryTrait;

	fn example() -> MultiLineStringGeometry {
		MultiLineStringGeometry::from(vec![
			LineStringGeometry::from(&[[0, 0], [0, 5]]),
			LineStringGeometry::from(&[[10, 10], [13, 14]]),
		])
	}

	#[test]
	fn verify() {
		assert!(example().verify().is_ok());
		assert!(MultiLineStringGeometry::new().verify().is_err());
		let broken = MultiLineStringGeometry::from(vec![LineStringGeometry::from(&[[0, 0]])]);
		assert!(broken.verify().is_err());
	}

	#[test]
	fn length_and_bounds() {
		let multi = example();
		assert_eq!(multi.length(), 10.0);
		assert_eq!(multi.compute_bounds(), Some([0, 0, 13, 14]));
	}
}
