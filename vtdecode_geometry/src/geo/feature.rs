use super::{GeoProperties, Geometry};
use std::fmt::Debug;

/// A decoded feature: a typed geometry together with its resolved attributes.
///
/// The type parameter is the concrete geometry type of the sequence the feature was
/// produced by, e.g. `Feature<PolygonGeometry>`. [`Feature::into_geometry`] erases it.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature<G = Geometry> {
	pub geometry: G,
	pub properties: GeoProperties,
}

impl<G> Feature<G> {
	pub fn new(geometry: G, properties: GeoProperties) -> Self {
		Self { geometry, properties }
	}

	/// Converts the geometry into the general [`Geometry`] type.
	pub fn into_geometry(self) -> Feature<Geometry>
	where
		Geometry: From<G>,
	{
		Feature {
			geometry: Geometry::from(self.geometry),
			properties: self.properties,
		}
	}
}
