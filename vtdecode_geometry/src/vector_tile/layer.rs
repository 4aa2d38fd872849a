//! Vector tile **layer** decoding.
//!
//! A [`VectorTileLayer`] is built from a protobuf `Layer` message:
//!  * field 1: `name` (string, required)
//!  * field 2: repeated `feature` (embedded message)
//!  * field 3: repeated `keys` (string)
//!  * field 4: repeated `values` (embedded message)
//!  * field 5: `extent` (varint, default 4096, must be positive)
//!  * field 15: `version` (varint, default 1)
//!
//! Construction parses the header, the dictionaries and the raw features, and sorts the
//! raw features into one bucket per geometry category. Geometry and tags are decoded
//! later, feature by feature, when one of the six feature sequences reaches them.

use super::{
	DecodeError, DrawOp, RawFeature,
	assemble::{assemble_lines, assemble_points, assemble_polygons},
	command::decode_commands,
	geometry_type::GeomType,
	lazy::{Decoded, LazyFeatures},
	property_manager::PropertyManager,
	value::GeoValuePBF,
};
use crate::geo::{
	Feature, GeoProperties, GeoValue, Geometry, LineStringGeometry, MultiLineStringGeometry, MultiPointGeometry,
	MultiPolygonGeometry, PointGeometry, PolygonGeometry,
};
use anyhow::{Context, Result, anyhow, ensure};
use itertools::Either;
use log::{debug, trace, warn};
use std::fmt::Debug;
use vtdecode_core::io::{ValueReader, WIRE_LEN, WIRE_VARINT};

pub const DEFAULT_EXTENT: u32 = 4096;
pub const DEFAULT_VERSION: u32 = 1;

/// Number of raw features per declared geometry type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeometrySummary {
	pub points: usize,
	pub lines: usize,
	pub polygons: usize,
	pub unknown: usize,
}

/// Raw feature positions, partitioned by geometry type in a single pass.
#[derive(Debug, Default, PartialEq)]
struct GeometryBuckets {
	points: Vec<usize>,
	lines: Vec<usize>,
	polygons: Vec<usize>,
	unknown: usize,
}

impl GeometryBuckets {
	fn segregate(features: &[RawFeature]) -> Self {
		let mut buckets = GeometryBuckets::default();
		for (index, feature) in features.iter().enumerate() {
			match feature.geom_type {
				GeomType::Point => buckets.points.push(index),
				GeomType::LineString => buckets.lines.push(index),
				GeomType::Polygon => buckets.polygons.push(index),
				GeomType::Unknown => buckets.unknown += 1,
			}
		}
		buckets
	}
}

type Assembler<S, M> = fn(&[DrawOp]) -> Result<Either<S, M>, DecodeError>;

/// A decoded layer header with lazily decoded features.
///
/// The six sequences [`points`](Self::points), [`multi_points`](Self::multi_points),
/// [`lines`](Self::lines), [`multi_lines`](Self::multi_lines),
/// [`polygons`](Self::polygons) and [`multi_polygons`](Self::multi_polygons) decode each
/// feature on first access and keep the result for the lifetime of the layer. Features of
/// unknown geometry type appear in none of them but still count in
/// [`feature_count`](Self::feature_count).
///
/// The layer is `Sync`; sequences may be traversed from several threads at once.
pub struct VectorTileLayer {
	name: String,
	extent: u32,
	version: u32,
	features: Vec<RawFeature>,
	property_manager: PropertyManager,
	points: LazyFeatures<PointGeometry, MultiPointGeometry>,
	lines: LazyFeatures<LineStringGeometry, MultiLineStringGeometry>,
	polygons: LazyFeatures<PolygonGeometry, MultiPolygonGeometry>,
	unknown: usize,
}

impl VectorTileLayer {
	/// Creates a layer from already parsed parts.
	///
	/// # Errors
	///
	/// Returns an error if `extent` is 0.
	pub fn new(
		name: String,
		extent: u32,
		version: u32,
		features: Vec<RawFeature>,
		property_manager: PropertyManager,
	) -> Result<VectorTileLayer> {
		ensure!(extent > 0, "Layer '{name}' has an extent of 0");

		let buckets = GeometryBuckets::segregate(&features);
		debug!(
			"layer '{name}': {} points, {} lines, {} polygons, {} keys, {} values",
			buckets.points.len(),
			buckets.lines.len(),
			buckets.polygons.len(),
			property_manager.keys().len(),
			property_manager.values().len()
		);
		if buckets.unknown > 0 {
			warn!(
				"layer '{name}': ignoring {} features with unknown geometry type",
				buckets.unknown
			);
		}

		Ok(VectorTileLayer {
			name,
			extent,
			version,
			features,
			property_manager,
			points: LazyFeatures::new(buckets.points),
			lines: LazyFeatures::new(buckets.lines),
			polygons: LazyFeatures::new(buckets.polygons),
			unknown: buckets.unknown,
		})
	}

	/// Reads a `Layer` message. Unknown fields are skipped.
	pub fn read(reader: &mut dyn ValueReader<'_>) -> Result<VectorTileLayer> {
		let mut extent = DEFAULT_EXTENT;
		let mut features: Vec<RawFeature> = Vec::new();
		let mut name = None;
		let mut property_manager = PropertyManager::new();
		let mut version = DEFAULT_VERSION;

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, WIRE_LEN) => name = Some(reader.read_pbf_string().context("Failed to read layer name")?),
				(2, WIRE_LEN) => {
					let feature = RawFeature::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader for feature")?
							.as_mut(),
					)
					.with_context(|| format!("Failed to read feature {}", features.len()))?;
					features.push(feature);
				}
				(3, WIRE_LEN) => {
					property_manager.add_key(reader.read_pbf_string().context("Failed to read property key")?);
				}
				(4, WIRE_LEN) => {
					property_manager.add_val(
						GeoValue::read(
							reader
								.get_pbf_sub_reader()
								.context("Failed to get PBF sub-reader for property value")?
								.as_mut(),
						)
						.context("Failed to read GeoValue")?,
					);
				}
				(5, WIRE_VARINT) => {
					extent = u32::try_from(reader.read_varint().context("Failed to read extent")?)
						.context("Extent exceeds 32 bits")?;
				}
				(15, WIRE_VARINT) => {
					version = u32::try_from(reader.read_varint().context("Failed to read version")?)
						.context("Version exceeds 32 bits")?;
				}
				(field, wire_type) => {
					trace!("skipping unknown layer field {field} (wire type {wire_type})");
					reader
						.skip_pbf_field(wire_type)
						.with_context(|| format!("Failed to skip layer field {field}"))?;
				}
			}
		}

		let name = name
			.ok_or(anyhow!("Layer name is required"))
			.context("Failed to get layer name")?;
		VectorTileLayer::new(name, extent, version, features, property_manager)
	}

	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[must_use]
	pub fn extent(&self) -> u32 {
		self.extent
	}

	#[must_use]
	pub fn version(&self) -> u32 {
		self.version
	}

	/// All raw features in wire order, including those of unknown geometry type.
	#[must_use]
	pub fn features(&self) -> &[RawFeature] {
		&self.features
	}

	#[must_use]
	pub fn feature_count(&self) -> usize {
		self.features.len()
	}

	#[must_use]
	pub fn property_manager(&self) -> &PropertyManager {
		&self.property_manager
	}

	#[must_use]
	pub fn geometry_summary(&self) -> GeometrySummary {
		GeometrySummary {
			points: self.points.len(),
			lines: self.lines.len(),
			polygons: self.polygons.len(),
			unknown: self.unknown,
		}
	}

	/// Number of features decoded so far, over all categories.
	#[must_use]
	pub fn decoded_count(&self) -> usize {
		self.points.decoded() + self.lines.decoded() + self.polygons.decoded()
	}

	/// Resolves a tag list against this layer's dictionaries.
	pub fn decode_tag_ids(&self, tag_ids: &[u32]) -> Result<GeoProperties, DecodeError> {
		self.property_manager.decode_tag_ids(tag_ids)
	}

	fn decode_feature<S, M>(&self, index: usize, assemble: Assembler<S, M>) -> Decoded<S, M> {
		let raw = &self.features[index];
		trace!(
			"layer '{}': decoding feature {index} ({:?}, {} geometry integers, {} tags)",
			self.name,
			raw.geom_type,
			raw.geometry.len(),
			raw.tag_ids.len()
		);
		let ops = decode_commands(&raw.geometry)?;
		let geometry = assemble(&ops)?;
		let properties = self.decode_tag_ids(&raw.tag_ids)?;
		Ok(match geometry {
			Either::Left(single) => Either::Left(Feature::new(single, properties)),
			Either::Right(multi) => Either::Right(Feature::new(multi, properties)),
		})
	}

	pub fn points(&self) -> impl Iterator<Item = Result<&Feature<PointGeometry>, DecodeError>> + '_ {
		self.points.singles(|index| self.decode_feature(index, assemble_points))
	}

	pub fn multi_points(&self) -> impl Iterator<Item = Result<&Feature<MultiPointGeometry>, DecodeError>> + '_ {
		self.points.multis(|index| self.decode_feature(index, assemble_points))
	}

	pub fn lines(&self) -> impl Iterator<Item = Result<&Feature<LineStringGeometry>, DecodeError>> + '_ {
		self.lines.singles(|index| self.decode_feature(index, assemble_lines))
	}

	pub fn multi_lines(&self) -> impl Iterator<Item = Result<&Feature<MultiLineStringGeometry>, DecodeError>> + '_ {
		self.lines.multis(|index| self.decode_feature(index, assemble_lines))
	}

	pub fn polygons(&self) -> impl Iterator<Item = Result<&Feature<PolygonGeometry>, DecodeError>> + '_ {
		self.polygons.singles(|index| self.decode_feature(index, assemble_polygons))
	}

	pub fn multi_polygons(&self) -> impl Iterator<Item = Result<&Feature<MultiPolygonGeometry>, DecodeError>> + '_ {
		self.polygons.multis(|index| self.decode_feature(index, assemble_polygons))
	}

	/// Decodes every feature now, in the order points, multi points, lines, multi lines,
	/// polygons, multi polygons, and returns the first error.
	///
	/// After a successful `force` all sequences are served from memory.
	pub fn force(&self) -> Result<()> {
		let context = || format!("Failed to decode layer '{}'", self.name);
		for feature in self.points() {
			feature.with_context(context)?;
		}
		for feature in self.multi_points() {
			feature.with_context(context)?;
		}
		for feature in self.lines() {
			feature.with_context(context)?;
		}
		for feature in self.multi_lines() {
			feature.with_context(context)?;
		}
		for feature in self.polygons() {
			feature.with_context(context)?;
		}
		for feature in self.multi_polygons() {
			feature.with_context(context)?;
		}
		Ok(())
	}

	/// Returns all decodable features as general [`Feature`]s in wire order.
	///
	/// Categories are decoded one after the other (points, lines, polygons), so the error
	/// returned is the first one of the first failing category.
	pub fn to_features(&self) -> Result<Vec<Feature>> {
		let mut features: Vec<(usize, Feature)> = Vec::with_capacity(self.features.len());
		collect_features(&self.points, |i| self.decode_feature(i, assemble_points), &mut features)?;
		collect_features(&self.lines, |i| self.decode_feature(i, assemble_lines), &mut features)?;
		collect_features(&self.polygons, |i| self.decode_feature(i, assemble_polygons), &mut features)?;
		features.sort_by_key(|(index, _)| *index);
		Ok(features.into_iter().map(|(_, feature)| feature).collect())
	}
}

fn collect_features<S, M, F>(lazy: &LazyFeatures<S, M>, decode: F, out: &mut Vec<(usize, Feature)>) -> Result<(), DecodeError>
where
	S: Clone,
	M: Clone,
	Geometry: From<S> + From<M>,
	F: Fn(usize) -> Decoded<S, M>,
{
	for (slot, &index) in lazy.indices().iter().enumerate() {
		let feature = match lazy.get(slot, &decode) {
			Ok(Either::Left(feature)) => feature.clone().into_geometry(),
			Ok(Either::Right(feature)) => feature.clone().into_geometry(),
			Err(err) => return Err(err.clone()),
		};
		out.push((index, feature));
	}
	Ok(())
}

impl Debug for VectorTileLayer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("VectorTileLayer")
			.field("name", &self.name)
			.field("extent", &self.extent)
			.field("version", &self.version)
			.field("features", &self.features.len())
			.field("points", &self.points)
			.field("lines", &self.lines)
			.field("polygons", &self.polygons)
			.finish()
	}
}
