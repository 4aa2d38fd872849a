//! Builders for wire-exact tiles, used by tests in this workspace.
//!
//! Nothing here is needed to decode tiles. The builders write the protobuf schema with
//! [`ValueWriterBlob`], so tests can describe a tile in a few lines instead of shipping
//! binary files.

use super::{CMD_CLOSE_PATH, CMD_LINE_TO, CMD_MOVE_TO, GeomType, encode_command, zigzag_encode};
use crate::geo::GeoValue;
use anyhow::{Context, Result};
use vtdecode_core::{
	Blob,
	io::{ValueWriter, ValueWriterBlob},
};

/// Encodes draw commands from absolute coordinates into command integers.
#[derive(Clone, Debug, Default)]
pub struct CommandBuilder {
	data: Vec<u32>,
	x: i32,
	y: i32,
}

impl CommandBuilder {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn move_to(self, points: &[[i32; 2]]) -> Self {
		self.command(CMD_MOVE_TO, points)
	}

	#[must_use]
	pub fn line_to(self, points: &[[i32; 2]]) -> Self {
		self.command(CMD_LINE_TO, points)
	}

	#[must_use]
	pub fn close_path(mut self) -> Self {
		self.data.push(encode_command(CMD_CLOSE_PATH, 1));
		self
	}

	/// `MoveTo` the first point, `LineTo` the rest, then `ClosePath`.
	#[must_use]
	pub fn ring(self, points: &[[i32; 2]]) -> Self {
		match points.split_first() {
			Some((first, rest)) => self.move_to(&[*first]).line_to(rest).close_path(),
			None => self,
		}
	}

	/// Appends an arbitrary integer, e.g. to produce malformed streams.
	#[must_use]
	pub fn raw(mut self, value: u32) -> Self {
		self.data.push(value);
		self
	}

	#[must_use]
	pub fn build(self) -> Vec<u32> {
		self.data
	}

	fn command(mut self, id: u32, points: &[[i32; 2]]) -> Self {
		self.data.push(encode_command(id, points.len() as u32));
		for &[x, y] in points {
			self.data.push(zigzag_encode(x.wrapping_sub(self.x)));
			self.data.push(zigzag_encode(y.wrapping_sub(self.y)));
			self.x = x;
			self.y = y;
		}
		self
	}
}

#[derive(Clone, Debug)]
struct FixtureFeature {
	id: Option<u64>,
	geom_type: u64,
	geometry: Vec<u32>,
	tags: Vec<u32>,
	packed: bool,
}

/// A layer description that serializes to a protobuf `Layer` message.
#[derive(Clone, Debug, Default)]
pub struct FixtureLayer {
	name: Option<String>,
	extent: Option<u32>,
	version: Option<u32>,
	keys: Vec<String>,
	values: Vec<GeoValue>,
	features: Vec<FixtureFeature>,
}

impl FixtureLayer {
	#[must_use]
	pub fn new(name: &str) -> Self {
		Self {
			name: Some(name.to_string()),
			..Self::default()
		}
	}

	/// A layer without the mandatory name field.
	#[must_use]
	pub fn unnamed() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn extent(mut self, extent: u32) -> Self {
		self.extent = Some(extent);
		self
	}

	#[must_use]
	pub fn version(mut self, version: u32) -> Self {
		self.version = Some(version);
		self
	}

	#[must_use]
	pub fn key(mut self, key: &str) -> Self {
		self.keys.push(key.to_string());
		self
	}

	#[must_use]
	pub fn value(mut self, value: GeoValue) -> Self {
		self.values.push(value);
		self
	}

	/// Adds a feature with packed `tags` and `geometry`.
	#[must_use]
	pub fn feature(self, geom_type: GeomType, geometry: Vec<u32>, tags: &[u32]) -> Self {
		self.feature_raw(geom_type.as_u64(), geometry, tags, true)
	}

	/// Adds a feature with an arbitrary geometry type number and a choice of packed or
	/// unpacked repeated fields.
	#[must_use]
	pub fn feature_raw(mut self, geom_type: u64, geometry: Vec<u32>, tags: &[u32], packed: bool) -> Self {
		let id = self.features.len() as u64 + 1;
		self.features.push(FixtureFeature {
			id: Some(id),
			geom_type,
			geometry,
			tags: tags.to_vec(),
			packed,
		});
		self
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new();

		if let Some(name) = &self.name {
			writer.write_pbf_key(1, 2)?;
			writer.write_pbf_string(name)?;
		}
		for feature in &self.features {
			writer.write_pbf_key(2, 2)?;
			writer.write_pbf_blob(&feature_blob(feature).context("Failed to write fixture feature")?)?;
		}
		for key in &self.keys {
			writer.write_pbf_key(3, 2)?;
			writer.write_pbf_string(key)?;
		}
		for value in &self.values {
			writer.write_pbf_key(4, 2)?;
			writer.write_pbf_blob(&value_blob(value)?)?;
		}
		if let Some(extent) = self.extent {
			writer.write_pbf_key(5, 0)?;
			writer.write_varint(u64::from(extent))?;
		}
		if let Some(version) = self.version {
			writer.write_pbf_key(15, 0)?;
			writer.write_varint(u64::from(version))?;
		}

		Ok(writer.into_blob())
	}
}

fn write_repeated(writer: &mut ValueWriterBlob, field: u32, data: &[u32], packed: bool) -> Result<()> {
	if packed {
		if !data.is_empty() {
			writer.write_pbf_key(field, 2)?;
			writer.write_pbf_packed_uint32(data)?;
		}
	} else {
		for &value in data {
			writer.write_pbf_key(field, 0)?;
			writer.write_varint(u64::from(value))?;
		}
	}
	Ok(())
}

fn feature_blob(feature: &FixtureFeature) -> Result<Blob> {
	let mut writer = ValueWriterBlob::new();
	if let Some(id) = feature.id {
		writer.write_pbf_key(1, 0)?;
		writer.write_varint(id)?;
	}
	write_repeated(&mut writer, 2, &feature.tags, feature.packed)?;
	writer.write_pbf_key(3, 0)?;
	writer.write_varint(feature.geom_type)?;
	write_repeated(&mut writer, 4, &feature.geometry, feature.packed)?;
	Ok(writer.into_blob())
}

/// Serializes a `Value` message.
pub fn value_blob(value: &GeoValue) -> Result<Blob> {
	let mut writer = ValueWriterBlob::new();
	match value {
		GeoValue::String(s) => {
			writer.write_pbf_key(1, 2)?;
			writer.write_pbf_string(s)?;
		}
		GeoValue::Float(v) => {
			writer.write_pbf_key(2, 5)?;
			writer.write_f32(*v)?;
		}
		GeoValue::Double(v) => {
			writer.write_pbf_key(3, 1)?;
			writer.write_f64(*v)?;
		}
		GeoValue::Int(v) => {
			writer.write_pbf_key(4, 0)?;
			writer.write_varint(*v as u64)?;
		}
		GeoValue::UInt(v) => {
			writer.write_pbf_key(5, 0)?;
			writer.write_varint(*v)?;
		}
		GeoValue::SInt(v) => {
			writer.write_pbf_key(6, 0)?;
			writer.write_svarint(*v)?;
		}
		GeoValue::Bool(v) => {
			writer.write_pbf_key(7, 0)?;
			writer.write_varint(u64::from(*v))?;
		}
	}
	Ok(writer.into_blob())
}

/// Serializes a `Tile` message containing the given layers in order.
pub fn tile_blob(layers: &[FixtureLayer]) -> Result<Blob> {
	let mut writer = ValueWriterBlob::new();
	for layer in layers {
		writer.write_pbf_key(3, 2)?;
		writer.write_pbf_blob(&layer.to_blob()?)?;
	}
	Ok(writer.into_blob())
}
