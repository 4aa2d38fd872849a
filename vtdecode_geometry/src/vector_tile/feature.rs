use super::geometry_type::GeomType;
use anyhow::{Context, Result};
use log::trace;
use vtdecode_core::io::{ValueReader, WIRE_LEN, WIRE_VARINT};

/// A feature exactly as stored in the layer: nothing is decoded beyond the wire format.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawFeature {
	/// Opaque feature id, never interpreted by the decoder.
	pub id: Option<u64>,
	pub geom_type: GeomType,
	/// Packed command integers.
	pub geometry: Vec<u32>,
	/// Flat list of `(key index, value index)` pairs.
	pub tag_ids: Vec<u32>,
}

impl RawFeature {
	/// Reads a `Feature` message.
	///
	/// `tags` and `geometry` are accepted packed and unpacked; repeated occurrences are
	/// concatenated. Unknown fields are skipped.
	pub fn read(reader: &mut dyn ValueReader<'_>) -> Result<RawFeature> {
		let mut f = RawFeature::default();

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, WIRE_VARINT) => f.id = Some(reader.read_varint().context("Failed to read feature ID")?),
				(2, WIRE_LEN) => f
					.tag_ids
					.extend(reader.read_pbf_packed_uint32().context("Failed to read tag IDs")?),
				(2, WIRE_VARINT) => f.tag_ids.push(reader.read_pbf_uint32().context("Failed to read tag ID")?),
				(3, WIRE_VARINT) => {
					f.geom_type = GeomType::from(reader.read_varint().context("Failed to read geometry type")?);
				}
				(4, WIRE_LEN) => f
					.geometry
					.extend(reader.read_pbf_packed_uint32().context("Failed to read geometry data")?),
				(4, WIRE_VARINT) => f
					.geometry
					.push(reader.read_pbf_uint32().context("Failed to read geometry integer")?),
				(field, wire_type) => {
					trace!("skipping unknown feature field {field} (wire type {wire_type})");
					reader
						.skip_pbf_field(wire_type)
						.with_context(|| format!("Failed to skip feature field {field}"))?;
				}
			}
		}

		Ok(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use vtdecode_core::io::{ValueReaderSlice, ValueWriter, ValueWriterBlob};

	fn read(writer: ValueWriterBlob) -> Result<RawFeature> {
		let blob = writer.into_blob();
		RawFeature::read(&mut ValueReaderSlice::new(blob.as_slice()))
	}

	#[test]
	fn packed_fields() -> Result<()> {
		let mut writer = ValueWriterBlob::new();
		writer.write_pbf_key(1, 0)?;
		writer.write_varint(42)?;
		writer.write_pbf_key(2, 2)?;
		writer.write_pbf_packed_uint32(&[0, 1])?;
		writer.write_pbf_key(3, 0)?;
		writer.write_varint(1)?;
		writer.write_pbf_key(4, 2)?;
		writer.write_pbf_packed_uint32(&[9, 50, 34])?;

		assert_eq!(
			read(writer)?,
			RawFeature {
				id: Some(42),
				geom_type: GeomType::Point,
				geometry: vec![9, 50, 34],
				tag_ids: vec![0, 1],
			}
		);
		Ok(())
	}

	#[test]
	fn unpacked_fields_are_concatenated() -> Result<()> {
		let mut writer = ValueWriterBlob::new();
		for value in [9, 50, 34] {
			writer.write_pbf_key(4, 0)?;
			writer.write_varint(value)?;
		}
		writer.write_pbf_key(2, 0)?;
		writer.write_varint(3)?;
		writer.write_pbf_key(2, 2)?;
		writer.write_pbf_packed_uint32(&[4])?;

		let feature = read(writer)?;
		assert_eq!(feature.geometry, vec![9, 50, 34]);
		assert_eq!(feature.tag_ids, vec![3, 4]);
		assert_eq!(feature.geom_type, GeomType::Unknown);
		assert_eq!(feature.id, None);
		Ok(())
	}

	#[test]
	fn unknown_fields_are_skipped() -> Result<()> {
		let mut writer = ValueWriterBlob::new();
		writer.write_pbf_key(8, 2)?;
		writer.write_pbf_string("future")?;
		writer.write_pbf_key(9, 5)?;
		writer.write_f32(1.0)?;
		writer.write_pbf_key(3, 0)?;
		writer.write_varint(2)?;

		assert_eq!(read(writer)?.geom_type, GeomType::LineString);
		Ok(())
	}

	#[test]
	fn truncated_geometry_fails() {
		let data = [0x22, 0x05, 0x09];
		assert!(RawFeature::read(&mut ValueReaderSlice::new(&data)).is_err());
	}
}
