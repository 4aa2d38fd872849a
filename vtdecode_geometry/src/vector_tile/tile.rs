use super::layer::VectorTileLayer;
use anyhow::{Context, Result};
use log::{debug, trace, warn};
use std::collections::{BTreeMap, btree_map};
use vtdecode_core::{
	Blob,
	io::{ValueReader, ValueReaderSlice, WIRE_LEN},
};

/// A decoded tile: its layers, keyed by name.
///
/// Layer headers, dictionaries and raw features are parsed when the tile is created;
/// geometries and tags are decoded lazily by each layer.
#[derive(Debug, Default)]
pub struct VectorTile {
	layers: BTreeMap<String, VectorTileLayer>,
}

impl VectorTile {
	/// Collects layers by name. If two layers share a name, the later one wins.
	#[must_use]
	pub fn new(layers: Vec<VectorTileLayer>) -> VectorTile {
		let mut tile = VectorTile::default();
		for layer in layers {
			tile.insert(layer);
		}
		tile
	}

	fn insert(&mut self, layer: VectorTileLayer) {
		if let Some(previous) = self.layers.insert(layer.name().to_string(), layer) {
			warn!("duplicate layer name '{}', keeping the later layer", previous.name());
		}
	}

	pub fn from_blob(blob: &Blob) -> Result<VectorTile> {
		VectorTile::from_slice(blob.as_slice())
	}

	/// Parses a `Tile` message. Unknown fields are skipped.
	pub fn from_slice(data: &[u8]) -> Result<VectorTile> {
		let mut reader = ValueReaderSlice::new(data);

		let mut tile = VectorTile::default();
		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(3, WIRE_LEN) => {
					let layer = VectorTileLayer::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader")?
							.as_mut(),
					)
					.context("Failed to read VectorTileLayer")?;
					tile.insert(layer);
				}
				(field, wire_type) => {
					trace!("skipping unknown tile field {field} (wire type {wire_type})");
					reader
						.skip_pbf_field(wire_type)
						.with_context(|| format!("Failed to skip tile field {field}"))?;
				}
			}
		}

		debug!("read tile with {} layers from {} bytes", tile.len(), data.len());
		Ok(tile)
	}

	#[must_use]
	pub fn get_layer(&self, name: &str) -> Option<&VectorTileLayer> {
		self.layers.get(name)
	}

	/// Layer names in ascending order.
	pub fn layer_names(&self) -> impl Iterator<Item = &str> {
		self.layers.keys().map(String::as_str)
	}

	pub fn layers(&self) -> btree_map::Values<'_, String, VectorTileLayer> {
		self.layers.values()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.layers.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.layers.is_empty()
	}

	/// Decodes every feature of every layer, stopping at the first error.
	pub fn force(&self) -> Result<()> {
		for layer in self.layers.values() {
			layer.force()?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::vector_tile::{
		DecodeError, GeomType,
		fixture::{CommandBuilder, FixtureLayer, tile_blob},
	};
	use pretty_assertions::assert_eq;
	use vtdecode_core::io::{ValueWriter, ValueWriterBlob};

	fn point_layer(name: &str, extent: u32) -> FixtureLayer {
		FixtureLayer::new(name).extent(extent).feature(
			GeomType::Point,
			CommandBuilder::new().move_to(&[[1, 1]]).build(),
			&[],
		)
	}

	#[test]
	fn layers_by_name() -> Result<()> {
		let blob = tile_blob(&[point_layer("water", 4096), point_layer("roads", 4096)])?;
		let tile = VectorTile::from_blob(&blob)?;
		assert_eq!(tile.len(), 2);
		assert_eq!(tile.layer_names().collect::<Vec<_>>(), vec!["roads", "water"]);
		assert_eq!(tile.get_layer("water").map(VectorTileLayer::feature_count), Some(1));
		assert!(tile.get_layer("buildings").is_none());
		Ok(())
	}

	#[test]
	fn later_layer_with_same_name_wins() -> Result<()> {
		let blob = tile_blob(&[point_layer("water", 512), point_layer("water", 1024)])?;
		let tile = VectorTile::from_blob(&blob)?;
		assert_eq!(tile.len(), 1);
		assert_eq!(tile.get_layer("water").map(VectorTileLayer::extent), Some(1024));
		Ok(())
	}

	#[test]
	fn empty_tile() -> Result<()> {
		let tile = VectorTile::from_slice(&[])?;
		assert!(tile.is_empty());
		tile.force()?;
		Ok(())
	}

	#[test]
	fn unknown_tile_fields_are_skipped() -> Result<()> {
		let mut writer = ValueWriterBlob::new();
		writer.write_pbf_key(7, 2)?;
		writer.write_pbf_string("not a layer")?;
		writer.write_pbf_key(3, 2)?;
		writer.write_pbf_blob(&point_layer("water", 4096).to_blob()?)?;
		let tile = VectorTile::from_blob(&writer.into_blob())?;
		assert_eq!(tile.layer_names().collect::<Vec<_>>(), vec!["water"]);
		Ok(())
	}

	#[test]
	fn truncated_tile_fails() -> Result<()> {
		let blob = tile_blob(&[point_layer("water", 4096)])?;
		let data = blob.as_slice();
		assert!(VectorTile::from_slice(&data[..data.len() - 1]).is_err());
		Ok(())
	}

	#[test]
	fn oversized_length_prefix_fails() {
		// layer of 12 bytes whose name claims a length of 2^60
		let data = [
			0x1A, 12, 0x0A, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x10, b'a', b'b',
		];
		let err = VectorTile::from_slice(&data).unwrap_err();
		assert_eq!(err.to_string(), "Failed to read VectorTileLayer");
		assert!(err.root_cause().to_string().starts_with("Length 1152921504606846976 exceeds"));
	}

	#[test]
	fn decoding_stays_lazy_until_forced() -> Result<()> {
		let tile = VectorTile::from_blob(&tile_blob(&[point_layer("a", 4096), point_layer("b", 4096)])?)?;
		assert!(tile.layers().all(|layer| layer.decoded_count() == 0));
		tile.force()?;
		assert!(tile.layers().all(|layer| layer.decoded_count() == 1));
		Ok(())
	}

	#[test]
	fn force_reports_decode_errors() -> Result<()> {
		let broken = FixtureLayer::new("broken").feature(GeomType::LineString, vec![9, 0, 0, 2], &[]);
		let tile = VectorTile::from_blob(&tile_blob(&[broken])?)?;
		let err = tile.force().unwrap_err();
		assert!(matches!(
			err.downcast_ref::<DecodeError>(),
			Some(DecodeError::MalformedCommand(_))
		));
		Ok(())
	}

	#[test]
	fn tiles_decode_in_parallel() -> Result<()> {
		let blob = tile_blob(&[point_layer("water", 4096)])?;
		std::thread::scope(|scope| {
			let handles: Vec<_> = (0..4)
				.map(|_| scope.spawn(|| VectorTile::from_blob(&blob).and_then(|tile| tile.force())))
				.collect();
			for handle in handles {
				assert!(handle.join().expect("thread panicked").is_ok());
			}
		});
		Ok(())
	}
}
