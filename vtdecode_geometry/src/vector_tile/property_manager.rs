use super::DecodeError;
use crate::geo::{GeoProperties, GeoValue};

/// The key and value dictionaries of a layer.
///
/// Both lists are positional: a tag refers to an entry by its index in wire order, so
/// duplicates are kept as they are.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyManager {
	keys: Vec<String>,
	values: Vec<GeoValue>,
}

impl PropertyManager {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn from_parts(keys: Vec<String>, values: Vec<GeoValue>) -> Self {
		Self { keys, values }
	}

	pub fn add_key(&mut self, key: String) {
		self.keys.push(key);
	}

	pub fn add_val(&mut self, value: GeoValue) {
		self.values.push(value);
	}

	#[must_use]
	pub fn keys(&self) -> &[String] {
		&self.keys
	}

	#[must_use]
	pub fn values(&self) -> &[GeoValue] {
		&self.values
	}

	fn key(&self, index: u32) -> Result<&String, DecodeError> {
		self.keys.get(index as usize).ok_or_else(|| {
			DecodeError::OutOfRangeTagIndex(format!("key index {index} >= key count {}", self.keys.len()))
		})
	}

	fn val(&self, index: u32) -> Result<&GeoValue, DecodeError> {
		self.values.get(index as usize).ok_or_else(|| {
			DecodeError::OutOfRangeTagIndex(format!(
				"value index {index} >= value count {}",
				self.values.len()
			))
		})
	}

	/// Resolves a feature's flat tag list into its properties.
	///
	/// The list is read as consecutive `(key index, value index)` pairs. A later pair with
	/// the same key replaces the value of an earlier one.
	///
	/// # Errors
	///
	/// Returns [`DecodeError::OutOfRangeTagIndex`] if an index lies outside its dictionary
	/// or the list ends with a key index that has no value index.
	pub fn decode_tag_ids(&self, tag_ids: &[u32]) -> Result<GeoProperties, DecodeError> {
		if tag_ids.len() % 2 != 0 {
			return Err(DecodeError::OutOfRangeTagIndex(format!(
				"tag list has odd length {}, key index {} has no value index",
				tag_ids.len(),
				tag_ids[tag_ids.len() - 1]
			)));
		}

		let mut properties = GeoProperties::new();
		for pair in tag_ids.chunks_exact(2) {
			let key = self.key(pair[0])?;
			let value = self.val(pair[1])?;
			properties.insert(key.clone(), value.clone());
		}
		Ok(properties)
	}
}
