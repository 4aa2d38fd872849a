//! This module provides the [`Blob`] struct, the owned byte buffer a tile arrives in.
//!
//! A loader (file system, object store, HTTP …) hands the decoder a `Blob`; the decoder only
//! ever borrows it as a slice. Once a tile has been parsed, the `Blob` may be dropped.
//!
//! # Examples
//!
//! ```rust
//! use vtdecode_core::Blob;
//!
//! let blob = Blob::from(vec![0x1a, 0x00]);
//! assert_eq!(blob.len(), 2);
//! assert_eq!(blob.as_slice(), &[0x1a, 0x00]);
//! ```

use anyhow::{Context, Result};
use std::fmt::Debug;
use std::path::Path;

/// A wrapper around [`Vec<u8>`] holding raw tile bytes.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Creates an empty `Blob`.
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	/// Returns the bytes as a slice.
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	/// Consumes the `Blob` and returns the underlying vector.
	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Number of bytes.
	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns `true` if the bytes start with the gzip magic number `1f 8b`.
	///
	/// Tiles stored in MBTiles, PMTiles or plain directories are frequently gzip-compressed;
	/// callers use this to decide whether to inflate before decoding.
	#[must_use]
	pub fn is_gzip(&self) -> bool {
		self.0.starts_with(&[0x1f, 0x8b])
	}

	/// Hexadecimal dump, bytes separated by spaces.
	#[must_use]
	pub fn as_hex(&self) -> String {
		self
			.0
			.iter()
			.map(|byte| format!("{byte:02x}"))
			.collect::<Vec<String>>()
			.join(" ")
	}

	/// Reads a whole file into a `Blob`.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be opened or read.
	pub fn load_from_file(path: &Path) -> Result<Self> {
		let bytes = std::fs::read(path).with_context(|| format!("Failed to read file {path:?}"))?;
		Ok(Blob(bytes))
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

/// Prints the byte length followed by a hex dump.
impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({}): {}", self.0.len(), self.as_hex())
	}
}
