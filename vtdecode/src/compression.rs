use anyhow::{Context, Result};
use flate2::bufread::GzDecoder;
use log::debug;
use std::{io::Read, path::Path};
use vtdecode_core::Blob;

/// Decompresses gzip-compressed data.
pub fn decompress_gzip(blob: &Blob) -> Result<Blob> {
	let mut decoder = GzDecoder::new(blob.as_slice());
	let mut decompressed_data = Vec::new();
	decoder
		.read_to_end(&mut decompressed_data)
		.with_context(|| format!("Failed to decompress {} bytes using Gzip", blob.len()))?;
	Ok(Blob::from(decompressed_data))
}

/// Reads a tile file, inflating it first if it starts with the gzip magic bytes.
pub fn load_tile(path: &Path) -> Result<Blob> {
	let blob = Blob::load_from_file(path)?;
	if blob.is_gzip() {
		debug!("{path:?} is gzip-compressed ({} bytes)", blob.len());
		decompress_gzip(&blob)
	} else {
		Ok(blob)
	}
}
