//! This module defines the `ValueWriter` trait for writing protobuf-encoded values.
//!
//! The decoder itself never writes tiles. The writer is only compiled for tests and with
//! the `test` feature, where it assembles wire-exact fixtures (layers, features, values)
//! without checked-in binaries.

use super::ValueWriterBlob;
use crate::Blob;
use anyhow::{Context, Result};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// A trait for writing protobuf values to a destination.
pub trait ValueWriter {
	/// Returns a mutable reference to the underlying writer.
	fn get_writer(&mut self) -> &mut dyn Write;

	/// Returns the current write position.
	fn position(&mut self) -> Result<u64>;

	/// Returns `true` if nothing has been written yet.
	fn is_empty(&mut self) -> Result<bool> {
		Ok(self.position()? == 0)
	}

	/// Writes an unsigned variable-length integer (varint).
	fn write_varint(&mut self, mut value: u64) -> Result<()> {
		while value >= 0x80 {
			self.get_writer().write_all(&[((value & 0x7F) as u8) | 0x80])?;
			value >>= 7;
		}
		self.get_writer().write_all(&[value as u8])?;
		Ok(())
	}

	/// Writes a zigzag-encoded varint (`sint64`).
	fn write_svarint(&mut self, value: i64) -> Result<()> {
		self.write_varint(((value << 1) ^ (value >> 63)) as u64)
	}

	/// Writes a little-endian 32-bit float.
	fn write_f32(&mut self, value: f32) -> Result<()> {
		Ok(self.get_writer().write_f32::<LittleEndian>(value)?)
	}

	/// Writes a little-endian 64-bit float.
	fn write_f64(&mut self, value: f64) -> Result<()> {
		Ok(self.get_writer().write_f64::<LittleEndian>(value)?)
	}

	/// Writes raw bytes.
	fn write_blob(&mut self, blob: &Blob) -> Result<()> {
		self.get_writer().write_all(blob.as_slice())?;
		Ok(())
	}

	/// Writes a protobuf field key.
	fn write_pbf_key(&mut self, field_number: u32, wire_type: u8) -> Result<()> {
		self
			.write_varint((u64::from(field_number) << 3) | u64::from(wire_type))
			.context("Failed to write PBF key")
	}

	/// Writes a packed repeated `uint32` field body (length prefix plus varints).
	fn write_pbf_packed_uint32(&mut self, data: &[u32]) -> Result<()> {
		let mut writer = ValueWriterBlob::new();
		for &value in data {
			writer
				.write_varint(u64::from(value))
				.context("Failed to write varint for packed uint32")?;
		}
		self
			.write_pbf_blob(&writer.into_blob())
			.context("Failed to write packed uint32 blob")
	}

	/// Writes a length-delimited bytes field body.
	fn write_pbf_blob(&mut self, blob: &Blob) -> Result<()> {
		self
			.write_varint(blob.len())
			.context("Failed to write varint for blob length")?;
		self.write_blob(blob).context("Failed to write PBF blob")
	}

	/// Writes a length-delimited string field body.
	fn write_pbf_string(&mut self, text: &str) -> Result<()> {
		self
			.write_varint(text.len() as u64)
			.context("Failed to write varint for string length")?;
		self.get_writer().write_all(text.as_bytes())?;
		Ok(())
	}
}
