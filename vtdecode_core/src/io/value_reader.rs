//! This module defines the `ValueReader` trait for reading protobuf-encoded values.
//!
//! # Overview
//!
//! Vector tiles are protocol buffers. `ValueReader` provides the handful of primitives the
//! decoder needs: varints, zigzag varints, little-endian fixed-width floats, field keys,
//! length-delimited sub-messages, packed repeated `uint32` fields and strings. It also knows
//! how to skip a field it does not understand, so that readers built on top of it tolerate
//! fields added by newer encoders.
//!
//! # Examples
//!
//! ```rust
//! use vtdecode_core::io::{ValueReader, ValueReaderSlice};
//!
//! let mut reader = ValueReaderSlice::new(&[0xAC, 0x02]);
//! assert_eq!(reader.read_varint().unwrap(), 300);
//! ```

use crate::Blob;
use anyhow::{Context, Result, bail};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek};

/// A simple alias for types implementing both `Seek` and `Read`, used for convenience.
pub trait SeekRead: Seek + Read {}

/// Protobuf wire type of a varint field.
pub const WIRE_VARINT: u8 = 0;
/// Protobuf wire type of a 64-bit fixed-width field.
pub const WIRE_I64: u8 = 1;
/// Protobuf wire type of a length-delimited field.
pub const WIRE_LEN: u8 = 2;
/// Protobuf wire type of a 32-bit fixed-width field.
pub const WIRE_I32: u8 = 5;

/// A trait for reading protobuf values from an in-memory source.
pub trait ValueReader<'a> {
	/// Returns the underlying reader to access raw bytes.
	fn get_reader(&mut self) -> &mut dyn SeekRead;

	/// Returns the total length of the readable data.
	fn len(&self) -> u64;

	/// Returns the current position within the readable data.
	fn position(&mut self) -> u64;

	/// Checks if there is no data to read.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the number of bytes remaining to be read.
	fn remaining(&mut self) -> u64 {
		self.len() - self.position()
	}

	/// Checks if there are any bytes remaining to be read.
	fn has_remaining(&mut self) -> bool {
		self.remaining() > 0
	}

	/// Fails unless at least `length` bytes remain.
	fn ensure_remaining(&mut self, length: u64) -> Result<()> {
		let remaining = self.remaining();
		if length > remaining {
			bail!("Length {length} exceeds the {remaining} remaining bytes");
		}
		Ok(())
	}

	/// Reads a variable-length unsigned integer (varint).
	///
	/// # Errors
	/// Returns an error if the data ends inside the varint or the varint is longer than 10 bytes.
	fn read_varint(&mut self) -> Result<u64> {
		let mut value = 0;
		let mut shift = 0;
		loop {
			let byte = self.get_reader().read_u8().context("Unexpected end of data inside varint")?;
			value |= (u64::from(byte) & 0x7F) << shift;
			if byte & 0x80 == 0 {
				break;
			}
			shift += 7;
			if shift >= 70 {
				bail!("Varint too long");
			}
		}
		Ok(value)
	}

	/// Reads a zigzag-encoded varint (`sint64`).
	fn read_svarint(&mut self) -> Result<i64> {
		let sint_value = self.read_varint()? as i64;
		Ok((sint_value >> 1) ^ -(sint_value & 1))
	}

	/// Reads a little-endian 32-bit float (wire type 5).
	fn read_f32(&mut self) -> Result<f32> {
		Ok(self.get_reader().read_f32::<LittleEndian>()?)
	}

	/// Reads a little-endian 64-bit float (wire type 1).
	fn read_f64(&mut self) -> Result<f64> {
		Ok(self.get_reader().read_f64::<LittleEndian>()?)
	}

	/// Reads `length` raw bytes.
	///
	/// # Errors
	/// Returns an error if fewer than `length` bytes remain.
	fn read_blob(&mut self, length: u64) -> Result<Blob> {
		self.ensure_remaining(length)?;
		let mut vec = vec![0u8; length as usize];
		self.get_reader().read_exact(&mut vec)?;
		Ok(Blob::from(vec))
	}

	/// Reads a UTF-8 encoded string of `length` bytes.
	///
	/// # Errors
	/// Returns an error if fewer than `length` bytes remain or if the bytes are not valid UTF-8.
	fn read_string(&mut self, length: u64) -> Result<String> {
		self.ensure_remaining(length)?;
		let mut vec = vec![0u8; length as usize];
		self.get_reader().read_exact(&mut vec)?;
		Ok(String::from_utf8(vec)?)
	}

	/// Reads a protobuf key and splits it into `(field_number, wire_type)`.
	fn read_pbf_key(&mut self) -> Result<(u32, u8)> {
		let value = self.read_varint().context("Failed to read varint for PBF key")?;
		Ok(((value >> 3) as u32, (value & 0x07) as u8))
	}

	/// Returns a sub-reader limited to the next `length` bytes and advances past them.
	fn get_sub_reader<'b>(&'b mut self, length: u64) -> Result<Box<dyn ValueReader<'b> + 'b>>;

	/// Returns a sub-reader for a length-delimited embedded message.
	fn get_pbf_sub_reader<'b>(&'b mut self) -> Result<Box<dyn ValueReader<'b> + 'b>> {
		let length = self
			.read_varint()
			.context("Failed to read varint for sub-reader length")?;
		self.get_sub_reader(length).context("Failed to get sub-reader")
	}

	/// Reads a packed repeated `uint32` field.
	///
	/// # Errors
	/// Returns an error if the field is truncated or an element does not fit into 32 bits.
	fn read_pbf_packed_uint32(&mut self) -> Result<Vec<u32>> {
		let mut reader = self
			.get_pbf_sub_reader()
			.context("Failed to get PBF sub-reader for packed uint32")?;
		let mut values = Vec::new();
		while reader.has_remaining() {
			let value = reader
				.read_varint()
				.context("Failed to read varint for packed uint32")?;
			values.push(u32::try_from(value).context("Packed uint32 value exceeds 32 bits")?);
		}
		Ok(values)
	}

	/// Reads a single unpacked `uint32` element of a repeated field.
	fn read_pbf_uint32(&mut self) -> Result<u32> {
		let value = self.read_varint().context("Failed to read varint for uint32")?;
		u32::try_from(value).context("uint32 value exceeds 32 bits")
	}

	/// Reads a length-delimited string field.
	fn read_pbf_string(&mut self) -> Result<String> {
		let length = self.read_varint().context("Failed to read varint for string length")?;
		self.read_string(length).context("Failed to read PBF string")
	}

	/// Reads a length-delimited bytes field.
	fn read_pbf_blob(&mut self) -> Result<Blob> {
		let length = self.read_varint().context("Failed to read varint for blob length")?;
		self.read_blob(length).context("Failed to read PBF blob")
	}

	/// Skips over the value of a field with the given wire type.
	///
	/// Groups (wire types 3 and 4) are deprecated and never appear in vector tiles;
	/// they are rejected together with any undefined wire type.
	fn skip_pbf_field(&mut self, wire_type: u8) -> Result<()> {
		let length = match wire_type {
			WIRE_VARINT => {
				self.read_varint().context("Failed to skip varint field")?;
				return Ok(());
			}
			WIRE_I64 => 8,
			WIRE_LEN => self.read_varint().context("Failed to read length of skipped field")?,
			WIRE_I32 => 4,
			w => bail!("Unsupported wire type ({w})"),
		};
		self.get_sub_reader(length).context("Skipped field exceeds remaining data")?;
		Ok(())
	}
}
