//! This module provides the `ValueReaderSlice` struct for reading protobuf values from a byte slice.
//!
//! Sub-readers created with [`ValueReader::get_sub_reader`] borrow a window of the same slice, so
//! nested messages are parsed without copying.
//!
//! # Examples
//!
//! ```rust
//! use vtdecode_core::io::{ValueReader, ValueReaderSlice};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let data = &[0x0A, 0x02, b'h', b'i'];
//!     let mut reader = ValueReaderSlice::new(data);
//!     assert_eq!(reader.read_pbf_key()?, (1, 2));
//!     assert_eq!(reader.read_pbf_string()?, "hi");
//!     Ok(())
//! }
//! ```

use super::{SeekRead, ValueReader};
use anyhow::{Result, anyhow, bail};
use std::io::Cursor;

/// Reads values from a borrowed byte slice.
pub struct ValueReaderSlice<'a> {
	cursor: Cursor<&'a [u8]>,
	len: u64,
}

impl<'a> ValueReaderSlice<'a> {
	/// Creates a new `ValueReaderSlice` positioned at the start of `slice`.
	#[must_use]
	pub fn new(slice: &'a [u8]) -> ValueReaderSlice<'a> {
		ValueReaderSlice {
			len: slice.len() as u64,
			cursor: Cursor::new(slice),
		}
	}
}

impl SeekRead for Cursor<&[u8]> {}

impl<'a> ValueReader<'a> for ValueReaderSlice<'a> {
	fn get_reader(&mut self) -> &mut dyn SeekRead {
		&mut self.cursor
	}

	fn len(&self) -> u64 {
		self.len
	}

	fn position(&mut self) -> u64 {
		self.cursor.position()
	}

	fn get_sub_reader<'b>(&'b mut self, length: u64) -> Result<Box<dyn ValueReader<'b> + 'b>> {
		let start = self.cursor.position();
		let end = start
			.checked_add(length)
			.ok_or(anyhow!("Sub-reader length overflows"))?;
		if end > self.len {
			bail!("Requested sub-reader length exceeds remaining data");
		}

		self.cursor.set_position(end);
		Ok(Box::new(ValueReaderSlice {
			len: length,
			cursor: Cursor::new(
				self
					.cursor
					.get_ref()
					.get(start as usize..end as usize)
					.ok_or(anyhow!("out of bounds"))?,
			),
		}))
	}
}
