//! This module provides the `ValueWriterBlob` struct for writing protobuf values into memory.

use super::ValueWriter;
use crate::Blob;
use anyhow::Result;
use std::io::{Cursor, Write};

/// Collects written values in an in-memory buffer.
pub struct ValueWriterBlob {
	cursor: Cursor<Vec<u8>>,
}

impl ValueWriterBlob {
	#[must_use]
	pub fn new() -> ValueWriterBlob {
		ValueWriterBlob {
			cursor: Cursor::new(Vec::new()),
		}
	}

	/// Converts the written data into a `Blob`.
	#[must_use]
	pub fn into_blob(self) -> Blob {
		Blob::from(self.cursor.into_inner())
	}
}

impl ValueWriter for ValueWriterBlob {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.cursor
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.cursor.position())
	}
}

impl Default for ValueWriterBlob {
	fn default() -> Self {
		Self::new()
	}
}
