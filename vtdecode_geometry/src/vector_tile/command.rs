//! Decoding of the geometry command stream.
//!
//! A feature's `geometry` field is a flat list of `u32`. Each command integer packs an id
//! into its lowest three bits and a repeat count into the rest (`id | count << 3`).
//! `MoveTo` and `LineTo` are followed by `count` pairs of zigzag-encoded deltas,
//! `ClosePath` by nothing. The deltas move a cursor that starts at `(0, 0)` for every
//! feature; each emitted op carries the absolute cursor position after the move.

use super::DecodeError;
use crate::geo::Coordinates;
use log::trace;

pub const CMD_MOVE_TO: u32 = 1;
pub const CMD_LINE_TO: u32 = 2;
pub const CMD_CLOSE_PATH: u32 = 7;

/// A single drawing operation with absolute tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOp {
	MoveTo(Coordinates),
	LineTo(Coordinates),
	ClosePath,
}

#[must_use]
pub fn zigzag_decode(n: u32) -> i32 {
	((n >> 1) as i32) ^ -((n & 1) as i32)
}

#[must_use]
pub fn zigzag_encode(n: i32) -> u32 {
	((n << 1) ^ (n >> 31)) as u32
}

/// Packs a command id and its repeat count into one command integer.
#[must_use]
pub fn encode_command(id: u32, count: u32) -> u32 {
	id | (count << 3)
}

fn command_name(id: u32) -> &'static str {
	match id {
		CMD_MOVE_TO => "MoveTo",
		CMD_LINE_TO => "LineTo",
		_ => "ClosePath",
	}
}

/// Decodes the raw geometry integers of one feature into draw ops.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedCommand`] for an unknown command id, a `MoveTo`/`LineTo`
/// with count 0, a `ClosePath` with a count other than 1, a parameter list that ends
/// early, or a cursor that leaves the `i32` range.
pub fn decode_commands(data: &[u32]) -> Result<Vec<DrawOp>, DecodeError> {
	let mut ops = Vec::with_capacity(data.len() / 2);
	let mut x = 0i32;
	let mut y = 0i32;
	let mut pos = 0;

	while let Some(&command) = data.get(pos) {
		let id = command & 0x7;
		let count = (command >> 3) as usize;
		pos += 1;

		match id {
			CMD_MOVE_TO | CMD_LINE_TO => {
				if count == 0 {
					return Err(DecodeError::MalformedCommand(format!(
						"{} with count 0 at offset {}",
						command_name(id),
						pos - 1
					)));
				}
				let params = data.get(pos..pos + count * 2).ok_or_else(|| {
					DecodeError::MalformedCommand(format!(
						"{} at offset {} needs {} parameters, but only {} remain",
						command_name(id),
						pos - 1,
						count * 2,
						data.len() - pos
					))
				})?;
				for pair in params.chunks_exact(2) {
					let (Some(nx), Some(ny)) = (
						x.checked_add(zigzag_decode(pair[0])),
						y.checked_add(zigzag_decode(pair[1])),
					) else {
						return Err(DecodeError::MalformedCommand(format!(
							"cursor overflow at offset {}",
							pos - 1
						)));
					};
					x = nx;
					y = ny;
					let point = Coordinates::new(x, y);
					ops.push(if id == CMD_MOVE_TO {
						DrawOp::MoveTo(point)
					} else {
						DrawOp::LineTo(point)
					});
				}
				pos += count * 2;
			}
			CMD_CLOSE_PATH => {
				if count != 1 {
					return Err(DecodeError::MalformedCommand(format!(
						"ClosePath with count {count} at offset {}",
						pos - 1
					)));
				}
				ops.push(DrawOp::ClosePath);
			}
			_ => {
				return Err(DecodeError::MalformedCommand(format!(
					"unknown command id {id} at offset {}",
					pos - 1
				)));
			}
		}
	}

	trace!("decoded {} geometry integers into {} draw ops", data.len(), ops.len());
	Ok(ops)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn c(x: i32, y: i32) -> Coordinates {
		Coordinates::new(x, y)
	}

	#[rstest]
	#[case(0, 0)]
	#[case(1, -1)]
	#[case(2, 1)]
	#[case(3, -2)]
	#[case(4294967294, 2147483647)]
	#[case(4294967295, -2147483648)]
	fn zigzag(#[case] encoded: u32, #[case] decoded: i32) {
		assert_eq!(zigzag_decode(encoded), decoded);
		assert_eq!(zigzag_encode(decoded), encoded);
	}

	#[test]
	fn zigzag_inverse_over_samples() {
		for n in [i32::MIN, i32::MIN + 1, -65536, -1000, -1, 0, 1, 7, 4096, 1 << 20, i32::MAX - 1, i32::MAX] {
			assert_eq!(zigzag_decode(zigzag_encode(n)), n);
		}
		for n in (i32::MIN..=i32::MAX).step_by(65521) {
			assert_eq!(zigzag_decode(zigzag_encode(n)), n);
		}
	}

	#[test]
	fn encode_command_packs_id_and_count() {
		assert_eq!(encode_command(CMD_MOVE_TO, 1), 9);
		assert_eq!(encode_command(CMD_LINE_TO, 3), 26);
		assert_eq!(encode_command(CMD_CLOSE_PATH, 1), 15);
	}

	#[test]
	fn cursor_persists_across_commands() -> Result<(), DecodeError> {
		// MoveTo(2,3) LineTo(+1,+1) LineTo(-3,0) ClosePath
		let data = [9, 4, 6, 18, 2, 2, 5, 0, 15];
		assert_eq!(
			decode_commands(&data)?,
			vec![
				DrawOp::MoveTo(c(2, 3)),
				DrawOp::LineTo(c(3, 4)),
				DrawOp::LineTo(c(0, 4)),
				DrawOp::ClosePath,
			]
		);
		Ok(())
	}

	#[test]
	fn move_to_with_count_emits_one_op_per_pair() -> Result<(), DecodeError> {
		// MoveTo count 2: (5,7) then (+3,+2)
		let data = [17, 10, 14, 6, 4];
		assert_eq!(
			decode_commands(&data)?,
			vec![DrawOp::MoveTo(c(5, 7)), DrawOp::MoveTo(c(8, 9))]
		);
		Ok(())
	}

	#[test]
	fn empty_input_decodes_to_nothing() -> Result<(), DecodeError> {
		assert!(decode_commands(&[])?.is_empty());
		Ok(())
	}

	#[rstest]
	#[case::unknown_id(vec![9, 0, 0, 3])]
	#[case::move_to_count_zero(vec![1])]
	#[case::line_to_count_zero(vec![9, 0, 0, 2])]
	#[case::close_path_count_two(vec![9, 0, 0, 23])]
	#[case::close_path_count_zero(vec![9, 0, 0, 7])]
	#[case::truncated_pair(vec![9, 0])]
	#[case::missing_second_pair(vec![17, 0, 0, 2])]
	#[case::overflow(vec![9, 4294967294, 0, 10, 2, 0])]
	fn malformed(#[case] data: Vec<u32>) {
		let err = decode_commands(&data).unwrap_err();
		assert!(matches!(err, DecodeError::MalformedCommand(_)), "{err:?}");
	}

	#[test]
	fn error_message_names_offset() {
		let err = decode_commands(&[9, 0, 0, 3]).unwrap_err();
		assert_eq!(err.message(), "unknown command id 3 at offset 3");
	}
}
