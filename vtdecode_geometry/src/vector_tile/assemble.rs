//! Assembly of draw ops into typed geometries.
//!
//! The op stream is split into parts, one per `MoveTo`. Every category has its own
//! assembler that checks the shape of each part and returns either the single or the
//! multi geometry, depending on how many members it found.

use super::{DecodeError, DrawOp};
use crate::geo::{
	Coordinates, LineStringGeometry, MultiLineStringGeometry, MultiPointGeometry, MultiPolygonGeometry, PointGeometry,
	PolygonGeometry, RingGeometry, RingWinding,
};
use itertools::Either;

/// The vertices of one `MoveTo`-initiated part and whether it ended with `ClosePath`.
#[derive(Debug, PartialEq)]
struct Part {
	vertices: Vec<Coordinates>,
	closed: bool,
}

fn malformed(msg: String) -> DecodeError {
	DecodeError::MalformedGeometryPart(msg)
}

fn split_parts(ops: &[DrawOp]) -> Result<Vec<Part>, DecodeError> {
	let mut parts: Vec<Part> = Vec::new();
	for op in ops {
		match op {
			DrawOp::MoveTo(c) => parts.push(Part {
				vertices: vec![*c],
				closed: false,
			}),
			DrawOp::LineTo(c) => match parts.last_mut() {
				Some(part) if !part.closed => part.vertices.push(*c),
				Some(_) => return Err(malformed(format!("LineTo after ClosePath in part {}", parts.len()))),
				None => return Err(malformed(String::from("geometry starts with LineTo instead of MoveTo"))),
			},
			DrawOp::ClosePath => match parts.last_mut() {
				Some(part) if !part.closed => part.closed = true,
				Some(_) => return Err(malformed(format!("repeated ClosePath in part {}", parts.len()))),
				None => return Err(malformed(String::from("geometry starts with ClosePath instead of MoveTo"))),
			},
		}
	}
	Ok(parts)
}

/// Assembles a point feature: every part must be a lone `MoveTo`.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedGeometryPart`] if there are no parts, or a part
/// contains a `LineTo` or `ClosePath`.
pub fn assemble_points(ops: &[DrawOp]) -> Result<Either<PointGeometry, MultiPointGeometry>, DecodeError> {
	let parts = split_parts(ops)?;
	let mut points = Vec::with_capacity(parts.len());
	for (index, part) in parts.into_iter().enumerate() {
		if part.closed || part.vertices.len() != 1 {
			return Err(malformed(format!(
				"point part {index} has {} vertices{}",
				part.vertices.len(),
				if part.closed { " and a ClosePath" } else { "" }
			)));
		}
		points.push(PointGeometry::new(part.vertices[0]));
	}
	match points.len() {
		0 => Err(malformed(String::from("point geometry without MoveTo"))),
		1 => Ok(Either::Left(points.remove(0))),
		_ => Ok(Either::Right(MultiPointGeometry(points))),
	}
}

/// Assembles a line feature: every part is a `MoveTo` followed by at least one `LineTo`.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedGeometryPart`] if there are no parts, a part has fewer
/// than two vertices, or a part is closed.
pub fn assemble_lines(ops: &[DrawOp]) -> Result<Either<LineStringGeometry, MultiLineStringGeometry>, DecodeError> {
	let parts = split_parts(ops)?;
	let mut lines = Vec::with_capacity(parts.len());
	for (index, part) in parts.into_iter().enumerate() {
		if part.closed {
			return Err(malformed(format!("line part {index} contains a ClosePath")));
		}
		if part.vertices.len() < 2 {
			return Err(malformed(format!("line part {index} has no LineTo")));
		}
		lines.push(LineStringGeometry(part.vertices));
	}
	match lines.len() {
		0 => Err(malformed(String::from("line geometry without MoveTo"))),
		1 => Ok(Either::Left(lines.remove(0))),
		_ => Ok(Either::Right(MultiLineStringGeometry(lines))),
	}
}

/// Assembles a polygon feature.
///
/// Every part is a ring: `MoveTo`, at least two `LineTo` and a final `ClosePath`. A ring
/// winding clockwise on screen (positive shoelace sum in y-down tile space) is an
/// exterior ring and starts a new polygon. Any other ring is a hole of the most recent
/// exterior ring. If the last `LineTo` returns to the starting point, that duplicate
/// vertex is dropped because the closing edge is implicit.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedGeometryPart`] if there are no rings, a ring is not
/// closed, has fewer than three distinct vertices or zero area, or a hole appears before
/// the first exterior ring.
pub fn assemble_polygons(ops: &[DrawOp]) -> Result<Either<PolygonGeometry, MultiPolygonGeometry>, DecodeError> {
	let parts = split_parts(ops)?;
	let mut polygons: Vec<PolygonGeometry> = Vec::new();
	for (index, part) in parts.into_iter().enumerate() {
		if !part.closed {
			return Err(malformed(format!("polygon ring {index} is not closed")));
		}
		if part.vertices.len() < 3 {
			return Err(malformed(format!(
				"polygon ring {index} has {} vertices, at least 3 are required",
				part.vertices.len()
			)));
		}

		let mut vertices = part.vertices;
		if vertices.first() == vertices.last() {
			vertices.pop();
		}
		let ring = RingGeometry(vertices);
		if ring.distinct_count() < 3 {
			return Err(malformed(format!(
				"polygon ring {index} has {} distinct vertices, at least 3 are required",
				ring.distinct_count()
			)));
		}

		match ring.winding() {
			RingWinding::Exterior => polygons.push(PolygonGeometry::new(ring)),
			RingWinding::Interior => match polygons.last_mut() {
				Some(polygon) => polygon.add_interior(ring),
				None => {
					return Err(malformed(format!(
						"polygon ring {index} is a hole without a preceding exterior ring"
					)));
				}
			},
			RingWinding::Degenerate => {
				return Err(malformed(format!("polygon ring {index} has zero area")));
			}
		}
	}
	match polygons.len() {
		0 => Err(malformed(String::from("polygon geometry without rings"))),
		1 => Ok(Either::Left(polygons.remove(0))),
		_ => Ok(Either::Right(MultiPolygonGeometry(polygons))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::vector_tile::decode_commands;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn c(x: i32, y: i32) -> Coordinates {
		Coordinates::new(x, y)
	}

	fn ring(coords: &[[i32; 2]]) -> Vec<DrawOp> {
		let mut ops = vec![DrawOp::MoveTo(Coordinates::from(coords[0]))];
		ops.extend(coords[1..].iter().map(|p| DrawOp::LineTo(Coordinates::from(p))));
		ops.push(DrawOp::ClosePath);
		ops
	}

	const SQUARE: [[i32; 2]; 4] = [[0, 0], [10, 0], [10, 10], [0, 10]];
	const HOLE: [[i32; 2]; 4] = [[2, 2], [2, 8], [8, 8], [8, 2]];
	const SECOND: [[i32; 2]; 4] = [[20, 0], [30, 0], [30, 10], [20, 10]];

	#[test]
	fn single_point_from_raw_commands() -> Result<(), DecodeError> {
		let ops = decode_commands(&[9, 0, 0])?;
		assert_eq!(assemble_points(&ops)?, Either::Left(PointGeometry::from([0, 0])));
		Ok(())
	}

	#[test]
	fn two_move_tos_make_a_multi_point() -> Result<(), DecodeError> {
		let ops = decode_commands(&[9, 0, 0, 9, 4, 6])?;
		assert_eq!(
			assemble_points(&ops)?,
			Either::Right(MultiPointGeometry::from(&[[0, 0], [2, 3]]))
		);
		Ok(())
	}

	#[rstest]
	#[case::empty(vec![])]
	#[case::trailing_line_to(vec![DrawOp::MoveTo(Coordinates::new(0, 0)), DrawOp::LineTo(Coordinates::new(1, 1))])]
	#[case::close_path(vec![DrawOp::MoveTo(Coordinates::new(0, 0)), DrawOp::ClosePath])]
	fn malformed_points(#[case] ops: Vec<DrawOp>) {
		assert!(matches!(assemble_points(&ops), Err(DecodeError::MalformedGeometryPart(_))));
	}

	#[test]
	fn lines_single_and_multi() -> Result<(), DecodeError> {
		let single = [DrawOp::MoveTo(c(0, 0)), DrawOp::LineTo(c(5, 0)), DrawOp::LineTo(c(5, 5))];
		assert_eq!(
			assemble_lines(&single)?,
			Either::Left(LineStringGeometry::from(&[[0, 0], [5, 0], [5, 5]]))
		);

		let multi = [
			DrawOp::MoveTo(c(0, 0)),
			DrawOp::LineTo(c(5, 0)),
			DrawOp::MoveTo(c(9, 9)),
			DrawOp::LineTo(c(1, 1)),
		];
		assert_eq!(
			assemble_lines(&multi)?,
			Either::Right(MultiLineStringGeometry::from(vec![
				LineStringGeometry::from(&[[0, 0], [5, 0]]),
				LineStringGeometry::from(&[[9, 9], [1, 1]]),
			]))
		);
		Ok(())
	}

	#[rstest]
	#[case::empty(vec![])]
	#[case::lone_move_to(vec![DrawOp::MoveTo(Coordinates::new(0, 0))])]
	#[case::second_part_without_line_to(vec![
		DrawOp::MoveTo(Coordinates::new(0, 0)),
		DrawOp::LineTo(Coordinates::new(1, 0)),
		DrawOp::MoveTo(Coordinates::new(3, 3)),
	])]
	#[case::closed(vec![
		DrawOp::MoveTo(Coordinates::new(0, 0)),
		DrawOp::LineTo(Coordinates::new(1, 0)),
		DrawOp::ClosePath,
	])]
	#[case::starts_with_line_to(vec![DrawOp::LineTo(Coordinates::new(1, 0))])]
	fn malformed_lines(#[case] ops: Vec<DrawOp>) {
		assert!(matches!(assemble_lines(&ops), Err(DecodeError::MalformedGeometryPart(_))));
	}

	#[test]
	fn square_from_raw_commands_is_an_exterior_ring() -> Result<(), DecodeError> {
		// MoveTo(0,0) LineTo(10,0) LineTo(10,10) LineTo(0,10) ClosePath
		let ops = decode_commands(&[9, 0, 0, 26, 20, 0, 0, 20, 19, 0, 15])?;
		let Either::Left(polygon) = assemble_polygons(&ops)? else {
			panic!("expected a single polygon");
		};
		assert_eq!(polygon.exterior, RingGeometry::from(&SQUARE));
		assert_eq!(polygon.exterior.winding(), RingWinding::Exterior);
		assert_eq!(polygon.exterior.closed_coordinates().last(), Some(&c(0, 0)));
		assert!(polygon.interiors.is_empty());
		Ok(())
	}

	#[test]
	fn two_exteriors_make_a_multi_polygon() -> Result<(), DecodeError> {
		let mut ops = ring(&SQUARE);
		ops.extend(ring(&SECOND));
		let Either::Right(multi) = assemble_polygons(&ops)? else {
			panic!("expected a multi polygon");
		};
		assert_eq!(multi.0.len(), 2);
		assert!(multi.0.iter().all(|p| p.interiors.is_empty()));
		Ok(())
	}

	#[test]
	fn exterior_followed_by_hole_is_a_single_polygon() -> Result<(), DecodeError> {
		let mut ops = ring(&SQUARE);
		ops.extend(ring(&HOLE));
		let Either::Left(polygon) = assemble_polygons(&ops)? else {
			panic!("expected a single polygon");
		};
		assert_eq!(polygon.interiors, vec![RingGeometry::from(&HOLE)]);
		Ok(())
	}

	#[test]
	fn holes_attach_to_the_preceding_exterior() -> Result<(), DecodeError> {
		let mut ops = ring(&SQUARE);
		ops.extend(ring(&HOLE));
		ops.extend(ring(&SECOND));
		let Either::Right(multi) = assemble_polygons(&ops)? else {
			panic!("expected a multi polygon");
		};
		assert_eq!(multi.0[0].interiors.len(), 1);
		assert_eq!(multi.0[1].interiors.len(), 0);
		Ok(())
	}

	#[test]
	fn explicit_closing_vertex_is_dropped() -> Result<(), DecodeError> {
		let ops = ring(&[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]);
		let Either::Left(polygon) = assemble_polygons(&ops)? else {
			panic!("expected a single polygon");
		};
		assert_eq!(polygon.exterior, RingGeometry::from(&SQUARE));
		Ok(())
	}

	#[rstest]
	#[case::hole_first(ring(&HOLE))]
	#[case::too_few_vertices(ring(&[[0, 0], [10, 0]]))]
	#[case::too_few_distinct(ring(&[[0, 0], [10, 0], [10, 0], [0, 0]]))]
	#[case::zero_area(ring(&[[0, 0], [5, 5], [10, 10]]))]
	#[case::not_closed(vec![
		DrawOp::MoveTo(Coordinates::new(0, 0)),
		DrawOp::LineTo(Coordinates::new(10, 0)),
		DrawOp::LineTo(Coordinates::new(10, 10)),
	])]
	#[case::line_to_after_close({
		let mut ops = ring(&SQUARE);
		ops.push(DrawOp::LineTo(Coordinates::new(3, 3)));
		ops
	})]
	#[case::empty(vec![])]
	fn malformed_polygons(#[case] ops: Vec<DrawOp>) {
		assert!(matches!(assemble_polygons(&ops), Err(DecodeError::MalformedGeometryPart(_))));
	}
}
