/// The declared geometry type of a feature (`GeomType` in the protobuf schema).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GeomType {
	#[default]
	Unknown = 0,
	Point = 1,
	LineString = 2,
	Polygon = 3,
}

impl GeomType {
	#[must_use]
	pub fn as_u64(self) -> u64 {
		self as u64
	}
}

/// Values outside the schema map to [`GeomType::Unknown`].
impl From<u64> for GeomType {
	fn from(value: u64) -> Self {
		match value {
			1 => GeomType::Point,
			2 => GeomType::LineString,
			3 => GeomType::Polygon,
			_ => GeomType::Unknown,
		}
	}
}
