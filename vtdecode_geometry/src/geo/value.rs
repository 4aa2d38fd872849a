use std::{
	cmp::Ordering,
	fmt::{Debug, Display},
	hash::Hash,
};

/// A typed attribute value from a layer's value dictionary.
///
/// Each variant corresponds to one member of the protobuf `Value` oneof. `Int` and `SInt`
/// are kept apart because they differ on the wire (plain vs. zigzag varint), even though
/// both hold an `i64`.
#[derive(Clone, PartialEq)]
pub enum GeoValue {
	Bool(bool),
	Double(f64),
	Float(f32),
	Int(i64),
	SInt(i64),
	String(String),
	UInt(u64),
}

impl Debug for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::String(v) => f.debug_tuple("String").field(v).finish(),
			Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
			Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
			Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
			Self::SInt(v) => f.debug_tuple("SInt").field(v).finish(),
			Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
			Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
		}
	}
}

impl From<&str> for GeoValue {
	fn from(value: &str) -> Self {
		GeoValue::String(value.to_string())
	}
}

impl From<String> for GeoValue {
	fn from(value: String) -> Self {
		GeoValue::String(value)
	}
}

impl From<i64> for GeoValue {
	fn from(value: i64) -> Self {
		GeoValue::Int(value)
	}
}

impl From<u64> for GeoValue {
	fn from(value: u64) -> Self {
		GeoValue::UInt(value)
	}
}

impl From<f32> for GeoValue {
	fn from(value: f32) -> Self {
		GeoValue::Float(value)
	}
}

impl From<f64> for GeoValue {
	fn from(value: f64) -> Self {
		GeoValue::Double(value)
	}
}

impl From<bool> for GeoValue {
	fn from(value: bool) -> Self {
		GeoValue::Bool(value)
	}
}

impl Eq for GeoValue {}

impl Hash for GeoValue {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		core::mem::discriminant(self).hash(state);
		match self {
			GeoValue::Bool(v) => v.hash(state),
			GeoValue::Double(v) => v.to_bits().hash(state),
			GeoValue::Float(v) => v.to_bits().hash(state),
			GeoValue::Int(v) | GeoValue::SInt(v) => v.hash(state),
			GeoValue::String(v) => v.hash(state),
			GeoValue::UInt(v) => v.hash(state),
		}
	}
}

impl PartialOrd for GeoValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for GeoValue {
	fn cmp(&self, other: &Self) -> Ordering {
		use GeoValue::{Bool, Double, Float, Int, SInt, String, UInt};
		match (self, other) {
			(String(a), String(b)) => a.cmp(b),
			(Float(a), Float(b)) => a.total_cmp(b),
			(Double(a), Double(b)) => a.total_cmp(b),
			(Int(a), Int(b)) | (SInt(a), SInt(b)) => a.cmp(b),
			(UInt(a), UInt(b)) => a.cmp(b),
			(Bool(a), Bool(b)) => a.cmp(b),
			_ => self.variant_order().cmp(&other.variant_order()),
		}
	}
}

impl Display for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			GeoValue::Bool(v) => write!(f, "{v}"),
			GeoValue::Double(v) => write!(f, "{v}"),
			GeoValue::Float(v) => write!(f, "{v}"),
			GeoValue::Int(v) | GeoValue::SInt(v) => write!(f, "{v}"),
			GeoValue::String(v) => write!(f, "{v}"),
			GeoValue::UInt(v) => write!(f, "{v}"),
		}
	}
}

impl GeoValue {
	fn variant_order(&self) -> u8 {
		match self {
			GeoValue::String(_) => 0,
			GeoValue::Float(_) => 1,
			GeoValue::Double(_) => 2,
			GeoValue::Int(_) => 3,
			GeoValue::SInt(_) => 4,
			GeoValue::UInt(_) => 5,
			GeoValue::Bool(_) => 6,
		}
	}

	/// Name of the protobuf `Value` member this variant is stored in.
	#[must_use]
	pub fn type_name(&self) -> &'static str {
		match self {
			GeoValue::String(_) => "string",
			GeoValue::Float(_) => "float",
			GeoValue::Double(_) => "double",
			GeoValue::Int(_) => "int64",
			GeoValue::SInt(_) => "sint64",
			GeoValue::UInt(_) => "uint64",
			GeoValue::Bool(_) => "bool",
		}
	}
}
