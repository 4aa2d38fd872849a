use std::fmt::{Display, Formatter};

/// A fatal error while decoding one feature.
///
/// The error is `Clone` because a failed decode is memoized like a successful one: every
/// later access to the same feature hands out the same error again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
	/// Unknown command id, invalid command count or truncated parameters.
	MalformedCommand(String),
	/// A part has the wrong shape for its geometry type.
	MalformedGeometryPart(String),
	/// A tag references a key or value outside the layer dictionaries.
	OutOfRangeTagIndex(String),
}

impl DecodeError {
	/// Short name of the error kind.
	#[must_use]
	pub fn kind(&self) -> &'static str {
		match self {
			DecodeError::MalformedCommand(_) => "malformed command",
			DecodeError::MalformedGeometryPart(_) => "malformed geometry part",
			DecodeError::OutOfRangeTagIndex(_) => "tag index out of range",
		}
	}

	#[must_use]
	pub fn message(&self) -> &str {
		match self {
			DecodeError::MalformedCommand(msg)
			| DecodeError::MalformedGeometryPart(msg)
			| DecodeError::OutOfRangeTagIndex(msg) => msg,
		}
	}
}

impl Display for DecodeError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.kind(), self.message())
	}
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display() {
		let err = DecodeError::OutOfRangeTagIndex(String::from("value index 9 >= 2"));
		assert_eq!(err.to_string(), "tag index out of range: value index 9 >= 2");
		assert_eq!(format!("{err:?}"), "OutOfRangeTagIndex(\"value index 9 >= 2\")");
	}

	#[test]
	fn downcast_through_anyhow() {
		let err: anyhow::Error = anyhow::Error::from(DecodeError::MalformedCommand(String::from("x")))
			.context("Failed to decode layer");
		assert_eq!(
			err.downcast_ref::<DecodeError>(),
			Some(&DecodeError::MalformedCommand(String::from("x")))
		);
	}
}
