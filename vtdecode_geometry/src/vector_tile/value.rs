use crate::geo::GeoValue;
use anyhow::{Context, Result, anyhow};
use log::trace;
use vtdecode_core::io::{ValueReader, WIRE_I32, WIRE_I64, WIRE_LEN, WIRE_VARINT};

/// Reading a [`GeoValue`] from a protobuf `Value` message.
pub trait GeoValuePBF<'a> {
	fn read(reader: &mut dyn ValueReader<'a>) -> Result<GeoValue>;
}

impl<'a> GeoValuePBF<'a> for GeoValue {
	/// Reads one `Value` message. If several members are present, the last one wins,
	/// as protobuf specifies for `oneof`.
	fn read(reader: &mut dyn ValueReader<'a>) -> Result<GeoValue> {
		use GeoValue::*;
		let mut value: Option<GeoValue> = None;

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, WIRE_LEN) => value = Some(String(reader.read_pbf_string().context("Failed to read string value")?)),
				(2, WIRE_I32) => value = Some(Float(reader.read_f32().context("Failed to read f32 value")?)),
				(3, WIRE_I64) => value = Some(Double(reader.read_f64().context("Failed to read f64 value")?)),
				(4, WIRE_VARINT) => {
					value = Some(Int(
						reader.read_varint().context("Failed to read varint for int value")? as i64,
					));
				}
				(5, WIRE_VARINT) => value = Some(UInt(reader.read_varint().context("Failed to read varint for uint value")?)),
				(6, WIRE_VARINT) => value = Some(SInt(reader.read_svarint().context("Failed to read svarint value")?)),
				(7, WIRE_VARINT) => value = Some(Bool(reader.read_varint().context("Failed to read varint for bool value")? != 0)),
				(field, wire_type) => {
					trace!("skipping unknown value field {field} (wire type {wire_type})");
					reader
						.skip_pbf_field(wire_type)
						.with_context(|| format!("Failed to skip value field {field}"))?;
				}
			}
		}

		value.ok_or_else(|| anyhow!("Value message has no known member"))
	}
}
