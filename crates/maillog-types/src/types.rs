//! Common types used throughout maillog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::SystemTime;

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub i64);

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Timestamp {
	pub fn now() -> Self {
		let secs = SystemTime::now()
			.duration_since(SystemTime::UNIX_EPOCH)
			.map(|d| d.as_secs() as i64)
			.unwrap_or(0);
		Timestamp(secs)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

// LogId //
//*******//
pub type LogId = i64;

// OptionValue //
//*************//

/// Per-section stored mapping: field name -> value.
///
/// Repeatable-group instances reuse the same shape for their nested fields.
pub type FieldValues = BTreeMap<String, OptionValue>;

/// A stored settings value.
///
/// Form submissions are string-based, so scalars are kept as strings
/// ("on"/"off" for checkboxes, digits for number inputs). Multi-choice
/// fields hold ordered sequences, repeatable groups an ordered list of
/// instance mappings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
	Str(String),
	Seq(Vec<String>),
	Items(Vec<FieldValues>),
}

impl Default for OptionValue {
	fn default() -> Self {
		OptionValue::Str(String::new())
	}
}

impl OptionValue {
	pub fn str(value: impl Into<String>) -> Self {
		OptionValue::Str(value.into())
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			OptionValue::Str(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_seq(&self) -> Option<&[String]> {
		match self {
			OptionValue::Seq(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_items(&self) -> Option<&[FieldValues]> {
		match self {
			OptionValue::Items(items) => Some(items),
			_ => None,
		}
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			OptionValue::Str(_) => "string",
			OptionValue::Seq(_) => "sequence",
			OptionValue::Items(_) => "items",
		}
	}

	/// Convert a JSON value into an `OptionValue`.
	///
	/// Submitted form data arrives as one nested JSON value per section.
	/// Repeatable groups are accepted both as arrays and as objects keyed
	/// by numeric string index (the shape a form with indexed input names
	/// produces); index-keyed objects are ordered by index.
	pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
		match value {
			serde_json::Value::Null => Ok(OptionValue::Str(String::new())),
			serde_json::Value::String(s) => Ok(OptionValue::Str(s.clone())),
			serde_json::Value::Bool(b) => {
				Ok(OptionValue::Str(if *b { "on" } else { "off" }.into()))
			}
			serde_json::Value::Number(n) => Ok(OptionValue::Str(n.to_string())),
			serde_json::Value::Array(values) => {
				if values.iter().all(serde_json::Value::is_object) && !values.is_empty() {
					let mut items = Vec::with_capacity(values.len());
					for value in values {
						items.push(Self::instance_from_json(value)?);
					}
					Ok(OptionValue::Items(items))
				} else {
					let mut seq = Vec::with_capacity(values.len());
					for value in values {
						match Self::from_json(value)? {
							OptionValue::Str(s) => seq.push(s),
							other => {
								return Err(format!(
									"sequence element must be scalar, got {}",
									other.type_name()
								));
							}
						}
					}
					Ok(OptionValue::Seq(seq))
				}
			}
			serde_json::Value::Object(map) => {
				let mut indexed = Vec::with_capacity(map.len());
				for (key, value) in map {
					let index: usize = key
						.parse()
						.map_err(|_| format!("non-numeric group index '{}'", key))?;
					indexed.push((index, Self::instance_from_json(value)?));
				}
				indexed.sort_by_key(|(index, _)| *index);
				Ok(OptionValue::Items(indexed.into_iter().map(|(_, v)| v).collect()))
			}
		}
	}

	fn instance_from_json(value: &serde_json::Value) -> Result<FieldValues, String> {
		let serde_json::Value::Object(map) = value else {
			return Err(format!("group instance must be an object, got {}", value));
		};
		let mut values = FieldValues::new();
		for (key, value) in map {
			values.insert(key.clone(), Self::from_json(value)?);
		}
		Ok(values)
	}
}

impl<'de> Deserialize<'de> for OptionValue {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = serde_json::Value::deserialize(deserializer)?;
		OptionValue::from_json(&value).map_err(serde::de::Error::custom)
	}
}


// vim: ts=4
