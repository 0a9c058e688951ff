//! Sanitization of submitted section values
//!
//! Runs once per submitted section, between form decoding and
//! persistence. Field kind decides the baseline treatment; the optional
//! per-field callback refines single-valued kinds only.

use crate::descriptor::FieldKind;
use crate::prelude::*;
use crate::registry::FrozenSettingsRegistry;

impl FrozenSettingsRegistry {
	/// Sanitize one submitted section mapping.
	///
	/// - Multi-valued kinds (multicheck, multiselect) are filtered to drop
	///   empty entries contributed by the hidden sentinel input. This is
	///   forced and overrides any configured callback for these kinds.
	/// - Checkbox keys missing from the submission are filled with "off".
	/// - Other declared fields run their configured callback if any.
	/// - Keys not matching a declared field pass through untouched.
	pub fn sanitize(&self, section_id: &str, submitted: FieldValues) -> FieldValues {
		let Some(fields) = self.fields(section_id) else { return submitted };

		let mut clean = FieldValues::new();
		for (key, value) in submitted {
			let Some(field) = fields.iter().find(|f| f.name == key) else {
				clean.insert(key, value);
				continue;
			};

			let value = if field.kind.is_multi() {
				filter_sequence(value)
			} else if let Some(sanitize) = &field.sanitize {
				sanitize(&value)
			} else {
				value
			};
			clean.insert(key, value);
		}

		// A checkbox submits nothing when its sentinel is lost, so an
		// absent key means unchecked rather than unchanged.
		for field in fields {
			if field.kind == FieldKind::Checkbox && !clean.contains_key(&field.name) {
				debug!("Backfilling unchecked checkbox '{}.{}'", section_id, field.name);
				clean.insert(field.name.clone(), OptionValue::str("off"));
			}
		}

		clean
	}
}

/// Drop empty entries from a sequence value; normalize scalars into a
/// single-element (or empty) sequence so multi kinds always store one
/// shape.
fn filter_sequence(value: OptionValue) -> OptionValue {
	let entries = match value {
		OptionValue::Seq(entries) => entries,
		OptionValue::Str(s) if s.is_empty() => Vec::new(),
		OptionValue::Str(s) => vec![s],
		other @ OptionValue::Items(_) => return other,
	};
	OptionValue::Seq(entries.into_iter().filter(|entry| !entry.is_empty()).collect())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn filter_drops_empty_entries() {
		let value = OptionValue::Seq(vec!["".into(), "a".into(), "".into(), "b".into()]);
		assert_eq!(filter_sequence(value), OptionValue::Seq(vec!["a".into(), "b".into()]));
	}

	#[test]
	fn filter_normalizes_scalars() {
		assert_eq!(
			filter_sequence(OptionValue::str("solo")),
			OptionValue::Seq(vec!["solo".into()])
		);
		assert_eq!(filter_sequence(OptionValue::str("")), OptionValue::Seq(Vec::new()));
	}
}

// vim: ts=4
