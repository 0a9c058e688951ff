//! Utility functions

/// Escape text for HTML body content and attribute values.
pub fn escape_html(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	for ch in raw.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(ch),
		}
	}
	out
}

/// Derive a DOM identifier from a submission input name.
///
/// Structural brackets are folded to underscores so nested and repeatable
/// field names remain valid identifiers; underscore runs are collapsed and
/// a trailing underscore is trimmed, which makes the mapping idempotent.
///
/// # Examples
/// - `"sec[opt][0]"` → `"sec_opt_0"`
/// - `"sec_opt_0"` → `"sec_opt_0"`
pub fn clean_field_id(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	for ch in raw.chars() {
		let ch = if ch == '[' || ch == ']' { '_' } else { ch };
		if ch == '_' && out.ends_with('_') {
			continue;
		}
		out.push(ch);
	}
	let trimmed = out.trim_end_matches('_').len();
	out.truncate(trimmed);
	out
}


// vim: ts=4
