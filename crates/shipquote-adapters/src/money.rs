//! Currency helpers shared by the live adapters

/// Convert a carrier's rupee amount to paise, rejecting non-positive or
/// unparseable values
pub(crate) fn rupees_to_paise(amount: f64) -> Option<u64> {
	if !amount.is_finite() || amount <= 0.0 {
		return None;
	}
	Some((amount * 100.0).round() as u64)
}

/// Carriers are inconsistent about numeric fields: some return numbers,
/// some return numeric strings. Accept both.
pub(crate) fn json_number(value: &serde_json::Value) -> Option<f64> {
	match value {
		serde_json::Value::Number(n) => n.as_f64(),
		serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
		_ => None,
	}
}
