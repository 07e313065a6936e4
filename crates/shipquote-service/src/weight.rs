//! Print-job weight engine
//!
//! Pure arithmetic over the configured weight tables, no I/O. The strict
//! entry point rejects option keys absent from the tables; the lenient one
//! substitutes defaults so a partially-filled input still yields a number.

use serde::{Deserialize, Serialize};
use shipquote_config::WeightSettings;
use thiserror::Error;

/// Fallbacks used by the lenient variant for keys absent from the tables
const DEFAULT_BASE_WEIGHT: f64 = 5.0;
const DEFAULT_GSM_MULTIPLIER: f64 = 1.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WeightError {
	#[error("unknown {field} option: '{value}'")]
	UnknownOption { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintSide {
	Single,
	Double,
}

/// A print-job description as the order form captures it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightInput {
	pub page_count: i32,
	pub print_side: PrintSide,
	pub page_size: String,
	pub gsm: String,
	pub binding_type: String,
	pub packaging_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightResult {
	pub physical_sheets: u32,
	pub paper_weight_grams: f64,
	pub binding_weight_grams: f64,
	pub packaging_weight_grams: f64,
	pub total_weight_grams: f64,
}

/// Sheets of paper consumed by a page count; double-sided printing halves
/// it, rounded up. Non-positive page counts produce zero sheets.
pub fn physical_sheets(page_count: i32, print_side: PrintSide) -> u32 {
	if page_count <= 0 {
		return 0;
	}
	let pages = page_count as u32;
	match print_side {
		PrintSide::Single => pages,
		PrintSide::Double => pages.div_ceil(2),
	}
}

/// Strict weight calculation: every option key must exist in the tables
pub fn calculate_weight(
	input: &WeightInput,
	settings: &WeightSettings,
) -> Result<WeightResult, WeightError> {
	let base = *settings
		.base_weights
		.get(&input.page_size)
		.ok_or_else(|| unknown("pageSize", &input.page_size))?;
	let multiplier = *settings
		.gsm_multipliers
		.get(&input.gsm)
		.ok_or_else(|| unknown("gsm", &input.gsm))?;
	let binding = *settings
		.binding_weights
		.get(&input.binding_type)
		.ok_or_else(|| unknown("bindingType", &input.binding_type))?;
	let packaging = *settings
		.packaging_weights
		.get(&input.packaging_type)
		.ok_or_else(|| unknown("packagingType", &input.packaging_type))?;

	Ok(compose(input, base, multiplier, binding, packaging))
}

/// Lenient weight calculation for live previews: unknown keys fall back to
/// defaults instead of failing, so mid-edit inputs still produce a total
pub fn calculate_weight_lenient(input: &WeightInput, settings: &WeightSettings) -> WeightResult {
	let base = settings
		.base_weights
		.get(&input.page_size)
		.copied()
		.unwrap_or(DEFAULT_BASE_WEIGHT);
	let multiplier = settings
		.gsm_multipliers
		.get(&input.gsm)
		.copied()
		.unwrap_or(DEFAULT_GSM_MULTIPLIER);
	let binding = settings
		.binding_weights
		.get(&input.binding_type)
		.copied()
		.unwrap_or(0.0);
	let packaging = settings
		.packaging_weights
		.get(&input.packaging_type)
		.copied()
		.unwrap_or(0.0);

	compose(input, base, multiplier, binding, packaging)
}

fn compose(
	input: &WeightInput,
	base: f64,
	multiplier: f64,
	binding: f64,
	packaging: f64,
) -> WeightResult {
	let sheets = physical_sheets(input.page_count, input.print_side);
	let paper = sheets as f64 * base * multiplier;
	WeightResult {
		physical_sheets: sheets,
		paper_weight_grams: paper,
		binding_weight_grams: binding,
		packaging_weight_grams: packaging,
		total_weight_grams: paper + binding + packaging,
	}
}

fn unknown(field: &'static str, value: &str) -> WeightError {
	WeightError::UnknownOption {
		field,
		value: value.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use shipquote_config::Settings;

	fn settings() -> WeightSettings {
		Settings::default().weight
	}

	fn input(
		page_count: i32,
		print_side: PrintSide,
		page_size: &str,
		gsm: &str,
		binding: &str,
		packaging: &str,
	) -> WeightInput {
		WeightInput {
			page_count,
			print_side,
			page_size: page_size.to_string(),
			gsm: gsm.to_string(),
			binding_type: binding.to_string(),
			packaging_type: packaging.to_string(),
		}
	}

	#[test]
	fn sheet_counts() {
		assert_eq!(physical_sheets(10, PrintSide::Single), 10);
		assert_eq!(physical_sheets(10, PrintSide::Double), 5);
		assert_eq!(physical_sheets(11, PrintSide::Double), 6);
		assert_eq!(physical_sheets(1, PrintSide::Double), 1);
		assert_eq!(physical_sheets(0, PrintSide::Single), 0);
		assert_eq!(physical_sheets(-3, PrintSide::Double), 0);
	}

	#[test]
	fn single_sided_a4_pamphlet() {
		let result =
			calculate_weight(&input(10, PrintSide::Single, "A4", "80", "none", "standard"), &settings())
				.unwrap();
		assert_eq!(result.physical_sheets, 10);
		assert_eq!(result.paper_weight_grams, 50.0);
		assert_eq!(result.total_weight_grams, 200.0);
	}

	#[test]
	fn double_sided_halves_the_paper() {
		let result =
			calculate_weight(&input(10, PrintSide::Double, "A4", "80", "none", "standard"), &settings())
				.unwrap();
		assert_eq!(result.physical_sheets, 5);
		assert_eq!(result.paper_weight_grams, 25.0);
		assert_eq!(result.total_weight_grams, 175.0);
	}

	#[test]
	fn odd_page_count_rounds_sheets_up() {
		let result = calculate_weight(
			&input(11, PrintSide::Double, "A4", "80", "spiral", "standard"),
			&settings(),
		)
		.unwrap();
		assert_eq!(result.physical_sheets, 6);
		assert_eq!(result.paper_weight_grams, 30.0);
		assert_eq!(result.binding_weight_grams, 120.0);
		assert_eq!(result.total_weight_grams, 300.0);
	}

	#[test]
	fn heavy_stock_hardbound_volume() {
		let result = calculate_weight(
			&input(20, PrintSide::Single, "A3", "130", "hardbound", "reinforced"),
			&settings(),
		)
		.unwrap();
		assert_eq!(result.physical_sheets, 20);
		assert_eq!(result.paper_weight_grams, 256.0);
		assert_eq!(result.binding_weight_grams, 350.0);
		assert_eq!(result.packaging_weight_grams, 300.0);
		assert_eq!(result.total_weight_grams, 906.0);
	}

	#[test]
	fn strict_rejects_unknown_page_size() {
		let err =
			calculate_weight(&input(10, PrintSide::Single, "A7", "80", "none", "standard"), &settings())
				.unwrap_err();
		assert_eq!(
			err,
			WeightError::UnknownOption {
				field: "pageSize",
				value: "A7".to_string()
			}
		);
	}

	#[test]
	fn strict_rejects_unknown_gsm() {
		let err =
			calculate_weight(&input(10, PrintSide::Single, "A4", "95", "none", "standard"), &settings())
				.unwrap_err();
		assert!(matches!(err, WeightError::UnknownOption { field: "gsm", .. }));
	}

	#[test]
	fn lenient_substitutes_defaults() {
		let result = calculate_weight_lenient(
			&input(10, PrintSide::Single, "A7", "??", "mystery", "mystery"),
			&settings(),
		);
		assert_eq!(result.paper_weight_grams, 50.0);
		assert_eq!(result.total_weight_grams, 50.0);
	}

	#[test]
	fn lenient_matches_strict_on_valid_input() {
		let job = input(20, PrintSide::Single, "A3", "130", "hardbound", "reinforced");
		let strict = calculate_weight(&job, &settings()).unwrap();
		let lenient = calculate_weight_lenient(&job, &settings());
		assert_eq!(strict, lenient);
	}
}
