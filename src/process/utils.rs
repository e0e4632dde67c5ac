use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+").expect("leading int regex"));

static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("leading float regex")
});

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("digit run regex"));

/// Trim surrounding whitespace.
pub fn clean_str(raw: &str) -> String {
    raw.trim().to_string()
}

/// Base-10 integer from the leading digits of `raw`, or 0.
///
/// Trailing junk is ignored (`"12abc"` → 12, `"1.9"` → 1). Blank input, input without
/// a numeric prefix, and values outside `i32` all give 0.
pub fn parse_int_or_zero(raw: Option<&str>) -> i32 {
    raw.and_then(|s| LEADING_INT.find(s.trim()))
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .unwrap_or(0)
}

/// Float from the leading numeric text of `raw`, or 0.0 (`"68.5%"` → 68.5).
pub fn parse_float_or_zero(raw: Option<&str>) -> f64 {
    raw.and_then(|s| LEADING_FLOAT.find(s.trim()))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Season year from the first run of exactly four digits in `file_name`, or 0.
///
/// Longer digit runs are skipped as a whole, so `"export_20231101_2023.csv"` → 2023
/// from the trailing run, and `"2023-24.csv"` → 2023.
pub fn extract_season_from_filename(file_name: &str) -> i32 {
    DIGIT_RUN
        .find_iter(file_name)
        .find(|m| m.as_str().len() == 4)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
