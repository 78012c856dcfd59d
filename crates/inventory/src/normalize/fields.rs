//! Field-level coercions shared by the per-source mappings.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::NormalizationError;
use crate::item::SourceKind;

/// A coerced quantity and, when coercion kicked in, the raw text it replaced.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Quantity {
    pub value: f64,
    pub coerced_from: Option<String>,
}

impl Quantity {
    fn parsed(value: f64) -> Self {
        Self {
            value: if value == 0.0 { 0.0 } else { value },
            coerced_from: None,
        }
    }

    fn coerced(raw: impl Into<String>) -> Self {
        Self {
            value: 0.0,
            coerced_from: Some(raw.into()),
        }
    }
}

/// `1,250` or `12,345,678.5`: commas only between groups of three digits.
/// A decimal comma such as `3,5` is not a thousands separator.
fn without_thousands_separators(raw: &str) -> Option<String> {
    if !raw.contains(',') {
        return Some(raw.to_string());
    }
    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (raw, None),
    };
    let mut groups = whole.split(',');
    let lead = groups.next().unwrap_or_default();
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let grouped = (1..=3).contains(&lead.len())
        && digits(lead)
        && groups.all(|g| g.len() == 3 && digits(g))
        && fraction.is_none_or(|f| !f.is_empty() && digits(f));
    grouped.then(|| raw.replace(',', ""))
}

pub(crate) fn quantity_from_text(raw: Option<&str>) -> Quantity {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Quantity::coerced("");
    }
    match without_thousands_separators(raw).map(|text| text.parse::<f64>()) {
        Some(Ok(value)) if value.is_finite() && value >= 0.0 => Quantity::parsed(value),
        _ => Quantity::coerced(raw),
    }
}

pub(crate) fn quantity_from_json(raw: Option<&Value>) -> Quantity {
    match raw {
        None | Some(Value::Null) => Quantity::coerced(""),
        Some(Value::String(s)) => quantity_from_text(Some(s.as_str())),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(value) if value.is_finite() && value >= 0.0 => Quantity::parsed(value),
            _ => Quantity::coerced(n.to_string()),
        },
        Some(other) => Quantity::coerced(other.to_string()),
    }
}

/// Split a `"LICENSE - Name"` vendor string into `(license, name)`.
pub(crate) fn split_vendor(raw: &str) -> (String, String) {
    match raw.split_once(" - ") {
        Some((license, name)) => (license.trim().to_string(), name.trim().to_string()),
        None => (String::new(), raw.trim().to_string()),
    }
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (date part only) or `MM/DD/YYYY`.
pub(crate) fn accepted_date(raw: &str) -> Option<NaiveDate> {
    let date = raw
        .trim()
        .split(['T', ' '])
        .next()
        .unwrap_or_default();
    if date.is_empty() {
        return None;
    }
    ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"]
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
}

/// Potency text as printed on a slip; bare numbers get a `%` suffix.
pub(crate) fn percent(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw.ends_with('%') {
        raw.to_string()
    } else {
        format!("{raw}%")
    }
}

pub(crate) fn required_product_name(
    kind: SourceKind,
    index: usize,
    field: &str,
    raw: Option<&str>,
) -> Result<String, NormalizationError> {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        Some(_) => Err(NormalizationError::record(kind, index, field, "is empty")),
        None => Err(NormalizationError::record(kind, index, field, "is missing")),
    }
}
