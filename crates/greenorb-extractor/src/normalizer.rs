//! Candidate-to-record normalization
//!
//! Oracle output is untrusted: every field may be absent, null, the wrong
//! type, or the `"Unknown"` sentinel. Each raw value is first classified as a
//! [`FieldValue`] and only `Stated` values reach the record. Numbers are never
//! invented: anything that does not parse becomes null.

use crate::error::ValidationFailure;
use crate::types::CandidateRecord;
use greenorb_domain::record::NOT_AVAILABLE;
use greenorb_domain::{FieldValue, NormalizedRecord, Provenance, UNKNOWN_SENTINEL};
use serde_json::Value;
use tracing::debug;

/// Names with this many characters or fewer are rejected
pub const MIN_NAME_CHARS: usize = 2;

/// Candidate keys for one provenance
struct KeyMap {
    name: &'static str,
    sector: Option<&'static str>,
    country: Option<&'static str>,
    products: &'static str,
    co2: Option<&'static str>,
    esg: Option<&'static str>,
    year: Option<&'static str>,
}

const BULK_KEYS: KeyMap = KeyMap {
    name: "name",
    sector: Some("sector"),
    country: Some("country"),
    products: "products",
    co2: None,
    esg: None,
    year: None,
};

const REPORT_KEYS: KeyMap = KeyMap {
    name: "company_name",
    sector: None,
    country: None,
    products: "products",
    co2: Some("co2_estimate"),
    esg: Some("esg_grade"),
    year: Some("report_year"),
};

const RANKING_KEYS: KeyMap = KeyMap {
    name: "name",
    sector: None,
    country: None,
    products: "products",
    co2: Some("co2_estimate"),
    esg: Some("esg_grade"),
    year: None,
};

/// Turn a candidate into a record ready for persistence
///
/// # Errors
///
/// [`ValidationFailure::MissingName`] when the name is absent, a placeholder,
/// or [`MIN_NAME_CHARS`] characters or shorter.
///
/// # Examples
///
/// ```
/// use greenorb_extractor::{normalize, CandidateRecord};
/// use greenorb_domain::Provenance;
/// use serde_json::json;
///
/// let candidate = CandidateRecord::from_value(json!({
///     "company_name": "Acme Corp",
///     "report_year": "FY2023",
///     "co2_estimate": "12,345 tons",
///     "esg_grade": "Unknown"
/// })).unwrap();
/// let provenance = Provenance::Report { filename: "acme.pdf".into() };
///
/// let record = normalize(&candidate, &provenance).unwrap();
/// assert_eq!(record.co2, Some(12345.0));
/// assert_eq!(record.report_year, Some(2023));
/// assert_eq!(record.esg, "Unknown");
/// ```
pub fn normalize(
    candidate: &CandidateRecord,
    provenance: &Provenance,
) -> Result<NormalizedRecord, ValidationFailure> {
    let keys = match provenance {
        Provenance::BulkIngest { .. } => &BULK_KEYS,
        Provenance::Report { .. } => &REPORT_KEYS,
        Provenance::Ranking { .. } => &RANKING_KEYS,
    };

    let (name, sector, country) = match provenance {
        Provenance::Ranking { entity } => (
            validate_name(FieldValue::Stated(entity.name.trim().to_string()))?,
            non_empty_or_unknown(&entity.sector),
            non_empty_or_unknown(&entity.country),
        ),
        _ => (
            validate_name(text_field(candidate.get(keys.name)))?,
            optional_text(candidate, keys.sector),
            optional_text(candidate, keys.country),
        ),
    };

    let products = text_field(candidate.get(keys.products))
        .stated()
        .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string());

    let co2 = keys
        .co2
        .and_then(|key| decimal_field(candidate.get(key)).stated());

    let esg = keys
        .esg
        .and_then(|key| text_field(candidate.get(key)).stated())
        .unwrap_or_else(|| provenance.default_grade().to_string());

    let report_year = keys
        .year
        .and_then(|key| integer_field(candidate.get(key)).stated());

    for extra in ["sustainability_summary", "net_zero_target"] {
        if let Some(value) = text_field(candidate.get(extra)).stated() {
            debug!(company = %name, field = extra, value = %value, "Ignoring informational field");
        }
    }

    Ok(NormalizedRecord {
        name,
        sector,
        country,
        products,
        co2,
        esg,
        url: provenance.source_url(),
        methodology: provenance.methodology(),
        scope1: 0.0,
        scope2: 0.0,
        scope3: 0.0,
        report_year,
    })
}

fn validate_name(value: FieldValue<String>) -> Result<String, ValidationFailure> {
    match value {
        FieldValue::Stated(name)
            if name.chars().count() > MIN_NAME_CHARS && name != NOT_AVAILABLE =>
        {
            Ok(name)
        }
        FieldValue::Stated(name) => Err(ValidationFailure::MissingName { found: Some(name) }),
        FieldValue::Unknown => Err(ValidationFailure::MissingName {
            found: Some(UNKNOWN_SENTINEL.to_string()),
        }),
        FieldValue::Absent => Err(ValidationFailure::MissingName { found: None }),
    }
}

fn optional_text(candidate: &CandidateRecord, key: Option<&str>) -> String {
    key.and_then(|key| text_field(candidate.get(key)).stated())
        .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string())
}

fn non_empty_or_unknown(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        UNKNOWN_SENTINEL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Classify a textual field
///
/// Strings are trimmed (empty becomes absent), string arrays are joined
/// with `", "` and other scalars are stringified.
pub fn text_field(value: Option<&Value>) -> FieldValue<String> {
    match value {
        None | Some(Value::Null) => FieldValue::Absent,
        Some(Value::String(s)) => FieldValue::from_text(Some(s.trim())).map(str::to_string),
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| text_field(Some(item)).stated())
                .collect();
            if parts.is_empty() {
                FieldValue::Absent
            } else {
                FieldValue::Stated(parts.join(", "))
            }
        }
        Some(Value::Number(n)) => FieldValue::Stated(n.to_string()),
        Some(Value::Bool(b)) => FieldValue::Stated(b.to_string()),
        Some(Value::Object(_)) => FieldValue::Absent,
    }
}

/// Classify a decimal field
///
/// JSON numbers are taken as-is. Strings keep only ASCII digits and `.`
/// before parsing, so `"12,345 tons"` becomes `12345.0`.
pub fn decimal_field(value: Option<&Value>) -> FieldValue<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64().map_or(FieldValue::Absent, FieldValue::Stated),
        Some(Value::String(s)) => FieldValue::from_text(Some(s.trim())).and_then(|text| {
            let digits: String = text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse::<f64>().ok().filter(|v| v.is_finite())
        }),
        _ => FieldValue::Absent,
    }
}

/// Classify an integer field
///
/// Same discipline as [`decimal_field`] but only ASCII digits are kept.
pub fn integer_field(value: Option<&Value>) -> FieldValue<i32> {
    match value {
        Some(Value::Number(n)) => {
            let whole = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64));
            whole
                .and_then(|v| i32::try_from(v).ok())
                .map_or(FieldValue::Absent, FieldValue::Stated)
        }
        Some(Value::String(s)) => FieldValue::from_text(Some(s.trim())).and_then(|text| {
            let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse::<i32>().ok()
        }),
        _ => FieldValue::Absent,
    }
}
