//! Tagged optional for oracle-supplied fields
//!
//! The oracle is told to answer `"Unknown"` (or null) instead of guessing.
//! [`FieldValue`] keeps that sentinel distinct from a missing key, so a
//! downstream zero or empty string is never confused with "not stated".

/// The reserved literal the oracle uses for deliberately absent data
///
/// Matching is case-sensitive.
pub const UNKNOWN_SENTINEL: &str = "Unknown";

/// A field as reported by the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<T> {
    /// The source stated a value
    Stated(T),
    /// The oracle explicitly answered with the `"Unknown"` sentinel
    Unknown,
    /// The key was missing or null
    Absent,
}

impl<T> FieldValue<T> {
    /// Return the stated value, if any
    pub fn stated(self) -> Option<T> {
        match self {
            FieldValue::Stated(value) => Some(value),
            FieldValue::Unknown | FieldValue::Absent => None,
        }
    }

    /// True if the value was explicitly stated
    pub fn is_stated(&self) -> bool {
        matches!(self, FieldValue::Stated(_))
    }

    /// Map the stated value, keeping the sentinel states untouched
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FieldValue<U> {
        match self {
            FieldValue::Stated(value) => FieldValue::Stated(f(value)),
            FieldValue::Unknown => FieldValue::Unknown,
            FieldValue::Absent => FieldValue::Absent,
        }
    }

    /// Chain a fallible conversion of the stated value
    ///
    /// A conversion that yields `None` collapses to [`FieldValue::Absent`].
    pub fn and_then<U, F: FnOnce(T) -> Option<U>>(self, f: F) -> FieldValue<U> {
        match self {
            FieldValue::Stated(value) => match f(value) {
                Some(converted) => FieldValue::Stated(converted),
                None => FieldValue::Absent,
            },
            FieldValue::Unknown => FieldValue::Unknown,
            FieldValue::Absent => FieldValue::Absent,
        }
    }
}

impl<'a> FieldValue<&'a str> {
    /// Classify a raw string: the sentinel becomes [`FieldValue::Unknown`],
    /// blank text becomes [`FieldValue::Absent`]
    ///
    /// # Examples
    ///
    /// ```
    /// use greenorb_domain::FieldValue;
    ///
    /// assert_eq!(FieldValue::from_text(Some("Unknown")), FieldValue::Unknown);
    /// assert_eq!(FieldValue::from_text(Some("unknown")), FieldValue::Stated("unknown"));
    /// assert_eq!(FieldValue::from_text(Some("  ")), FieldValue::Absent);
    /// assert_eq!(FieldValue::from_text(None), FieldValue::Absent);
    /// ```
    pub fn from_text(raw: Option<&'a str>) -> Self {
        match raw {
            Some(text) if text == UNKNOWN_SENTINEL => FieldValue::Unknown,
            Some(text) if text.trim().is_empty() => FieldValue::Absent,
            Some(text) => FieldValue::Stated(text),
            None => FieldValue::Absent,
        }
    }
}
