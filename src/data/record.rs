//! Record Module
//! Typed dataset rows as produced by the loader.

use std::collections::HashMap;

/// A single cell of a loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Missing,
}

/// One row of a dataset: named fields to values. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, name: &str, value: FieldValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn with_number(self, name: &str, value: f64) -> Self {
        self.with(name, FieldValue::Number(value))
    }

    pub fn with_text(self, name: &str, value: &str) -> Self {
        self.with(name, FieldValue::Text(value.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Numeric value of a field, only when present and finite.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.fields.get(name) {
            Some(FieldValue::Number(v)) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Non-empty text value of a field.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

/// One part of a grouping key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyPart {
    Int(i64),
    Text(String),
}

impl KeyPart {
    /// Extract a key part from a record field.
    ///
    /// Numbers must be finite and whole; text must be non-empty.
    pub fn from_field(record: &Record, name: &str) -> Option<Self> {
        match record.get(name)? {
            FieldValue::Number(v) if v.is_finite() && v.fract() == 0.0 => {
                Some(KeyPart::Int(*v as i64))
            }
            FieldValue::Text(s) if !s.is_empty() => Some(KeyPart::Text(s.clone())),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            KeyPart::Int(v) => Some(*v),
            KeyPart::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            KeyPart::Text(s) => Some(s.as_str()),
            KeyPart::Int(_) => None,
        }
    }
}

/// Composite key of one or two parts used to bucket records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(pub Vec<KeyPart>);

impl GroupKey {
    pub fn part(&self, index: usize) -> Option<&KeyPart> {
        self.0.get(index)
    }

    pub fn int(&self, index: usize) -> Option<i64> {
        self.part(index).and_then(KeyPart::as_int)
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.part(index).and_then(KeyPart::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_rejects_non_finite() {
        let record = Record::new()
            .with_number("a", 1.5)
            .with_number("b", f64::NAN)
            .with_number("c", f64::INFINITY)
            .with_text("d", "12");

        assert_eq!(record.number("a"), Some(1.5));
        assert_eq!(record.number("b"), None);
        assert_eq!(record.number("c"), None);
        assert_eq!(record.number("d"), None);
        assert_eq!(record.number("missing"), None);
    }

    #[test]
    fn test_key_part_requires_whole_numbers_and_text() {
        let record = Record::new()
            .with_number("decade", 1990.0)
            .with_number("fraction", 1990.5)
            .with_text("region", "South Asia")
            .with_text("empty", "")
            .with("gone", FieldValue::Missing);

        assert_eq!(KeyPart::from_field(&record, "decade"), Some(KeyPart::Int(1990)));
        assert_eq!(
            KeyPart::from_field(&record, "region"),
            Some(KeyPart::Text("South Asia".into()))
        );
        assert_eq!(KeyPart::from_field(&record, "fraction"), None);
        assert_eq!(KeyPart::from_field(&record, "empty"), None);
        assert_eq!(KeyPart::from_field(&record, "gone"), None);
    }
}
