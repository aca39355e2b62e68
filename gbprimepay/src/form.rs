//! Ordered form field bags.
//!
//! [`FormFields`] is an insertion-ordered list of unique `(name, value)`
//! pairs. Inserting an existing name replaces its value in place, which gives
//! "last occurrence wins" semantics while keeping the position of the first
//! occurrence. It is used for outgoing form bodies and for the hidden-input
//! token sets carried between the TrueMoney OTP steps.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An insertion-ordered set of form fields with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

/// Hidden-input fields scraped from a TrueMoney OTP page.
///
/// Opaque to the client: whatever the provider rendered is sent back
/// unchanged on submission.
pub type FormTokens = FormFields;

impl FormFields {
    /// Creates an empty field set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets `name` to `value`, replacing any previous value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    /// Sets `name` only when `value` is present.
    pub fn insert_opt(&mut self, name: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    /// Returns the value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if a field called `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Copies every field of `other` into `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Self) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    /// Encodes the fields as `application/x-www-form-urlencoded`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Returns the underlying pairs, suitable for `reqwest`'s `form`.
    #[must_use]
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields = Self::new();
        fields.extend(iter);
        fields
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FormFields {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl IntoIterator for FormFields {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for FormFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = FormFields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of form field names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = FormFields::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    fields.insert(name, value);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut fields = FormFields::new();
        fields.insert("a", "1");
        fields.insert("b", "2");
        fields.insert("a", "3");
        let pairs: Vec<_> = fields.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_insert_opt_skips_none() {
        let mut fields = FormFields::new();
        fields.insert_opt("present", Some("x"));
        fields.insert_opt("absent", None);
        assert!(fields.contains("present"));
        assert!(!fields.contains("absent"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_merge_other_wins() {
        let mut base: FormFields = [("otp_code", "111111"), ("keep", "k")].into_iter().collect();
        let tokens: FormFields = [("otp_code", "from-page"), ("csrf", "c")].into_iter().collect();
        base.merge(&tokens);
        assert_eq!(base.get("otp_code"), Some("from-page"));
        assert_eq!(base.get("keep"), Some("k"));
        assert_eq!(base.get("csrf"), Some("c"));
    }

    #[test]
    fn test_query_string_encoding() {
        let fields: FormFields = [("a", "1"), ("b", "x y"), ("c", "&=")].into_iter().collect();
        assert_eq!(fields.to_query_string(), "a=1&b=x+y&c=%26%3D");
    }

    #[test]
    fn test_serde_preserves_order() {
        let fields: FormFields = serde_json::from_str(r#"{"z": "1", "a": "2"}"#).unwrap();
        let names: Vec<_> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["z", "a"]);
        assert_eq!(serde_json::to_string(&fields).unwrap(), r#"{"z":"1","a":"2"}"#);
    }
}
