//! Merchant info models.
//!
//! The merchant endpoints return JSON objects whose field set varies between
//! accounts and API revisions. Both models keep the whole object and offer
//! typed lookups on top.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full merchant profile, from `GET /getmerchantinfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantInfo {
    fields: Map<String, Value>,
}

impl MerchantInfo {
    /// Returns the raw value of `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `field` as a string, if it is one.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Returns every field of the profile.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the profile and returns its fields.
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for MerchantInfo {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Merchant summary returned by the key and token validation endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortMerchantInfo {
    fields: Map<String, Value>,
}

impl ShortMerchantInfo {
    /// Returns the raw value of `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `field` as a string, if it is one.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Returns every field of the summary.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for ShortMerchantInfo {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
