use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Price per thousand impressions - uses Decimal for precision
pub type Cpm = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Advertising slot identifier
pub type SlotId = String;

/// A dimension value as written in configuration: `"uk"` or `["uk", "ie"]`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DimensionValue {
    One(String),
    Many(Vec<String>),
}

impl From<DimensionValue> for Vec<String> {
    fn from(value: DimensionValue) -> Self {
        match value {
            DimensionValue::One(v) => vec![v],
            DimensionValue::Many(vs) => vs,
        }
    }
}

/// Dimensions describing the current request (geo, device, section, ...)
///
/// A dimension may carry several values (e.g. keywords).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, DimensionValue>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct DimensionContext {
    values: BTreeMap<String, Vec<String>>,
}

impl From<BTreeMap<String, DimensionValue>> for DimensionContext {
    fn from(raw: BTreeMap<String, DimensionValue>) -> Self {
        Self {
            values: raw.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl From<DimensionContext> for BTreeMap<String, Vec<String>> {
    fn from(ctx: DimensionContext) -> Self {
        ctx.values
    }
}

impl DimensionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value for a dimension (builder style)
    pub fn with(mut self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(dimension, value);
        self
    }

    pub fn insert(&mut self, dimension: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(dimension.into())
            .or_default()
            .push(value.into());
    }

    /// Values for a dimension (empty if unset)
    pub fn values(&self, dimension: &str) -> &[String] {
        self.values
            .get(dimension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Allowed values per dimension, e.g. `{"geo": ["uk", "ie"]}`
///
/// Evaluation is left to a targeting evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionPredicate(pub BTreeMap<String, Vec<String>>);

impl DimensionPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the given values for a dimension (builder style)
    pub fn with<I, S>(mut self, dimension: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(dimension.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn dimensions(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_accepts_single_and_multi_values() {
        let ctx: DimensionContext =
            serde_json::from_str(r#"{"geo": "uk", "keywords": ["sport", "news"]}"#).unwrap();
        assert_eq!(ctx.values("geo"), ["uk".to_string()]);
        assert_eq!(ctx.values("keywords").len(), 2);
        assert!(ctx.values("device").is_empty());
    }

    #[test]
    fn test_predicate_builder() {
        let predicate = DimensionPredicate::new().with("geo", ["uk", "ie"]);
        let (dim, values) = predicate.dimensions().next().unwrap();
        assert_eq!(dim, "geo");
        assert_eq!(values, &vec!["uk".to_string(), "ie".to_string()]);
    }
}
