//! Record module - the structured result of a document

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The JSON object produced by the structuring step
///
/// Conventionally keyed by customer or party name, each party holding
/// parallel arrays (serial numbers, products, quantities, taxes, amounts)
/// plus scalar fields. Top-level scalars carry document-wide totals. Key
/// order is the order the model emitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredRecord(Map<String, Value>);

impl StructuredRecord {
    /// Wrap an already validated JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Number of top-level entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a top-level entry
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterate over party groups (object-valued entries)
    pub fn parties(&self) -> impl Iterator<Item = (&str, &Map<String, Value>)> {
        self.0
            .iter()
            .filter_map(|(name, value)| value.as_object().map(|group| (name.as_str(), group)))
    }

    /// Iterate over document-wide summary values (non-object entries)
    pub fn summary(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .iter()
            .filter(|(_, value)| !value.is_object())
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a plain JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> StructuredRecord {
        let value = json!({
            "Navya Sri": {
                "Product Name": ["Racket", "Pillows"],
                "Quantity": [7, 1],
                "Date": "12 Nov 2024"
            },
            "Total Amount": 368381.0
        });
        match value {
            Value::Object(map) => StructuredRecord::from_map(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parties_and_summary_split() {
        let record = sample();
        let parties: Vec<_> = record.parties().map(|(name, _)| name).collect();
        let summary: Vec<_> = record.summary().map(|(name, _)| name).collect();
        assert_eq!(parties, vec!["Navya Sri"]);
        assert_eq!(summary, vec!["Total Amount"]);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_serializes_transparently_in_model_order() {
        let record = sample();
        let text = serde_json::to_string(&record).unwrap();
        assert!(text.starts_with(r#"{"Navya Sri":"#));
        let party_at = text.find("Navya Sri").unwrap();
        let total_at = text.find("Total Amount").unwrap();
        assert!(party_at < total_at);
    }

    #[test]
    fn test_deserialize_round_trip() {
        let record = sample();
        let text = serde_json::to_string(&record).unwrap();
        let back: StructuredRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
    }
}
