use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A batch of facts submitted for evaluation.
///
/// Serializes as the process payload `{"facts": [...]}`. Each fact is an
/// arbitrary JSON mapping; the service evaluates every registered rule
/// against the batch.
///
/// Conversions normalize the caller's input: a single JSON object becomes a
/// one-element batch, a JSON array becomes its elements. A single mapping and
/// a one-element batch containing the same mapping are therefore
/// indistinguishable on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactBatch {
    /// The facts, in submission order.
    pub facts: Vec<Value>,
}

impl FactBatch {
    /// An empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A batch containing a single fact.
    #[must_use]
    pub fn single(fact: Value) -> Self {
        Self { facts: vec![fact] }
    }

    /// Append a fact to the batch.
    pub fn push(&mut self, fact: Value) {
        self.facts.push(fact);
    }

    /// Number of facts in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether the batch contains no facts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl From<Value> for FactBatch {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(facts) => Self { facts },
            fact => Self::single(fact),
        }
    }
}

impl From<Vec<Value>> for FactBatch {
    fn from(facts: Vec<Value>) -> Self {
        Self { facts }
    }
}

impl FromIterator<Value> for FactBatch {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            facts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_object_is_wrapped_into_a_batch() {
        let batch = FactBatch::from(json!({"subject": "World"}));
        assert_eq!(batch.len(), 1);
        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            json!({"facts": [{"subject": "World"}]})
        );
    }

    #[test]
    fn array_input_becomes_the_batch_itself() {
        let batch = FactBatch::from(json!([{"a": 1}, {"b": 2}]));
        assert_eq!(batch.len(), 2);
        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            json!({"facts": [{"a": 1}, {"b": 2}]})
        );
    }

    #[test]
    fn wrapped_single_and_one_element_array_are_equivalent() {
        let from_object = FactBatch::from(json!({"subject": "World"}));
        let from_array = FactBatch::from(json!([{"subject": "World"}]));
        assert_eq!(from_object, from_array);
    }

    #[test]
    fn payload_round_trips() {
        let batch: FactBatch = [json!({"x": 1}), json!({"y": [1, 2, 3]})]
            .into_iter()
            .collect();
        let value = serde_json::to_value(&batch).unwrap();
        let back: FactBatch = serde_json::from_value(value).unwrap();
        assert_eq!(back, batch);
    }
}
