use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A match reported by the remote service for one processed batch.
///
/// The service decides which fields accompany a match; only `ruleName` is
/// guaranteed. Unknown fields are kept in `extra` so nothing the server sends
/// is lost. The order of records in a response is server-determined and
/// significant: callbacks fire in exactly that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Name of the rule that matched.
    #[serde(rename = "ruleName")]
    pub rule_name: String,

    /// The fact(s) that triggered the match, when the server reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<Value>,

    /// Any other server-defined fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MatchRecord {
    /// A record carrying only a rule name.
    pub fn new(rule_name: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.into(),
            facts: None,
            extra: Map::new(),
        }
    }
}
