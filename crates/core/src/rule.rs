use serde::{Deserialize, Serialize};

/// The condition attached to a rule.
///
/// Expressions are opaque strings; the client never parses or evaluates them.
/// On the wire a condition is either a bare string, `{"all": [...]}`, or
/// `{"any": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// A single opaque expression, e.g. `subject == "World"`.
    Expression(String),
    /// Matches only when every expression matches.
    All {
        /// The expressions, all of which must hold.
        all: Vec<String>,
    },
    /// Matches when at least one expression matches.
    Any {
        /// The expressions, any one of which may hold.
        any: Vec<String>,
    },
}

impl Condition {
    /// A bare expression condition.
    pub fn expression(expr: impl Into<String>) -> Self {
        Self::Expression(expr.into())
    }

    /// An all-combinator over the given expressions.
    pub fn all<I, S>(exprs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::All {
            all: exprs.into_iter().map(Into::into).collect(),
        }
    }

    /// An any-combinator over the given expressions.
    pub fn any<I, S>(exprs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Any {
            any: exprs.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&str> for Condition {
    fn from(expr: &str) -> Self {
        Self::Expression(expr.to_owned())
    }
}

impl From<String> for Condition {
    fn from(expr: String) -> Self {
        Self::Expression(expr)
    }
}

/// A named rule in a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule name, used to dispatch callbacks for matches. Names are expected
    /// to be unique within a session but this is not enforced; the last
    /// callback bound to a name wins at dispatch time.
    pub name: String,
    /// The condition the remote service evaluates for this rule.
    pub condition: Condition,
}

impl Rule {
    /// Create a rule from a name and anything convertible into a condition.
    pub fn new(name: impl Into<String>, condition: impl Into<Condition>) -> Self {
        Self {
            name: name.into(),
            condition: condition.into(),
        }
    }
}

/// An ordered, append-only collection of rules.
///
/// Serializes directly as the registration payload:
/// `{"host_rules": [{"name": ..., "condition": ...}, ...]}`. Insertion order
/// is preserved; the remote service may use it for tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// The rules, in declaration order.
    pub host_rules: Vec<Rule>,
}

impl RuleSet {
    /// An empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Duplicate names are not rejected.
    pub fn push(&mut self, rule: Rule) {
        self.host_rules.push(rule);
    }

    /// Number of rules in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.host_rules.len()
    }

    /// Whether the set contains no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.host_rules.is_empty()
    }

    /// Iterate over the rules in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.host_rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.host_rules.iter()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            host_rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expression_serializes_as_bare_string() {
        let c = Condition::expression("subject == \"World\"");
        assert_eq!(serde_json::to_value(&c).unwrap(), json!("subject == \"World\""));
    }

    #[test]
    fn combinators_serialize_as_keyed_objects() {
        let all = Condition::all(["a == 1", "b == 2"]);
        assert_eq!(
            serde_json::to_value(&all).unwrap(),
            json!({"all": ["a == 1", "b == 2"]})
        );

        let any = Condition::any(["a == 1"]);
        assert_eq!(serde_json::to_value(&any).unwrap(), json!({"any": ["a == 1"]}));
    }

    #[test]
    fn condition_deserializes_all_three_forms() {
        let c: Condition = serde_json::from_value(json!("x > 0")).unwrap();
        assert_eq!(c, Condition::expression("x > 0"));

        let c: Condition = serde_json::from_value(json!({"all": ["x > 0", "y > 0"]})).unwrap();
        assert_eq!(c, Condition::all(["x > 0", "y > 0"]));

        let c: Condition = serde_json::from_value(json!({"any": ["x > 0"]})).unwrap();
        assert_eq!(c, Condition::any(["x > 0"]));
    }

    #[test]
    fn rule_set_serializes_as_host_rules_payload() {
        let mut rules = RuleSet::new();
        rules.push(Rule::new("R1", "subject == \"World\""));
        rules.push(Rule::new("R3", Condition::any(["a", "b"])));

        assert_eq!(
            serde_json::to_value(&rules).unwrap(),
            json!({
                "host_rules": [
                    {"name": "R1", "condition": "subject == \"World\""},
                    {"name": "R3", "condition": {"any": ["a", "b"]}},
                ]
            })
        );
    }

    #[test]
    fn rule_set_round_trips() {
        let rules: RuleSet = [
            Rule::new("R1", "x == 1"),
            Rule::new("R2", Condition::all(["x == 1", "y == 2"])),
        ]
        .into_iter()
        .collect();

        let value = serde_json::to_value(&rules).unwrap();
        let back: RuleSet = serde_json::from_value(value).unwrap();
        assert_eq!(back, rules);
    }

    #[test]
    fn rule_set_preserves_insertion_order() {
        let mut rules = RuleSet::new();
        for name in ["R1", "R2", "R3"] {
            rules.push(Rule::new(name, "x"));
        }
        let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["R1", "R2", "R3"]);
    }
}
