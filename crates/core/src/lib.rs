//! Core wire types shared by Ring clients.
//!
//! Everything here maps one-to-one onto the JSON the remote rules-executor
//! service speaks: rule sets are registered as `{"host_rules": [...]}`, facts
//! are submitted as `{"facts": [...]}`, and matches come back as an array of
//! records keyed by `ruleName`. Conditions are opaque to this crate; the
//! remote service is the only component that ever evaluates them.

pub mod fact;
pub mod match_record;
pub mod rule;
pub mod types;

pub use fact::FactBatch;
pub use match_record::MatchRecord;
pub use rule::{Condition, Rule, RuleSet};
pub use types::ExecutorId;
