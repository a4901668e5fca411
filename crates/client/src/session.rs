//! The client session: rule declarations, callback bindings, and dispatch.

use std::collections::HashMap;
use std::fmt;

use ring_core::{Condition, ExecutorId, FactBatch, MatchRecord, Rule, RuleSet};

use crate::gateway::{ExecutorGateway, HttpGateway};
use crate::Error;

/// A callback bound to a rule name.
///
/// The variant fixes the calling convention at registration time: `NoArg`
/// callbacks are invoked with nothing, `WithMatches` callbacks receive the
/// full match sequence of the `process` call that triggered them.
pub enum Callback {
    /// Invoked with no arguments when its rule matches.
    NoArg(Box<dyn Fn() + Send + Sync>),
    /// Invoked with the full match-record sequence when its rule matches.
    WithMatches(Box<dyn Fn(&[MatchRecord]) + Send + Sync>),
}

impl Callback {
    /// A callback taking no arguments.
    pub fn no_arg<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::NoArg(Box::new(f))
    }

    /// A callback receiving the full match sequence.
    pub fn with_matches<F>(f: F) -> Self
    where
        F: Fn(&[MatchRecord]) + Send + Sync + 'static,
    {
        Self::WithMatches(Box::new(f))
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoArg(_) => f.write_str("Callback::NoArg"),
            Self::WithMatches(_) => f.write_str("Callback::WithMatches"),
        }
    }
}

/// A named session against the remote rules-executor service.
///
/// The session owns the rule set being declared, the callback table, and the
/// executor identifier returned by registration. Rules added after a
/// successful [`register`](Session::register) are not sent retroactively;
/// call `register` again to create an executor for the grown set.
pub struct Session {
    name: String,
    gateway: Box<dyn ExecutorGateway>,
    rules: RuleSet,
    callbacks: HashMap<String, Callback>,
    executor: Option<ExecutorId>,
}

impl Session {
    /// Create a session talking to the default gateway address.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_gateway(name, HttpGateway::default())
    }

    /// Create a session with a specific gateway.
    pub fn with_gateway(name: impl Into<String>, gateway: impl ExecutorGateway + 'static) -> Self {
        Self {
            name: name.into(),
            gateway: Box::new(gateway),
            rules: RuleSet::new(),
            callbacks: HashMap::new(),
            executor: None,
        }
    }

    /// Rebuild a session's rule set from a serialized `{"host_rules": [...]}`
    /// value, as produced by serializing [`rules`](Session::rules).
    ///
    /// Callbacks are not serializable, so the reconstructed session has none
    /// bound; matches for its rules are returned from `process` but dispatch
    /// nothing until callbacks are added.
    pub fn from_json(name: impl Into<String>, value: &serde_json::Value) -> Result<Self, Error> {
        let rules: RuleSet = serde_json::from_value(value.clone())
            .map_err(|e| Error::Deserialization(e.to_string()))?;
        let mut session = Self::new(name);
        session.rules = rules;
        Ok(session)
    }

    /// The session name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule set declared so far, in declaration order.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The executor identifier from the last successful registration.
    pub fn executor_id(&self) -> Option<ExecutorId> {
        self.executor
    }

    /// Append a rule. Never fails; duplicate names are not rejected.
    pub fn add_rule(&mut self, name: impl Into<String>, condition: impl Into<Condition>) {
        self.rules.push(Rule::new(name, condition));
    }

    /// Bind a callback to a rule name, replacing any prior binding.
    ///
    /// The last binding for a name is the one dispatched, so rebinding is a
    /// supported way to redefine what a match does.
    pub fn add_callback(&mut self, name: impl Into<String>, callback: Callback) {
        let name = name.into();
        if self.callbacks.insert(name.clone(), callback).is_some() {
            tracing::debug!(session = %self.name, rule = %name, "replaced callback binding");
        }
    }

    /// Declare a rule and bind its callback in one step.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        condition: impl Into<Condition>,
        callback: Callback,
    ) {
        let name = name.into();
        self.add_rule(name.clone(), condition);
        self.add_callback(name, callback);
    }

    /// Declare a rule whose condition is an all-combinator over `exprs`.
    pub fn declare_all<I, S>(&mut self, name: impl Into<String>, exprs: I, callback: Callback)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(name, Condition::all(exprs), callback);
    }

    /// Declare a rule whose condition is an any-combinator over `exprs`.
    pub fn declare_any<I, S>(&mut self, name: impl Into<String>, exprs: I, callback: Callback)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(name, Condition::any(exprs), callback);
    }

    /// Register the current rule set with the remote service.
    ///
    /// On success the returned executor identifier is also stored on the
    /// session, enabling [`process`](Session::process). Registering again
    /// replaces the stored identifier.
    pub async fn register(&mut self) -> Result<ExecutorId, Error> {
        let id = self.gateway.create_executor(&self.rules).await?;
        self.executor = Some(id);
        tracing::debug!(session = %self.name, %id, rules = self.rules.len(), "registered rule set");
        Ok(id)
    }

    /// Submit facts for evaluation and dispatch callbacks for the matches.
    ///
    /// The input is normalized into a batch (a bare JSON object becomes a
    /// one-element batch). For every match record, in the order the server
    /// returned them, the callback bound to the record's rule name is
    /// invoked; records with no bound callback are skipped silently. The full
    /// record sequence is returned regardless of what was dispatched.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NoExecutor`] before any transport activity if the
    /// session has not been successfully registered.
    pub async fn process(&self, facts: impl Into<FactBatch>) -> Result<Vec<MatchRecord>, Error> {
        let Some(id) = self.executor else {
            return Err(Error::NoExecutor);
        };

        let batch = facts.into();
        let records = self.gateway.process_facts(id, &batch).await?;

        for record in &records {
            match self.callbacks.get(&record.rule_name) {
                Some(Callback::NoArg(f)) => {
                    tracing::debug!(session = %self.name, rule = %record.rule_name, "dispatching callback");
                    f();
                }
                Some(Callback::WithMatches(f)) => {
                    tracing::debug!(session = %self.name, rule = %record.rule_name, "dispatching callback");
                    f(&records);
                }
                None => {
                    tracing::debug!(session = %self.name, rule = %record.rule_name, "no callback bound, skipping");
                }
            }
        }

        Ok(records)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.name)
            .field("rules", &self.rules.len())
            .field("callbacks", &self.callbacks.len())
            .field("executor", &self.executor)
            .finish()
    }
}
