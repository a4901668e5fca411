//! Ring HTTP Client
//!
//! A native Rust client for a remote rules-executor service. Callers declare
//! named condition-based rules, register them over the service's REST API,
//! submit facts for evaluation, and have local callbacks invoked for every
//! rule the service reports as matched. All condition evaluation happens on
//! the remote side; this crate owns the rule list, the callback table, the
//! two-request wire protocol, and the dispatch step.
//!
//! # Quick Start
//!
//! ```no_run
//! use ring_client::{Callback, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ring_client::Error> {
//!     let mut session = Session::new("greetings");
//!
//!     session.declare(
//!         "R1",
//!         "subject == \"World\"",
//!         Callback::no_arg(|| println!("Hello World")),
//!     );
//!     session.declare_any(
//!         "R3",
//!         ["subject == \"World\"", "subject == \"myself\""],
//!         Callback::with_matches(|matches| println!("{} rules matched", matches.len())),
//!     );
//!
//!     session.register().await?;
//!
//!     let matches = session
//!         .process(serde_json::json!({"subject": "World"}))
//!         .await?;
//!     println!("matched: {matches:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The default session talks to `http://0.0.0.0:8080`. Use the gateway
//! builder for anything else:
//!
//! ```no_run
//! use std::time::Duration;
//! use ring_client::{HttpGatewayBuilder, Session};
//!
//! let gateway = HttpGatewayBuilder::for_host("rules.internal", 9000)
//!     .timeout(Duration::from_secs(5))
//!     .build()
//!     .unwrap();
//! let session = Session::with_gateway("greetings", gateway);
//! ```

mod error;
mod gateway;
mod session;

pub use error::Error;
pub use gateway::{DEFAULT_BASE_URL, ExecutorGateway, HttpGateway, HttpGatewayBuilder};
pub use session::{Callback, Session};

// Re-export core wire types so callers don't need a direct `ring_core` dependency.
pub use ring_core::{Condition, ExecutorId, FactBatch, MatchRecord, Rule, RuleSet};
