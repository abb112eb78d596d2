//! Authprobe - black-box contract checks for a session-cookie auth service
//!
//! The service under test is an external collaborator reached over HTTP; this
//! crate holds only the harness: credential fixtures, the `Set-Cookie`
//! session extractor, an authenticated request executor, the workflow chains
//! that thread one session through a sequence of dependent calls, and the
//! assertion engine that verifies each response against its declared
//! contract.
//!
//! Run against a live deployment with: cargo run --bin authprobe

pub mod catalog;
pub mod chains;
pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod fixtures;
pub mod runner;
pub mod session;

pub use client::AuthClient;
pub use config::HarnessConfig;
pub use contract::ExpectedContract;
pub use error::{FailureClass, ProbeError, Result};
pub use fixtures::{Credential, NewUser};
pub use runner::{run_all, RunReport, ScenarioOutcome};
pub use session::SessionToken;
