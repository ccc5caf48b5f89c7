//! Bot module for handling webhook deliveries
//!
//! This module is split into several submodules:
//! - `webhook`: axum router and the webhook callback endpoint
//! - `orchestrator`: the per-user conversation state machine
//! - `replies`: fixed reply texts for the conversation flow

pub mod orchestrator;
pub mod replies;
pub mod webhook;

// Re-export the main entry points for use in main.rs
pub use orchestrator::Orchestrator;
pub use webhook::{build_router, AppState};
