//! Conquest order engine library.
//!
//! Exposes the board representation, order resolution, game log reporting
//! and text protocol modules for use by integration tests and the binary
//! entry point.

pub mod board;
pub mod engine;
pub mod error;
pub mod protocol;
pub mod report;
pub mod resolve;
pub mod rules;

pub use error::{EngineError, Result};
pub use rules::{Rules, RulesError};
