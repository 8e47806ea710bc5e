//! Order resolution.
//!
//! Validates and executes orders against the board, resolves battles, and
//! runs whole rounds across every player's orders list.

pub mod combat;
pub mod execute;
pub mod round;
pub mod validate;

pub use combat::{percent_of, simulate, BattleOutcome};
pub use round::execute_round;
pub use validate::can_attack;
