//! Text protocol handling.
//!
//! Order notation (parse and format) and the command parser for the
//! driver's main loop.

pub mod notation;
pub mod parser;

pub use notation::{format_order, format_orders, parse_order, parse_orders, NotationError};
pub use parser::{parse_command, Command};
