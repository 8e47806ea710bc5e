//! Board representation and order types.
//!
//! Contains the territory and player tables, the ownership registry, the
//! order enum and the per-player orders list.

pub mod order;
pub mod orders_list;
pub mod player;
pub mod state;
pub mod territory;

pub use order::{Order, OrderKind};
pub use orders_list::OrdersList;
pub use player::{Player, PlayerId};
pub use state::{Board, NEUTRAL_NAME};
pub use territory::{Territory, TerritoryId};
