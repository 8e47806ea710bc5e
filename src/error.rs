//! Error types for the order engine.
//!
//! Order validity is not an error: an invalid order is a no-op with a
//! diagnostic. These errors cover misuse of the containers and registries.

use thiserror::Error;

use crate::board::{PlayerId, TerritoryId};
use crate::rules::RulesError;

/// Result type alias using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

/// Recoverable failures raised by the board, order lists and rules loading.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("index {index} out of range for orders list of size {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown territory {0}")]
    UnknownTerritory(TerritoryId),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("{player} does not own {territory}")]
    NotOwned {
        player: PlayerId,
        territory: TerritoryId,
    },

    #[error("the {0} table is full")]
    TableFull(&'static str),

    #[error("cannot reserve {requested} armies on {territory}: only {available} movable")]
    InsufficientArmies {
        territory: TerritoryId,
        requested: u32,
        available: u32,
    },

    #[error(transparent)]
    Rules(#[from] RulesError),
}
