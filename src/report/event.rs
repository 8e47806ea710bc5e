//! Structured records of executed orders.

use serde::{Deserialize, Serialize};

use crate::board::{Order, OrderKind, PlayerId, TerritoryId};

use super::Loggable;

/// Why an order was rejected at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Invalidity {
    /// The issuing player is not on the board.
    MissingIssuer,
    /// A referenced territory is not on the board.
    MissingTerritory { territory: TerritoryId },
    /// The negotiation target is not on the board.
    MissingPlayer { player: PlayerId },
    /// The order needs a territory the issuer does not hold.
    NotOwned { territory: TerritoryId },
    /// The issuer targeted one of its own territories.
    OwnTerritory { territory: TerritoryId },
    /// The source territory has no armies left.
    NoArmies { territory: TerritoryId },
    /// The issuer negotiated with the defender this round.
    Diplomacy { attacker: PlayerId, defender: PlayerId },
    /// Source and destination are the same territory.
    SameTerritory,
    /// A player tried to negotiate with itself.
    SelfNegotiation,
}

/// What an order did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Deployed { armies: u32 },
    /// Friendly advance between two of the issuer's territories.
    Advanced { armies: u32 },
    Conquered { survivors: u32 },
    Repelled { defenders_left: u32, retreated: u32 },
    Bombed { destroyed: u32, remaining: u32 },
    Blockaded { armies: u32 },
    Airlifted { armies: u32 },
    Negotiated,
    Invalid(Invalidity),
}

impl Outcome {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Outcome::Invalid(_))
    }
}

/// A single executed order together with its effect and narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub kind: OrderKind,
    pub issuer: PlayerId,
    pub order: Order,
    /// The order with names resolved, as it stood before execution.
    pub description: String,
    pub outcome: Outcome,
    pub territories: Vec<TerritoryId>,
    pub message: String,
}

impl OrderEvent {
    pub fn new(order: Order, description: String, outcome: Outcome, message: String) -> Self {
        OrderEvent {
            description,
            kind: order.kind(),
            issuer: order.issuer(),
            territories: order.territories(),
            order,
            outcome,
            message,
        }
    }
}

impl Loggable for OrderEvent {
    fn string_to_log(&self) -> String {
        format!("Order Executed: {} | {}", self.description, self.message)
    }
}
