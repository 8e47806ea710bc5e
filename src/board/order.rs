//! Order types for the execution phase.
//!
//! Represents the six orders a player can issue: deploy, advance, bomb,
//! blockade, airlift and negotiate. Each variant carries exactly the
//! handles it needs; the issuer and any target are resolved against the
//! [`Board`] when the order is validated or executed.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::Board;
use super::territory::TerritoryId;

/// The kind of an order. Fixed for the lifetime of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Deploy,
    Advance,
    Bomb,
    Blockade,
    Airlift,
    Negotiate,
}

impl OrderKind {
    pub const ALL: [OrderKind; 6] = [
        OrderKind::Deploy,
        OrderKind::Advance,
        OrderKind::Bomb,
        OrderKind::Blockade,
        OrderKind::Airlift,
        OrderKind::Negotiate,
    ];

    /// Execution priority. Lower values execute first.
    pub const fn priority(self) -> u8 {
        match self {
            OrderKind::Deploy => 1,
            OrderKind::Airlift => 2,
            OrderKind::Blockade => 3,
            OrderKind::Advance | OrderKind::Bomb | OrderKind::Negotiate => 4,
        }
    }

    /// Returns the lowercase keyword used in order notation.
    pub const fn keyword(self) -> &'static str {
        match self {
            OrderKind::Deploy => "deploy",
            OrderKind::Advance => "advance",
            OrderKind::Bomb => "bomb",
            OrderKind::Blockade => "blockade",
            OrderKind::Airlift => "airlift",
            OrderKind::Negotiate => "negotiate",
        }
    }

    /// Parses a notation keyword, ignoring ASCII case.
    pub fn from_keyword(s: &str) -> Option<OrderKind> {
        OrderKind::ALL
            .into_iter()
            .find(|k| k.keyword().eq_ignore_ascii_case(s))
    }

    const fn label(self) -> &'static str {
        match self {
            OrderKind::Deploy => "[DeployOrder]",
            OrderKind::Advance => "[AdvanceOrder]",
            OrderKind::Bomb => "[BombOrder]",
            OrderKind::Blockade => "[BlockadeOrder]",
            OrderKind::Airlift => "[AirliftOrder]",
            OrderKind::Negotiate => "[NegotiateOrder]",
        }
    }
}

/// A pending order issued by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Order {
    /// Place reinforcements on an owned territory.
    Deploy {
        issuer: PlayerId,
        armies: u32,
        destination: TerritoryId,
    },

    /// Move armies to another territory, attacking it if enemy-held.
    Advance {
        issuer: PlayerId,
        armies: u32,
        source: TerritoryId,
        destination: TerritoryId,
    },

    /// Destroy half of the armies on an enemy territory.
    Bomb {
        issuer: PlayerId,
        target: TerritoryId,
    },

    /// Double an owned territory's armies and hand it to the neutral player.
    Blockade {
        issuer: PlayerId,
        territory: TerritoryId,
    },

    /// Move armies between two owned territories, ignoring adjacency.
    Airlift {
        issuer: PlayerId,
        armies: u32,
        source: TerritoryId,
        destination: TerritoryId,
    },

    /// Forbid attacks between issuer and target for the rest of the round.
    Negotiate {
        issuer: PlayerId,
        target: PlayerId,
    },
}

impl Order {
    pub fn kind(&self) -> OrderKind {
        match self {
            Order::Deploy { .. } => OrderKind::Deploy,
            Order::Advance { .. } => OrderKind::Advance,
            Order::Bomb { .. } => OrderKind::Bomb,
            Order::Blockade { .. } => OrderKind::Blockade,
            Order::Airlift { .. } => OrderKind::Airlift,
            Order::Negotiate { .. } => OrderKind::Negotiate,
        }
    }

    pub fn priority(&self) -> u8 {
        self.kind().priority()
    }

    pub fn issuer(&self) -> PlayerId {
        match *self {
            Order::Deploy { issuer, .. }
            | Order::Advance { issuer, .. }
            | Order::Bomb { issuer, .. }
            | Order::Blockade { issuer, .. }
            | Order::Airlift { issuer, .. }
            | Order::Negotiate { issuer, .. } => issuer,
        }
    }

    /// Territories the order refers to, source first.
    pub fn territories(&self) -> Vec<TerritoryId> {
        match *self {
            Order::Deploy { destination, .. } => vec![destination],
            Order::Advance { source, destination, .. }
            | Order::Airlift { source, destination, .. } => vec![source, destination],
            Order::Bomb { target, .. } => vec![target],
            Order::Blockade { territory, .. } => vec![territory],
            Order::Negotiate { .. } => Vec::new(),
        }
    }

    /// Grows a deploy order by `additional` armies. Returns false for any
    /// other kind of order.
    pub fn add_armies(&mut self, additional: u32) -> bool {
        match self {
            Order::Deploy { armies, .. } => {
                *armies = armies.saturating_add(additional);
                true
            }
            _ => false,
        }
    }

    /// Renders the order with player and territory names from the board.
    pub fn render(&self, board: &Board) -> String {
        let label = self.kind().label();
        match *self {
            Order::Deploy { armies, destination, .. } => format!(
                "{} {} armies to {}",
                label,
                armies,
                board.territory_name(destination)
            ),
            Order::Advance { armies, source, destination, .. }
            | Order::Airlift { armies, source, destination, .. } => format!(
                "{} {} armies from {} to {}",
                label,
                armies,
                board.territory_name(source),
                board.territory_name(destination)
            ),
            Order::Bomb { target, .. } => {
                format!("{} Target: {}", label, board.territory_name(target))
            }
            Order::Blockade { territory, .. } => {
                let present = board.territory(territory).map_or(0, |t| t.armies());
                format!(
                    "{} Territory: {} ({} present)",
                    label,
                    board.territory_name(territory),
                    present
                )
            }
            Order::Negotiate { issuer, target } => format!(
                "{} Initiator: {}, Target: {}",
                label,
                board.player_name(issuer),
                board.player_name(target)
            ),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.kind().label();
        match *self {
            Order::Deploy { armies, destination, .. } => {
                write!(f, "{} {} armies to {}", label, armies, destination)
            }
            Order::Advance { armies, source, destination, .. }
            | Order::Airlift { armies, source, destination, .. } => write!(
                f,
                "{} {} armies from {} to {}",
                label, armies, source, destination
            ),
            Order::Bomb { target, .. } => write!(f, "{} Target: {}", label, target),
            Order::Blockade { territory, .. } => write!(f, "{} Territory: {}", label, territory),
            Order::Negotiate { issuer, target } => {
                write!(f, "{} Initiator: {}, Target: {}", label, issuer, target)
            }
        }
    }
}
