//! Board state: the territory and player tables and the ownership registry.
//!
//! Territories and players live in flat tables addressed by [`TerritoryId`]
//! and [`PlayerId`]. Ownership is recorded on both sides (the territory's
//! owner and the player's possessed list) and only changes through
//! [`Board::transfer`], which keeps the two in sync.

use crate::error::{EngineError, Result};
use crate::rules::Rules;

use super::order::Order;
use super::player::{Player, PlayerId};
use super::territory::{Territory, TerritoryId};

/// Name given to the neutral sentinel player.
pub const NEUTRAL_NAME: &str = "Neutral";

/// Complete board state for one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    territories: Vec<Territory>,
    players: Vec<Player>,
    neutral: PlayerId,
    rules: Rules,
}

impl Default for Board {
    fn default() -> Self {
        Board::empty(Rules::default())
    }
}

impl Board {
    /// Creates an empty board holding only the neutral player.
    ///
    /// Fails when the rules do not pass [`Rules::check`].
    pub fn new(rules: Rules) -> Result<Self> {
        rules.check()?;
        Ok(Board::empty(rules))
    }

    fn empty(rules: Rules) -> Self {
        Board {
            territories: Vec::new(),
            players: vec![Player::new(NEUTRAL_NAME)],
            neutral: PlayerId(0),
            rules,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The sentinel owner of blockaded and unclaimed territories.
    pub fn neutral(&self) -> PlayerId {
        self.neutral
    }

    /// Adds a player and returns its handle.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId> {
        let id = u16::try_from(self.players.len())
            .map(PlayerId)
            .map_err(|_| EngineError::TableFull("player"))?;
        self.players.push(Player::new(name));
        Ok(id)
    }

    /// Adds a territory owned by `owner` with an initial army count.
    pub fn add_territory(&mut self, name: &str, owner: PlayerId, armies: u32) -> Result<TerritoryId> {
        if self.player(owner).is_none() {
            return Err(EngineError::UnknownPlayer(owner));
        }
        let id = u16::try_from(self.territories.len())
            .map(TerritoryId)
            .map_err(|_| EngineError::TableFull("territory"))?;
        self.territories.push(Territory::new(name, owner, armies));
        self.players[owner.index()].add_owned_territory(id);
        Ok(id)
    }

    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(id.index())
    }

    pub fn territory_mut(&mut self, id: TerritoryId) -> Option<&mut Territory> {
        self.territories.get_mut(id.index())
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    pub fn territories(&self) -> impl Iterator<Item = (TerritoryId, &Territory)> {
        self.territories
            .iter()
            .enumerate()
            .map(|(i, t)| (TerritoryId(i as u16), t))
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| (PlayerId(i as u16), p))
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Finds a territory by name, ignoring ASCII case.
    pub fn territory_by_name(&self, name: &str) -> Option<TerritoryId> {
        self.territories()
            .find(|(_, t)| t.name().eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
    }

    /// Finds a player by name, ignoring ASCII case.
    pub fn player_by_name(&self, name: &str) -> Option<PlayerId> {
        self.players()
            .find(|(_, p)| p.name().eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
    }

    /// Returns a territory's name, or a placeholder for a dangling handle.
    pub fn territory_name(&self, id: TerritoryId) -> &str {
        self.territory(id).map_or("<unknown territory>", |t| t.name())
    }

    /// Returns a player's name, or a placeholder for a dangling handle.
    pub fn player_name(&self, id: PlayerId) -> &str {
        self.player(id).map_or("<unknown player>", |p| p.name())
    }

    /// The current owner of a territory.
    pub fn owner_of(&self, territory: TerritoryId) -> Option<PlayerId> {
        self.territory(territory).map(|t| t.owner())
    }

    /// Moves a territory from its current owner to `new_owner`.
    pub fn transfer(&mut self, territory: TerritoryId, new_owner: PlayerId) -> Result<()> {
        if self.player(new_owner).is_none() {
            return Err(EngineError::UnknownPlayer(new_owner));
        }
        let old_owner = self
            .owner_of(territory)
            .ok_or(EngineError::UnknownTerritory(territory))?;

        if let Some(old) = self.player_mut(old_owner) {
            old.remove_owned_territory(territory);
        }
        self.players[new_owner.index()].add_owned_territory(territory);
        self.territories[territory.index()].owner = new_owner;
        Ok(())
    }

    /// Hands a territory to the neutral player.
    pub fn assign_to_neutral(&mut self, territory: TerritoryId) -> Result<()> {
        self.transfer(territory, self.neutral)
    }

    /// Records the provisional army counters for a freshly issued order.
    ///
    /// Deploys add to the destination's pending incoming armies. Advances and
    /// airlifts add to the source's pending outgoing armies and fail when the
    /// request exceeds the source's movable armies. The issuer must own the
    /// territory it reserves on. Other orders reserve nothing.
    pub fn reserve(&mut self, order: &Order) -> Result<()> {
        match *order {
            Order::Deploy { issuer, armies, destination } => {
                self.check_owner(issuer, destination)?;
                let t = self
                    .territory_mut(destination)
                    .ok_or(EngineError::UnknownTerritory(destination))?;
                t.set_pending_incoming(t.pending_incoming().saturating_add(armies));
                Ok(())
            }
            Order::Advance { issuer, armies, source, .. }
            | Order::Airlift { issuer, armies, source, .. } => {
                self.check_owner(issuer, source)?;
                let t = self
                    .territory_mut(source)
                    .ok_or(EngineError::UnknownTerritory(source))?;
                let available = t.movable_armies();
                if armies > available {
                    return Err(EngineError::InsufficientArmies {
                        territory: source,
                        requested: armies,
                        available,
                    });
                }
                t.set_pending_outgoing(t.pending_outgoing() + armies);
                Ok(())
            }
            Order::Bomb { .. } | Order::Blockade { .. } | Order::Negotiate { .. } => Ok(()),
        }
    }

    fn check_owner(&self, player: PlayerId, territory: TerritoryId) -> Result<()> {
        let owns = self
            .player(player)
            .ok_or(EngineError::UnknownPlayer(player))?
            .possesses(territory);
        if !owns {
            return Err(EngineError::NotOwned { player, territory });
        }
        Ok(())
    }

    /// Clears every negotiated relation. Called once all of a round's orders
    /// have executed.
    pub fn end_round(&mut self) {
        for player in &mut self.players {
            player.clear_relations();
        }
    }
}
