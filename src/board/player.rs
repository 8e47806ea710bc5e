//! Players, their possessed territories and diplomatic relations.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::territory::TerritoryId;

/// Stable handle into the board's player table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u16);

impl PlayerId {
    /// Returns the table index for this player.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player #{}", self.0)
    }
}

/// A participant in the game, including the neutral sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    territories: Vec<TerritoryId>,
    /// Players this one has negotiated with during the current round.
    relations: BTreeSet<PlayerId>,
}

impl Player {
    pub(crate) fn new(name: &str) -> Self {
        Player {
            name: name.to_string(),
            territories: Vec::new(),
            relations: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn possessed_territories(&self) -> &[TerritoryId] {
        &self.territories
    }

    pub fn possesses(&self, territory: TerritoryId) -> bool {
        self.territories.contains(&territory)
    }

    pub(crate) fn add_owned_territory(&mut self, territory: TerritoryId) {
        if !self.possesses(territory) {
            self.territories.push(territory);
        }
    }

    pub(crate) fn remove_owned_territory(&mut self, territory: TerritoryId) {
        self.territories.retain(|t| *t != territory);
    }

    pub fn relations(&self) -> &BTreeSet<PlayerId> {
        &self.relations
    }

    pub fn has_relation_with(&self, other: PlayerId) -> bool {
        self.relations.contains(&other)
    }

    pub fn add_diplomatic_relation(&mut self, other: PlayerId) {
        self.relations.insert(other);
    }

    pub fn clear_relations(&mut self) {
        self.relations.clear();
    }
}
