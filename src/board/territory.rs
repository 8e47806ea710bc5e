//! Territories and their army counters.
//!
//! A territory holds an army count, the pending counters used to preview
//! orders that have been issued but not executed, and its current owner.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Stable handle into the board's territory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerritoryId(pub u16);

impl TerritoryId {
    /// Returns the table index for this territory.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "territory #{}", self.0)
    }
}

/// A territory on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    name: String,
    armies: u32,
    pending_incoming: u32,
    pending_outgoing: u32,
    pub(crate) owner: PlayerId,
}

impl Territory {
    pub(crate) fn new(name: &str, owner: PlayerId, armies: u32) -> Self {
        Territory {
            name: name.to_string(),
            armies,
            pending_incoming: 0,
            pending_outgoing: 0,
            owner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn armies(&self) -> u32 {
        self.armies
    }

    /// The player currently holding this territory.
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn add_armies(&mut self, n: u32) {
        self.armies = self.armies.saturating_add(n);
    }

    /// Removes up to `n` armies. The count never drops below zero.
    pub fn remove_armies(&mut self, n: u32) {
        self.armies = self.armies.saturating_sub(n);
    }

    pub fn set_armies(&mut self, n: u32) {
        self.armies = n;
    }

    pub fn pending_incoming(&self) -> u32 {
        self.pending_incoming
    }

    pub fn set_pending_incoming(&mut self, n: u32) {
        self.pending_incoming = n;
    }

    pub fn pending_outgoing(&self) -> u32 {
        self.pending_outgoing
    }

    pub fn set_pending_outgoing(&mut self, n: u32) {
        self.pending_outgoing = n;
    }

    /// Armies not already committed by issued advance or airlift orders.
    pub fn movable_armies(&self) -> u32 {
        self.armies.saturating_sub(self.pending_outgoing)
    }
}
