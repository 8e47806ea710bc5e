//! Battle arithmetic for attacking advances.
//!
//! Both sides fire once. Each committed attacker kills a defender with the
//! defender-loss ratio and each defender kills an attacker with the
//! attacker-loss ratio. The attack succeeds only when no defender survives
//! and at least one attacker does.

use crate::rules::Rules;

/// Casualties and survivors of one battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcome {
    pub defenders_killed: u32,
    pub attackers_killed: u32,
    pub surviving_attackers: u32,
    pub surviving_defenders: u32,
}

impl BattleOutcome {
    /// True when the attackers take the territory.
    pub fn conquered(&self) -> bool {
        self.surviving_defenders == 0 && self.surviving_attackers > 0
    }
}

/// Returns `count * percent / 100` rounded half up.
///
/// Integer arithmetic keeps results exact; for non-negative counts half up
/// is the same as rounding half away from zero.
pub fn percent_of(count: u32, percent: u32) -> u32 {
    let scaled = (u64::from(count) * u64::from(percent) + 50) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Resolves a battle between `attackers` committed armies and `defenders`
/// armies on the destination.
pub fn simulate(attackers: u32, defenders: u32, rules: &Rules) -> BattleOutcome {
    let defenders_killed = percent_of(attackers, rules.defender_loss_percent);
    let attackers_killed = percent_of(defenders, rules.attacker_loss_percent);

    let outcome = BattleOutcome {
        defenders_killed,
        attackers_killed,
        surviving_attackers: attackers.saturating_sub(attackers_killed),
        surviving_defenders: defenders.saturating_sub(defenders_killed),
    };
    tracing::debug!(attackers, defenders, ?outcome, "battle resolved");
    outcome
}
