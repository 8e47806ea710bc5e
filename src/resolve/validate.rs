//! Order validation.
//!
//! Every check runs against the board as it stands when the order is about
//! to execute, not when it was issued: earlier orders in the same round may
//! have moved armies or changed owners.

use crate::board::{Board, Order, Player, PlayerId, Territory, TerritoryId};
use crate::report::Invalidity;

fn issuer_of(board: &Board, id: PlayerId) -> Result<&Player, Invalidity> {
    board.player(id).ok_or(Invalidity::MissingIssuer)
}

fn territory_of(board: &Board, id: TerritoryId) -> Result<&Territory, Invalidity> {
    board
        .territory(id)
        .ok_or(Invalidity::MissingTerritory { territory: id })
}

fn owned_by(player: &Player, territory: TerritoryId) -> Result<(), Invalidity> {
    if player.possesses(territory) {
        Ok(())
    } else {
        Err(Invalidity::NotOwned { territory })
    }
}

/// Checks that diplomacy lets `attacker` act against `target`.
///
/// Moving onto one's own territory is always allowed. Otherwise a
/// relation negotiated this round with the target's owner blocks the attack.
pub fn can_attack(board: &Board, attacker: PlayerId, target: TerritoryId) -> Result<(), Invalidity> {
    let defender = territory_of(board, target)?.owner();
    if defender == attacker {
        return Ok(());
    }
    let blocked = board
        .player(attacker)
        .is_some_and(|p| p.has_relation_with(defender));
    if blocked {
        return Err(Invalidity::Diplomacy { attacker, defender });
    }
    Ok(())
}

impl Order {
    /// Runs the precondition checks and names the first one that fails.
    pub fn check(&self, board: &Board) -> Result<(), Invalidity> {
        match *self {
            Order::Deploy { issuer, destination, .. } => {
                let player = issuer_of(board, issuer)?;
                territory_of(board, destination)?;
                owned_by(player, destination)
            }
            Order::Advance { issuer, source, destination, .. } => {
                let player = issuer_of(board, issuer)?;
                let src = territory_of(board, source)?;
                territory_of(board, destination)?;
                owned_by(player, source)?;
                if src.armies() == 0 {
                    return Err(Invalidity::NoArmies { territory: source });
                }
                can_attack(board, issuer, destination)
            }
            Order::Bomb { issuer, target } => {
                let player = issuer_of(board, issuer)?;
                territory_of(board, target)?;
                if player.possesses(target) {
                    return Err(Invalidity::OwnTerritory { territory: target });
                }
                can_attack(board, issuer, target)
            }
            Order::Blockade { issuer, territory } => {
                let player = issuer_of(board, issuer)?;
                territory_of(board, territory)?;
                owned_by(player, territory)
            }
            Order::Airlift { issuer, source, destination, .. } => {
                let player = issuer_of(board, issuer)?;
                if source == destination {
                    return Err(Invalidity::SameTerritory);
                }
                let src = territory_of(board, source)?;
                territory_of(board, destination)?;
                owned_by(player, source)?;
                owned_by(player, destination)?;
                // Movable armies already exclude this order's own reservation,
                // so only an empty source is rejected here. Issue-time
                // `Board::reserve` enforces the movable limit.
                if src.armies() == 0 {
                    return Err(Invalidity::NoArmies { territory: source });
                }
                Ok(())
            }
            Order::Negotiate { issuer, target } => {
                issuer_of(board, issuer)?;
                if board.player(target).is_none() {
                    return Err(Invalidity::MissingPlayer { player: target });
                }
                if issuer == target {
                    return Err(Invalidity::SelfNegotiation);
                }
                Ok(())
            }
        }
    }

    /// Returns true when the order may take effect on the current board.
    pub fn validate(&self, board: &Board) -> bool {
        self.check(board).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        board: Board,
        a: PlayerId,
        b: PlayerId,
        a1: TerritoryId,
        a2: TerritoryId,
        b1: TerritoryId,
    }

    fn fixture() -> Fixture {
        let mut board = Board::default();
        let a = board.add_player("Thong").unwrap();
        let b = board.add_player("Khoa").unwrap();
        let a1 = board.add_territory("Columbia", a, 10).unwrap();
        let a2 = board.add_territory("NewYork", a, 5).unwrap();
        let b1 = board.add_territory("California", b, 10).unwrap();
        Fixture { board, a, b, a1, a2, b1 }
    }

    #[test]
    fn deploy_requires_owned_destination() {
        let f = fixture();
        assert!(Order::Deploy { issuer: f.a, armies: 3, destination: f.a1 }.validate(&f.board));
        assert_eq!(
            Order::Deploy { issuer: f.a, armies: 3, destination: f.b1 }.check(&f.board),
            Err(Invalidity::NotOwned { territory: f.b1 })
        );
    }

    #[test]
    fn dangling_handles_are_invalid() {
        let f = fixture();
        assert_eq!(
            Order::Deploy { issuer: PlayerId(42), armies: 1, destination: f.a1 }.check(&f.board),
            Err(Invalidity::MissingIssuer)
        );
        assert_eq!(
            Order::Bomb { issuer: f.a, target: TerritoryId(99) }.check(&f.board),
            Err(Invalidity::MissingTerritory { territory: TerritoryId(99) })
        );
        assert_eq!(
            Order::Negotiate { issuer: f.a, target: PlayerId(42) }.check(&f.board),
            Err(Invalidity::MissingPlayer { player: PlayerId(42) })
        );
    }

    #[test]
    fn advance_needs_owned_source_with_armies() {
        let mut f = fixture();
        let attack = Order::Advance { issuer: f.a, armies: 3, source: f.a1, destination: f.b1 };
        assert!(attack.validate(&f.board));

        let wrong_source = Order::Advance { issuer: f.a, armies: 3, source: f.b1, destination: f.a1 };
        assert_eq!(
            wrong_source.check(&f.board),
            Err(Invalidity::NotOwned { territory: f.b1 })
        );

        f.board.territory_mut(f.a1).unwrap().set_armies(0);
        assert_eq!(attack.check(&f.board), Err(Invalidity::NoArmies { territory: f.a1 }));
    }

    #[test]
    fn negotiated_relation_blocks_attacks_both_ways() {
        let mut f = fixture();
        f.board.player_mut(f.a).unwrap().add_diplomatic_relation(f.b);
        f.board.player_mut(f.b).unwrap().add_diplomatic_relation(f.a);

        let advance = Order::Advance { issuer: f.a, armies: 3, source: f.a1, destination: f.b1 };
        assert_eq!(
            advance.check(&f.board),
            Err(Invalidity::Diplomacy { attacker: f.a, defender: f.b })
        );
        let bomb = Order::Bomb { issuer: f.b, target: f.a2 };
        assert_eq!(
            bomb.check(&f.board),
            Err(Invalidity::Diplomacy { attacker: f.b, defender: f.a })
        );

        // Friendly moves are unaffected.
        let reinforce = Order::Advance { issuer: f.a, armies: 3, source: f.a1, destination: f.a2 };
        assert!(reinforce.validate(&f.board));
    }

    #[test]
    fn bomb_rejects_own_territory() {
        let f = fixture();
        assert!(Order::Bomb { issuer: f.a, target: f.b1 }.validate(&f.board));
        assert_eq!(
            Order::Bomb { issuer: f.a, target: f.a2 }.check(&f.board),
            Err(Invalidity::OwnTerritory { territory: f.a2 })
        );
    }

    #[test]
    fn blockade_requires_ownership() {
        let f = fixture();
        assert!(Order::Blockade { issuer: f.a, territory: f.a1 }.validate(&f.board));
        assert!(!Order::Blockade { issuer: f.a, territory: f.b1 }.validate(&f.board));
    }

    #[test]
    fn airlift_rules() {
        let f = fixture();
        assert!(Order::Airlift { issuer: f.a, armies: 4, source: f.a1, destination: f.a2 }
            .validate(&f.board));
        assert_eq!(
            Order::Airlift { issuer: f.a, armies: 4, source: f.a1, destination: f.a1 }.check(&f.board),
            Err(Invalidity::SameTerritory)
        );
        assert_eq!(
            Order::Airlift { issuer: f.a, armies: 4, source: f.a1, destination: f.b1 }.check(&f.board),
            Err(Invalidity::NotOwned { territory: f.b1 })
        );
    }

    #[test]
    fn negotiate_rejects_self() {
        let f = fixture();
        assert!(Order::Negotiate { issuer: f.a, target: f.b }.validate(&f.board));
        assert_eq!(
            Order::Negotiate { issuer: f.a, target: f.a }.check(&f.board),
            Err(Invalidity::SelfNegotiation)
        );
    }

    #[test]
    fn neutral_territory_is_always_attackable() {
        let mut f = fixture();
        f.board.assign_to_neutral(f.b1).unwrap();
        f.board.player_mut(f.a).unwrap().add_diplomatic_relation(f.b);
        assert!(can_attack(&f.board, f.a, f.b1).is_ok());
    }
}
