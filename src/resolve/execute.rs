//! Order execution.
//!
//! `execute` validates first. A valid order mutates the board and reports
//! what happened; an invalid one retracts whatever it reserved at issue time
//! and reports why it was skipped. Nothing here fails: every call produces an
//! [`OrderEvent`].

use crate::board::{Board, Order, PlayerId, Territory, TerritoryId};
use crate::report::{Invalidity, OrderEvent, Outcome};

use super::combat;

type Effect = Result<(Outcome, String), Invalidity>;

fn territory_mut(board: &mut Board, id: TerritoryId) -> Result<&mut Territory, Invalidity> {
    board
        .territory_mut(id)
        .ok_or(Invalidity::MissingTerritory { territory: id })
}

impl Order {
    /// Validates the order against the current board and applies it.
    pub fn execute(&self, board: &mut Board) -> OrderEvent {
        let description = self.render(board);
        let effect = self.check(board).and_then(|()| self.apply(board));
        match effect {
            Ok((outcome, message)) => {
                tracing::info!(issuer = %board.player_name(self.issuer()), "{}", message);
                OrderEvent::new(*self, description, outcome, message)
            }
            Err(reason) => {
                self.undo(board);
                let message = format!(
                    "{} Order invalidated. Skipping...",
                    describe_invalidity(board, self.issuer(), reason)
                );
                tracing::info!(issuer = %board.player_name(self.issuer()), "{}", message);
                OrderEvent::new(*self, description, Outcome::Invalid(reason), message)
            }
        }
    }

    fn apply(&self, board: &mut Board) -> Effect {
        match *self {
            Order::Deploy { armies, destination, .. } => deploy(board, armies, destination),
            Order::Advance { issuer, armies, source, destination } => {
                advance(board, issuer, armies, source, destination)
            }
            Order::Bomb { target, .. } => bomb(board, target),
            Order::Blockade { territory, .. } => blockade(board, territory),
            Order::Airlift { armies, source, destination, .. } => {
                airlift(board, armies, source, destination)
            }
            Order::Negotiate { issuer, target } => negotiate(board, issuer, target),
        }
    }

    /// Retracts this order's share of the pending army counters.
    ///
    /// Runs automatically when the order turns out invalid, and should be
    /// called by whoever withdraws an issued order before it executes.
    pub fn undo(&self, board: &mut Board) {
        match *self {
            Order::Deploy { armies, destination, .. } => {
                if let Some(t) = board.territory_mut(destination) {
                    t.set_pending_incoming(t.pending_incoming().saturating_sub(armies));
                }
            }
            Order::Advance { armies, source, .. } | Order::Airlift { armies, source, .. } => {
                if let Some(t) = board.territory_mut(source) {
                    t.set_pending_outgoing(t.pending_outgoing().saturating_sub(armies));
                }
            }
            Order::Bomb { .. } | Order::Blockade { .. } | Order::Negotiate { .. } => {}
        }
    }
}

fn describe_invalidity(board: &Board, issuer: PlayerId, reason: Invalidity) -> String {
    let who = board.player_name(issuer);
    match reason {
        Invalidity::MissingIssuer => "The issuing player is no longer in the game.".to_string(),
        Invalidity::MissingTerritory { territory } => format!("{} does not exist.", territory),
        Invalidity::MissingPlayer { player } => format!("{} does not exist.", player),
        Invalidity::NotOwned { territory } => {
            format!("{} does not own {}.", who, board.territory_name(territory))
        }
        Invalidity::OwnTerritory { territory } => {
            format!("{} cannot target its own {}.", who, board.territory_name(territory))
        }
        Invalidity::NoArmies { territory } => {
            format!("{} has no armies to move.", board.territory_name(territory))
        }
        Invalidity::Diplomacy { attacker, defender } => format!(
            "{} and {} cannot attack each other for the rest of this turn.",
            board.player_name(attacker),
            board.player_name(defender)
        ),
        Invalidity::SameTerritory => "Source and destination are the same territory.".to_string(),
        Invalidity::SelfNegotiation => format!("{} cannot negotiate with itself.", who),
    }
}

fn deploy(board: &mut Board, armies: u32, destination: TerritoryId) -> Effect {
    let t = territory_mut(board, destination)?;
    t.add_armies(armies);
    t.set_pending_incoming(0);
    let message = format!("Deployed {} armies to {}.", armies, t.name());
    Ok((Outcome::Deployed { armies }, message))
}

fn advance(
    board: &mut Board,
    issuer: PlayerId,
    armies: u32,
    source: TerritoryId,
    destination: TerritoryId,
) -> Effect {
    let rules = *board.rules();
    let defender = board
        .owner_of(destination)
        .ok_or(Invalidity::MissingTerritory { territory: destination })?;
    let source_name = board.territory_name(source).to_string();
    let destination_name = board.territory_name(destination).to_string();

    // Earlier orders this round may have drained the source.
    let src = territory_mut(board, source)?;
    let moving = src.armies().min(armies);
    src.remove_armies(moving);

    let result = if defender == issuer {
        territory_mut(board, destination)?.add_armies(moving);
        let message = format!(
            "Advanced {} armies from {} to {}.",
            moving, source_name, destination_name
        );
        (Outcome::Advanced { armies: moving }, message)
    } else {
        let dst = territory_mut(board, destination)?;
        let battle = combat::simulate(moving, dst.armies(), &rules);
        dst.remove_armies(battle.defenders_killed);

        if battle.conquered() {
            board
                .transfer(destination, issuer)
                .map_err(|_| Invalidity::MissingTerritory { territory: destination })?;
            territory_mut(board, destination)?.set_armies(battle.surviving_attackers);
            let message = format!(
                "Successful attack on {}. {} armies now occupy this territory.",
                destination_name, battle.surviving_attackers
            );
            (Outcome::Conquered { survivors: battle.surviving_attackers }, message)
        } else {
            territory_mut(board, source)?.add_armies(battle.surviving_attackers);
            let mut message = format!(
                "Failed attack on {} with {} enemy armies left standing.",
                destination_name, battle.surviving_defenders
            );
            if battle.surviving_attackers > 0 {
                message.push_str(&format!(
                    " Retreating {} attacking armies back to {}.",
                    battle.surviving_attackers, source_name
                ));
            }
            let outcome = Outcome::Repelled {
                defenders_left: battle.surviving_defenders,
                retreated: battle.surviving_attackers,
            };
            (outcome, message)
        }
    };

    territory_mut(board, source)?.set_pending_outgoing(0);
    Ok(result)
}

fn bomb(board: &mut Board, target: TerritoryId) -> Effect {
    let divisor = board.rules().bomb_divisor.max(1);
    let t = territory_mut(board, target)?;
    let destroyed = t.armies() / divisor;
    t.remove_armies(destroyed);
    let remaining = t.armies();
    let message = format!(
        "Bombed {} enemy armies on {}. {} remaining.",
        destroyed,
        t.name(),
        remaining
    );
    Ok((Outcome::Bombed { destroyed, remaining }, message))
}

fn blockade(board: &mut Board, territory: TerritoryId) -> Effect {
    let t = territory_mut(board, territory)?;
    let doubled = t.armies();
    t.add_armies(doubled);
    let armies = t.armies();
    board
        .assign_to_neutral(territory)
        .map_err(|_| Invalidity::MissingTerritory { territory })?;
    let message = format!(
        "Blockade called on {}. {} neutral armies now occupy this territory.",
        board.territory_name(territory),
        armies
    );
    Ok((Outcome::Blockaded { armies }, message))
}

fn airlift(board: &mut Board, armies: u32, source: TerritoryId, destination: TerritoryId) -> Effect {
    let src = territory_mut(board, source)?;
    let moving = src.armies().min(armies);
    src.remove_armies(moving);
    src.set_pending_outgoing(0);
    territory_mut(board, destination)?.add_armies(moving);
    let message = format!(
        "Airlifted {} armies from {} to {}.",
        moving,
        board.territory_name(source),
        board.territory_name(destination)
    );
    Ok((Outcome::Airlifted { armies: moving }, message))
}

fn negotiate(board: &mut Board, issuer: PlayerId, target: PlayerId) -> Effect {
    board
        .player_mut(issuer)
        .ok_or(Invalidity::MissingIssuer)?
        .add_diplomatic_relation(target);
    board
        .player_mut(target)
        .ok_or(Invalidity::MissingPlayer { player: target })?
        .add_diplomatic_relation(issuer);
    let message = format!(
        "Negotiated diplomacy between {} and {}.",
        board.player_name(issuer),
        board.player_name(target)
    );
    Ok((Outcome::Negotiated, message))
}
