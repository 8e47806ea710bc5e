//! Order notation encoding and decoding.
//!
//! A compact one-line text form for orders, used by the driver and in test
//! scenarios. The keyword comes first, then the issuing player, then the
//! order's arguments. Player and territory names are single tokens matched
//! case-insensitively against the board.
//!
//! ```text
//! deploy thong 3 columbia
//! advance thong 4 columbia california
//! bomb thong california
//! blockade thong newyork
//! airlift thong 6 columbia newyork
//! negotiate thong khoa
//! ```

use thiserror::Error;

use crate::board::{Board, Order, OrderKind, PlayerId, TerritoryId};

/// Errors that can occur when parsing order notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown order keyword '{0}'")]
    UnknownKeyword(String),

    #[error("unknown player '{0}'")]
    UnknownPlayer(String),

    #[error("unknown territory '{0}'")]
    UnknownTerritory(String),

    #[error("invalid army count '{0}'")]
    InvalidArmies(String),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

/// Token cursor over one order line.
struct Tokens<'a, 'b> {
    tokens: Vec<&'a str>,
    pos: usize,
    board: &'b Board,
}

impl<'a, 'b> Tokens<'a, 'b> {
    fn next(&mut self, expected: &'static str) -> Result<&'a str, NotationError> {
        let token = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or(NotationError::UnexpectedEnd(expected))?;
        self.pos += 1;
        Ok(token)
    }

    fn player(&mut self, expected: &'static str) -> Result<PlayerId, NotationError> {
        let name = self.next(expected)?;
        self.board
            .player_by_name(name)
            .ok_or_else(|| NotationError::UnknownPlayer(name.to_string()))
    }

    fn territory(&mut self, expected: &'static str) -> Result<TerritoryId, NotationError> {
        let name = self.next(expected)?;
        self.board
            .territory_by_name(name)
            .ok_or_else(|| NotationError::UnknownTerritory(name.to_string()))
    }

    fn armies(&mut self) -> Result<u32, NotationError> {
        let token = self.next("army count")?;
        token
            .parse::<u32>()
            .map_err(|_| NotationError::InvalidArmies(token.to_string()))
    }

    fn finish(&self) -> Result<(), NotationError> {
        if self.pos < self.tokens.len() {
            return Err(NotationError::TrailingInput(self.tokens[self.pos..].join(" ")));
        }
        Ok(())
    }
}

/// Parses a single order, resolving names against the board.
pub fn parse_order(s: &str, board: &Board) -> Result<Order, NotationError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    let mut t = Tokens { tokens, pos: 0, board };

    let keyword = t.next("order keyword")?;
    let kind = OrderKind::from_keyword(keyword)
        .ok_or_else(|| NotationError::UnknownKeyword(keyword.to_string()))?;
    let issuer = t.player("issuing player")?;

    let order = match kind {
        OrderKind::Deploy => {
            let armies = t.armies()?;
            let destination = t.territory("destination territory")?;
            Order::Deploy { issuer, armies, destination }
        }
        OrderKind::Advance | OrderKind::Airlift => {
            let armies = t.armies()?;
            let source = t.territory("source territory")?;
            let destination = t.territory("destination territory")?;
            if kind == OrderKind::Advance {
                Order::Advance { issuer, armies, source, destination }
            } else {
                Order::Airlift { issuer, armies, source, destination }
            }
        }
        OrderKind::Bomb => Order::Bomb {
            issuer,
            target: t.territory("target territory")?,
        },
        OrderKind::Blockade => Order::Blockade {
            issuer,
            territory: t.territory("territory")?,
        },
        OrderKind::Negotiate => Order::Negotiate {
            issuer,
            target: t.player("target player")?,
        },
    };

    t.finish()?;
    Ok(order)
}

/// Parses a ` ; `-separated list of orders.
pub fn parse_orders(s: &str, board: &Board) -> Result<Vec<Order>, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    s.split(" ; ").map(|part| parse_order(part, board)).collect()
}

/// Formats an order in notation form using board names.
pub fn format_order(order: &Order, board: &Board) -> String {
    let keyword = order.kind().keyword();
    let issuer = board.player_name(order.issuer());
    match *order {
        Order::Deploy { armies, destination, .. } => format!(
            "{} {} {} {}",
            keyword,
            issuer,
            armies,
            board.territory_name(destination)
        ),
        Order::Advance { armies, source, destination, .. }
        | Order::Airlift { armies, source, destination, .. } => format!(
            "{} {} {} {} {}",
            keyword,
            issuer,
            armies,
            board.territory_name(source),
            board.territory_name(destination)
        ),
        Order::Bomb { target: territory, .. } | Order::Blockade { territory, .. } => {
            format!("{} {} {}", keyword, issuer, board.territory_name(territory))
        }
        Order::Negotiate { target, .. } => {
            format!("{} {} {}", keyword, issuer, board.player_name(target))
        }
    }
}

/// Formats orders as a ` ; `-separated string.
pub fn format_orders(orders: &[Order], board: &Board) -> String {
    orders
        .iter()
        .map(|o| format_order(o, board))
        .collect::<Vec<_>>()
        .join(" ; ")
}
