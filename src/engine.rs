//! Driver state management.
//!
//! Holds the board, one orders list per player and the game log observer.
//! Each `handle_*` method serves one driver command and writes its response
//! to the given writer.

use std::io::Write;

use crate::board::{Board, OrdersList, Order, PlayerId};
use crate::error::Result as EngineResult;
use crate::protocol::notation::{format_order, parse_order};
use crate::report::{notify, LogObserver, OnBoard, TracingLog};
use crate::resolve::execute_round;
use crate::rules::Rules;

/// Holds the mutable state of the driver between commands.
pub struct Engine {
    board: Board,
    /// Orders lists indexed by `PlayerId`, including the neutral player's.
    lists: Vec<OrdersList>,
    log: Box<dyn LogObserver>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::with_board(Board::default(), Box::new(TracingLog))
    }
}

impl Engine {
    /// Creates an engine with an empty board. Fails on out-of-range rules.
    pub fn new(rules: Rules, log: Box<dyn LogObserver>) -> EngineResult<Self> {
        Ok(Engine::with_board(Board::new(rules)?, log))
    }

    fn with_board(board: Board, log: Box<dyn LogObserver>) -> Self {
        let lists = vec![OrdersList::new(); board.player_count()];
        Engine { board, lists, log }
    }

    fn player(&self, name: &str) -> Result<PlayerId, String> {
        self.board
            .player_by_name(name)
            .ok_or_else(|| format!("unknown player '{}'", name))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns a player's orders list.
    pub fn orders(&self, player: PlayerId) -> Option<&OrdersList> {
        self.lists.get(player.index())
    }

    /// Registers a player. Names must be unique.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, String> {
        if self.board.player_by_name(name).is_some() {
            return Err(format!("player '{}' already exists", name));
        }
        let id = self.board.add_player(name).map_err(|e| e.to_string())?;
        self.lists.push(OrdersList::new());
        Ok(id)
    }

    /// Registers a territory. The owner may be `neutral`.
    pub fn add_territory(&mut self, name: &str, owner: &str, armies: u32) -> Result<(), String> {
        if self.board.territory_by_name(name).is_some() {
            return Err(format!("territory '{}' already exists", name));
        }
        let owner = self.player(owner)?;
        self.board
            .add_territory(name, owner, armies)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    /// Parses an order, reserves its armies and appends it to the issuer's list.
    pub fn issue_order(&mut self, raw: &str) -> Result<Order, String> {
        let order = parse_order(raw, &self.board).map_err(|e| format!("bad order: {}", e))?;
        self.board.reserve(&order).map_err(|e| e.to_string())?;

        let list = &mut self.lists[order.issuer().index()];
        match order {
            Order::Deploy { issuer, armies, destination } => {
                list.add_deploy(issuer, armies, destination)
            }
            _ => list.add(order),
        }
        notify(self.log.as_mut(), &OnBoard::new(&*list, &self.board));
        Ok(order)
    }

    /// Moves an order within a player's list. Out-of-range indices are ignored.
    pub fn move_order(&mut self, player: &str, from: usize, to: usize) -> Result<bool, String> {
        let id = self.player(player)?;
        Ok(self.lists[id.index()].move_order(from, to))
    }

    /// Withdraws an order and releases the armies it reserved.
    pub fn remove_order(&mut self, player: &str, index: usize) -> Result<Order, String> {
        let id = self.player(player)?;
        let order = self.lists[id.index()]
            .remove(index)
            .map_err(|e| e.to_string())?;
        order.undo(&mut self.board);
        Ok(order)
    }

    /// Handles `orders <player>`: writes the list header and one order per line.
    pub fn handle_orders<W: Write>(&self, player: &str, out: &mut W) -> std::io::Result<()> {
        let id = match self.player(player) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("orders: {}", e);
                return Ok(());
            }
        };
        let list = &self.lists[id.index()];
        writeln!(out, "{}", list)?;
        for (i, order) in list.iter().enumerate() {
            writeln!(out, "{}: {}", i, format_order(order, &self.board))?;
        }
        out.flush()
    }

    /// Handles `execute`: runs a full round and writes one JSON event per line.
    pub fn handle_execute<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let events = execute_round(&mut self.board, &mut self.lists, self.log.as_mut());
        for event in &events {
            let line = serde_json::to_string(event).map_err(std::io::Error::other)?;
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }

    /// Handles `board`: writes one line per territory.
    pub fn handle_board<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for (_, t) in self.board.territories() {
            writeln!(
                out,
                "{} owner={} armies={} incoming={} outgoing={}",
                t.name(),
                self.board.player_name(t.owner()),
                t.armies(),
                t.pending_incoming(),
                t.pending_outgoing()
            )?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::report::MemoryLog;

    fn engine() -> Engine {
        let mut engine = Engine::new(Rules::default(), Box::new(MemoryLog::new())).unwrap();
        engine.add_player("Thong").unwrap();
        engine.add_player("Khoa").unwrap();
        engine.add_territory("Columbia", "Thong", 10).unwrap();
        engine.add_territory("NewYork", "Thong", 5).unwrap();
        engine.add_territory("California", "Khoa", 5).unwrap();
        engine
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut engine = engine();
        assert!(engine.add_player("thong").is_err());
        assert!(engine.add_territory("columbia", "Khoa", 1).is_err());
        assert!(engine.add_territory("Texas", "Sarah", 1).is_err());
    }

    #[test]
    fn neutral_can_own_territories() {
        let mut engine = engine();
        engine.add_territory("Texas", "neutral", 2).unwrap();
        let t = engine.board().territory_by_name("Texas").unwrap();
        assert_eq!(engine.board().owner_of(t), Some(engine.board().neutral()));
    }

    #[test]
    fn issuing_deploys_merges_and_reserves() {
        let mut engine = engine();
        engine.issue_order("deploy thong 3 columbia").unwrap();
        engine.issue_order("deploy thong 2 columbia").unwrap();
        let thong = engine.board().player_by_name("thong").unwrap();
        assert_eq!(engine.orders(thong).unwrap().len(), 1);
        let col = engine.board().territory_by_name("columbia").unwrap();
        assert_eq!(engine.board().territory(col).unwrap().pending_incoming(), 5);
    }

    #[test]
    fn over_committing_armies_is_rejected() {
        let mut engine = engine();
        engine.issue_order("advance thong 4 newyork california").unwrap();
        let err = engine.issue_order("airlift thong 2 newyork columbia").unwrap_err();
        assert!(err.contains("only 1 movable"), "{}", err);
    }

    #[test]
    fn cannot_reserve_another_players_armies() {
        let mut engine = engine();
        let err = engine.issue_order("advance thong 5 california columbia").unwrap_err();
        assert!(err.contains("does not own"), "{}", err);
        assert!(engine.issue_order("deploy thong 2 california").is_err());

        // Khoa's armies are untouched.
        engine.issue_order("advance khoa 5 california columbia").unwrap();
        let thong = engine.board().player_by_name("thong").unwrap();
        assert!(engine.orders(thong).unwrap().is_empty());
    }

    #[test]
    fn issue_log_names_territories() {
        struct Shared(Rc<RefCell<Vec<String>>>);
        impl LogObserver for Shared {
            fn record(&mut self, entry: &str) {
                self.0.borrow_mut().push(entry.to_string());
            }
        }

        let entries = Rc::new(RefCell::new(Vec::new()));
        let mut engine =
            Engine::new(Rules::default(), Box::new(Shared(Rc::clone(&entries)))).unwrap();
        engine.add_player("Thong").unwrap();
        engine.add_territory("Columbia", "Thong", 10).unwrap();
        engine.add_territory("NewYork", "Thong", 5).unwrap();
        engine.issue_order("airlift thong 4 columbia newyork").unwrap();
        engine.handle_execute(&mut Vec::new()).unwrap();

        assert_eq!(
            *entries.borrow(),
            vec![
                "Order Issued: [AirliftOrder] 4 armies from Columbia to NewYork",
                "Order Executed: [AirliftOrder] 4 armies from Columbia to NewYork | \
                 Airlifted 4 armies from Columbia to NewYork.",
            ]
        );
    }

    #[test]
    fn rejects_out_of_range_rules() {
        let rules = Rules { defender_loss_percent: 101, ..Rules::default() };
        assert!(Engine::new(rules, Box::new(MemoryLog::new())).is_err());
    }

    #[test]
    fn remove_releases_reservation() {
        let mut engine = engine();
        engine.issue_order("advance thong 4 columbia california").unwrap();
        engine.remove_order("thong", 0).unwrap();
        let col = engine.board().territory_by_name("columbia").unwrap();
        assert_eq!(engine.board().territory(col).unwrap().pending_outgoing(), 0);
        assert!(engine.remove_order("thong", 0).is_err());
    }

    #[test]
    fn execute_prints_json_events() {
        let mut engine = engine();
        engine.issue_order("advance thong 10 columbia california").unwrap();
        engine.issue_order("deploy khoa 1 california").unwrap();

        let mut out = Vec::new();
        engine.handle_execute(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["kind"], "deploy");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["outcome"]["outcome"], "conquered");
        assert_eq!(second["outcome"]["survivors"], 6);
    }

    #[test]
    fn orders_listing() {
        let mut engine = engine();
        engine.issue_order("bomb thong california").unwrap();
        engine.issue_order("negotiate thong khoa").unwrap();
        assert!(engine.move_order("thong", 1, 0).unwrap());
        assert!(!engine.move_order("thong", 1, 7).unwrap());

        let mut out = Vec::new();
        engine.handle_orders("thong", &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[Orders List] Size=2\n0: negotiate Thong Khoa\n1: bomb Thong California\n"
        );
    }

    #[test]
    fn board_listing() {
        let engine = engine();
        let mut out = Vec::new();
        engine.handle_board(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Columbia owner=Thong armies=10 incoming=0 outgoing=0\n"));
        assert_eq!(text.lines().count(), 3);
    }
}
