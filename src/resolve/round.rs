//! Execution of a full round of orders across every player.
//!
//! Each step executes the lowest priority value waiting at the head of any
//! list. When several players have an order of that priority, they take
//! turns: the search starts just after the player served last. Negotiated
//! relations expire once every list is drained.

use crate::board::{Board, OrdersList};
use crate::report::{notify, LogObserver, OrderEvent};

/// Drains every list, executing orders in priority order, then ends the round.
pub fn execute_round(
    board: &mut Board,
    lists: &mut [OrdersList],
    observer: &mut dyn LogObserver,
) -> Vec<OrderEvent> {
    let _span = tracing::info_span!("round", lists = lists.len()).entered();
    let n = lists.len();
    let mut events = Vec::new();
    let mut cursor = 0;

    loop {
        let mut best: Option<(u8, usize)> = None;
        for offset in 0..n {
            let i = (cursor + offset) % n;
            if let Some(priority) = lists[i].peek().map(|o| o.priority()) {
                if best.map_or(true, |(p, _)| priority < p) {
                    best = Some((priority, i));
                }
            }
        }

        let Some((_, i)) = best else { break };
        let Some(order) = lists[i].pop_top_order() else { break };
        let event = order.execute(board);
        notify(observer, &event);
        events.push(event);
        cursor = (i + 1) % n;
    }

    board.end_round();
    tracing::debug!(executed = events.len(), "round finished");
    events
}
