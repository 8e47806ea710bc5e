//! Game log reporting.
//!
//! Executed orders produce [`OrderEvent`] records. Anything implementing
//! [`Loggable`] can be pushed to a [`LogObserver`]. Orders and lists only
//! hold handles, so they log through [`OnBoard`] to show names.

pub mod event;
pub mod observer;

pub use event::{Invalidity, OrderEvent, Outcome};
pub use observer::{LogObserver, MemoryLog, TracingLog, WriterLog};

use crate::board::{Board, Order, OrdersList};

/// Produces the line recorded in the game log.
pub trait Loggable {
    fn string_to_log(&self) -> String;
}

/// An item paired with the board its handles point into.
pub struct OnBoard<'a, T> {
    pub item: &'a T,
    pub board: &'a Board,
}

impl<'a, T> OnBoard<'a, T> {
    pub fn new(item: &'a T, board: &'a Board) -> Self {
        OnBoard { item, board }
    }
}

impl Loggable for OnBoard<'_, Order> {
    fn string_to_log(&self) -> String {
        self.item.render(self.board)
    }
}

impl Loggable for OnBoard<'_, OrdersList> {
    fn string_to_log(&self) -> String {
        match self.item.last_issued() {
            Some(order) => {
                format!("Order Issued: {}", OnBoard::new(order, self.board).string_to_log())
            }
            None => "Order Issued: <none>".to_string(),
        }
    }
}

/// Pushes a loggable item to an observer.
pub fn notify(observer: &mut dyn LogObserver, item: &dyn Loggable) {
    observer.record(&item.string_to_log());
}
