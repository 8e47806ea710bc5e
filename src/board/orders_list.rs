//! Per-player queue of pending orders.
//!
//! Orders keep their insertion position for index-based editing (`move_order`,
//! `remove`). `peek` and `pop_top_order` first stable-sort the queue by
//! priority, so orders of equal priority keep their relative order.

use std::fmt;

use crate::error::{EngineError, Result};

use super::order::Order;
use super::player::PlayerId;
use super::territory::TerritoryId;

/// An owned, editable list of orders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrdersList {
    orders: Vec<Order>,
    last_issued: Option<Order>,
}

impl OrdersList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_orders(orders: Vec<Order>) -> Self {
        OrdersList {
            last_issued: orders.last().copied(),
            orders,
        }
    }

    /// The order most recently added or merged into.
    pub fn last_issued(&self) -> Option<&Order> {
        self.last_issued.as_ref()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    pub fn get(&self, index: usize) -> Result<&Order> {
        self.orders.get(index).ok_or(EngineError::IndexOutOfRange {
            index,
            len: self.orders.len(),
        })
    }

    pub fn into_orders(self) -> Vec<Order> {
        self.orders
    }

    /// Appends an order.
    pub fn add(&mut self, order: Order) {
        self.orders.push(order);
        self.last_issued = Some(order);
    }

    /// Adds `armies` to an existing deploy from `issuer` to `destination`,
    /// or appends a new deploy order when there is none.
    pub fn add_deploy(&mut self, issuer: PlayerId, armies: u32, destination: TerritoryId) {
        let existing = self.orders.iter_mut().find(|o| {
            matches!(**o, Order::Deploy { issuer: i, destination: d, .. } if i == issuer && d == destination)
        });
        match existing {
            Some(order) => {
                order.add_armies(armies);
                self.last_issued = Some(*order);
            }
            None => self.add(Order::Deploy { issuer, armies, destination }),
        }
    }

    fn sort_by_priority(&mut self) {
        // `sort_by_key` is stable: equal priorities keep insertion order.
        self.orders.sort_by_key(|o| o.priority());
    }

    /// Returns the highest-priority order without removing it.
    pub fn peek(&mut self) -> Option<&Order> {
        self.sort_by_priority();
        self.orders.first()
    }

    /// Removes and returns the highest-priority order.
    pub fn pop_top_order(&mut self) -> Option<Order> {
        if self.orders.is_empty() {
            return None;
        }
        self.sort_by_priority();
        Some(self.orders.remove(0))
    }

    /// Moves the order at `from` to position `to` through adjacent swaps.
    ///
    /// Does nothing and returns false when either index is out of range.
    pub fn move_order(&mut self, from: usize, to: usize) -> bool {
        let len = self.orders.len();
        if from >= len || to >= len {
            return false;
        }
        if from < to {
            for i in from..to {
                self.orders.swap(i, i + 1);
            }
        } else {
            for i in (to..from).rev() {
                self.orders.swap(i, i + 1);
            }
        }
        true
    }

    /// Removes and returns the order at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Order> {
        if index >= self.orders.len() {
            return Err(EngineError::IndexOutOfRange {
                index,
                len: self.orders.len(),
            });
        }
        Ok(self.orders.remove(index))
    }
}

impl<'a> IntoIterator for &'a OrdersList {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

impl fmt::Display for OrdersList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Orders List] Size={}", self.orders.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: PlayerId = PlayerId(1);

    fn deploy(armies: u32) -> Order {
        Order::Deploy { issuer: P, armies, destination: TerritoryId(0) }
    }

    fn advance(armies: u32) -> Order {
        Order::Advance {
            issuer: P,
            armies,
            source: TerritoryId(0),
            destination: TerritoryId(1),
        }
    }

    fn bomb(target: u16) -> Order {
        Order::Bomb { issuer: P, target: TerritoryId(target) }
    }

    fn airlift() -> Order {
        Order::Airlift {
            issuer: P,
            armies: 2,
            source: TerritoryId(0),
            destination: TerritoryId(1),
        }
    }

    fn blockade() -> Order {
        Order::Blockade { issuer: P, territory: TerritoryId(0) }
    }

    #[test]
    fn empty_list_peeks_nothing() {
        let mut list = OrdersList::new();
        assert!(list.peek().is_none());
        assert!(list.pop_top_order().is_none());
        assert_eq!(list.to_string(), "[Orders List] Size=0");
    }

    #[test]
    fn pops_in_priority_order() {
        let mut list = OrdersList::new();
        list.add(advance(1));
        list.add(blockade());
        list.add(deploy(3));
        list.add(airlift());

        let kinds: Vec<u8> = std::iter::from_fn(|| list.pop_top_order())
            .map(|o| o.priority())
            .collect();
        assert_eq!(kinds, vec![1, 2, 3, 4]);
        assert!(list.is_empty());
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let mut list = OrdersList::new();
        list.add(bomb(5));
        list.add(advance(2));
        list.add(deploy(1));
        list.add(bomb(6));

        assert_eq!(list.peek(), Some(&deploy(1)));
        list.pop_top_order();
        assert_eq!(list.pop_top_order(), Some(bomb(5)));
        assert_eq!(list.pop_top_order(), Some(advance(2)));
        assert_eq!(list.pop_top_order(), Some(bomb(6)));
    }

    #[test]
    fn peek_does_not_remove() {
        let mut list = OrdersList::from_orders(vec![advance(1), deploy(2)]);
        assert_eq!(list.peek(), Some(&deploy(2)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn move_forward_and_backward() {
        let mut list = OrdersList::from_orders(vec![bomb(0), bomb(1), bomb(2), bomb(3)]);
        assert!(list.move_order(0, 2));
        assert_eq!(list.clone().into_orders(), vec![bomb(1), bomb(2), bomb(0), bomb(3)]);

        assert!(list.move_order(3, 0));
        assert_eq!(list.into_orders(), vec![bomb(3), bomb(1), bomb(2), bomb(0)]);
    }

    #[test]
    fn move_out_of_range_is_noop() {
        let mut list = OrdersList::from_orders(vec![bomb(0), bomb(1)]);
        let before = list.clone();
        assert!(!list.move_order(0, 2));
        assert!(!list.move_order(5, 0));
        assert_eq!(list, before);
    }

    #[test]
    fn remove_valid_index() {
        let mut list = OrdersList::from_orders(vec![bomb(0), bomb(1), bomb(2)]);
        assert_eq!(list.remove(1).unwrap(), bomb(1));
        assert_eq!(list.len(), 2);
        assert_eq!(list.into_orders(), vec![bomb(0), bomb(2)]);
    }

    #[test]
    fn remove_out_of_range_is_error() {
        let mut list = OrdersList::from_orders(vec![bomb(0)]);
        let err = list.remove(3).unwrap_err();
        assert!(matches!(err, EngineError::IndexOutOfRange { index: 3, len: 1 }));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn add_deploy_merges_same_destination() {
        let mut list = OrdersList::new();
        list.add_deploy(P, 3, TerritoryId(0));
        list.add_deploy(P, 2, TerritoryId(0));
        list.add_deploy(P, 1, TerritoryId(4));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap(), &deploy(5));
    }

    #[test]
    fn clone_is_independent() {
        let mut list = OrdersList::from_orders(vec![deploy(1), bomb(2)]);
        let copy = list.clone();
        list.remove(0).unwrap();
        assert_eq!(copy.len(), 2);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn tracks_last_issued() {
        let mut list = OrdersList::new();
        assert_eq!(list.last_issued(), None);
        list.add(bomb(2));
        list.add_deploy(P, 1, TerritoryId(0));
        list.add(bomb(3));
        list.add_deploy(P, 2, TerritoryId(0));
        assert_eq!(
            list.last_issued(),
            Some(&Order::Deploy { issuer: P, armies: 3, destination: TerritoryId(0) })
        );
    }
}
