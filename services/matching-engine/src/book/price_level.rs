//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at one price point. Orders are
//! kept in arrival order and the oldest is always matched first.

use std::collections::VecDeque;
use types::errors::ExchangeError;
use types::ids::{OrderId, UserId};
use types::numeric::{NumericError, Price, Quantity};
use types::order::Order;

/// A price level containing orders at a specific price
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<OrderEntry>,
    /// Total quantity available at this level
    total_quantity: Quantity,
}

/// Entry in the price level queue
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEntry {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub quantity: Quantity,
}

impl OrderEntry {
    /// Rebuild the full order; the price is implied by the level
    pub fn to_order(&self, price: Price) -> Order {
        Order {
            order_id: self.order_id,
            user_id: self.user_id.clone(),
            price,
            quantity: self.quantity,
        }
    }
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_quantity: Quantity::zero(),
        }
    }

    /// Insert an order at the back of the queue (time priority)
    ///
    /// Zero-quantity orders are never queued. Fails without queuing if the
    /// level total would overflow.
    pub fn insert(&mut self, order: &Order) -> Result<(), ExchangeError> {
        if order.quantity.is_zero() {
            return Ok(());
        }
        self.total_quantity = self.room_for(order.quantity)?;
        self.orders.push_back(OrderEntry {
            order_id: order.order_id,
            user_id: order.user_id.clone(),
            quantity: order.quantity,
        });
        Ok(())
    }

    /// Level total once `quantity` more is queued
    pub fn room_for(&self, quantity: Quantity) -> Result<Quantity, ExchangeError> {
        self.total_quantity
            .checked_add(quantity)
            .ok_or_else(|| NumericError::Overflow("price level quantity").into())
    }

    /// Peek at the front order without removing it
    pub fn front(&self) -> Option<&OrderEntry> {
        self.orders.front()
    }

    /// Fill the front order by `fill` units
    ///
    /// The front order is popped once it reaches zero. Returns the filled
    /// entry as it was before the fill, or None if the level is empty or the
    /// fill exceeds the front order.
    pub fn fill_front(&mut self, fill: Quantity) -> Option<OrderEntry> {
        let entry = self.orders.front_mut()?;
        let left = entry.quantity.checked_sub(fill)?;
        let before = entry.clone();

        if left.is_zero() {
            self.orders.pop_front();
        } else {
            entry.quantity = left;
        }

        self.total_quantity = self.total_quantity.checked_sub(fill).unwrap_or(Quantity::zero());
        Some(before)
    }

    /// Orders from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &OrderEntry> {
        self.orders.iter()
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total quantity at this price level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(user: &str, qty: u64) -> Order {
        Order::new(UserId::new(user), Price::from_u64(100), Quantity::from_u64(qty))
    }

    fn queue(level: &mut PriceLevel, order: &Order) {
        level.insert(order).unwrap();
    }

    #[test]
    fn test_price_level_insert() {
        let mut level = PriceLevel::new();
        queue(&mut level, &order("1", 3));

        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_quantity(), Quantity::from_u64(3));
        assert!(!level.is_empty());
    }

    #[test]
    fn test_zero_quantity_not_queued() {
        let mut level = PriceLevel::new();
        queue(&mut level, &order("1", 0));
        assert!(level.is_empty());
    }

    #[test]
    fn test_price_level_fifo_order() {
        let mut level = PriceLevel::new();
        let first = order("1", 1);
        queue(&mut level, &first);
        queue(&mut level, &order("2", 2));
        queue(&mut level, &order("3", 3));

        let front = level.front().unwrap();
        assert_eq!(front.order_id, first.order_id);
        assert_eq!(front.quantity, Quantity::from_u64(1));
    }

    #[test]
    fn test_fill_front_partial_then_complete() {
        let mut level = PriceLevel::new();
        queue(&mut level, &order("1", 5));

        let before = level.fill_front(Quantity::from_u64(3)).unwrap();
        assert_eq!(before.quantity, Quantity::from_u64(5));
        assert_eq!(level.total_quantity(), Quantity::from_u64(2));
        assert_eq!(level.order_count(), 1);

        level.fill_front(Quantity::from_u64(2)).unwrap();
        assert!(level.is_empty());
        assert_eq!(level.total_quantity(), Quantity::zero());
    }

    #[test]
    fn test_fill_front_advances_queue() {
        let mut level = PriceLevel::new();
        queue(&mut level, &order("1", 1));
        let second = order("2", 2);
        queue(&mut level, &second);

        level.fill_front(Quantity::from_u64(1)).unwrap();
        assert_eq!(level.front().unwrap().order_id, second.order_id);
    }

    #[test]
    fn test_overfill_is_rejected() {
        let mut level = PriceLevel::new();
        queue(&mut level, &order("1", 2));

        assert!(level.fill_front(Quantity::from_u64(3)).is_none());
        assert_eq!(level.total_quantity(), Quantity::from_u64(2));
    }

    #[test]
    fn test_insert_overflow_leaves_level_untouched() {
        let huge = Quantity::try_new(rust_decimal::Decimal::MAX).unwrap();
        let mut level = PriceLevel::new();
        let first = Order::new(UserId::new("1"), Price::from_u64(1), huge);
        queue(&mut level, &first);

        let result = level.insert(&order("2", 1));
        assert!(matches!(result, Err(ExchangeError::InvalidParameters(_))));
        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_quantity(), huge);
        assert_eq!(level.front().unwrap().order_id, first.order_id);
    }

    #[test]
    fn test_price_level_total_quantity_invariant() {
        let mut level = PriceLevel::new();
        queue(&mut level, &order("1", 1));
        queue(&mut level, &order("1", 2));
        queue(&mut level, &order("1", 4));

        assert_eq!(level.total_quantity(), Quantity::from_u64(7));
    }
}
