//! Order repository boundary
//!
//! The core never assumes a specific storage engine; any implementation
//! that preserves the order invariants is acceptable. The in-memory
//! implementation backs tests and single-node deployments, and replaces
//! the module-level shared collections the original leaned on.

use super::error::{KitchenError, KitchenResult};
use parking_lot::RwLock;
use shared::kitchen::Order;
use std::collections::HashMap;

/// Storage boundary for kitchen orders
pub trait OrderRepository: Send + Sync {
    /// Load all non-terminal orders
    fn load_active(&self) -> KitchenResult<Vec<Order>>;

    /// Get one order by ID
    fn get(&self, order_id: &str) -> KitchenResult<Option<Order>>;

    /// Insert a new order; fails if the ID already exists
    fn insert(&self, order: Order) -> KitchenResult<()>;

    /// Persist an updated order; fails if the order is unknown
    fn save(&self, order: &Order) -> KitchenResult<()>;
}

/// In-memory repository
#[derive(Default)]
pub struct MemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
}

impl MemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders (terminal ones included)
    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }
}

impl OrderRepository for MemoryOrderRepository {
    fn load_active(&self) -> KitchenResult<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .values()
            .filter(|o| o.is_active())
            .cloned()
            .collect())
    }

    fn get(&self, order_id: &str) -> KitchenResult<Option<Order>> {
        Ok(self.orders.read().get(order_id).cloned())
    }

    fn insert(&self, order: Order) -> KitchenResult<()> {
        let mut orders = self.orders.write();
        if orders.contains_key(&order.order_id) {
            return Err(KitchenError::Repository(format!(
                "order {} already exists",
                order.order_id
            )));
        }
        orders.insert(order.order_id.clone(), order);
        Ok(())
    }

    fn save(&self, order: &Order) -> KitchenResult<()> {
        let mut orders = self.orders.write();
        match orders.get_mut(&order.order_id) {
            Some(slot) => {
                *slot = order.clone();
                Ok(())
            }
            None => Err(KitchenError::OrderNotFound(order.order_id.clone())),
        }
    }
}

impl std::fmt::Debug for MemoryOrderRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryOrderRepository")
            .field("orders", &self.orders.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::kitchen::{MenuItemRef, OrderItem, OrderStatus};

    fn order(number: &str) -> Order {
        Order::confirmed(
            number,
            vec![OrderItem::new(
                MenuItemRef {
                    name: "Kebab".to_string(),
                    category: "kebab".to_string(),
                    prep_minutes: 15,
                },
                1,
            )],
        )
    }

    #[test]
    fn test_insert_and_get() {
        let repo = MemoryOrderRepository::new();
        let o = order("FAC1");
        let id = o.order_id.clone();
        repo.insert(o).unwrap();

        assert!(repo.get(&id).unwrap().is_some());
        assert!(repo.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_fails() {
        let repo = MemoryOrderRepository::new();
        let o = order("FAC1");
        repo.insert(o.clone()).unwrap();
        assert!(repo.insert(o).is_err());
    }

    #[test]
    fn test_load_active_excludes_terminal_orders() {
        let repo = MemoryOrderRepository::new();
        let active = order("FAC1");
        let mut served = order("FAC2");
        served.status = OrderStatus::Served;
        repo.insert(active).unwrap();
        repo.insert(served).unwrap();

        let loaded = repo.load_active().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].order_number, "FAC1");
        // Terminal orders stay stored - cancellation is a status, not a removal
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_save_unknown_order_fails() {
        let repo = MemoryOrderRepository::new();
        let o = order("FAC1");
        assert!(matches!(
            repo.save(&o),
            Err(KitchenError::OrderNotFound(_))
        ));
    }
}
