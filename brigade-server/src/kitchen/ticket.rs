//! Ticket splitter - derived per-station views of an order
//!
//! Tickets are never stored; they are recomputed from the order on every
//! read so a ticket can never disagree with its backing order.

use super::station::Station;
use serde::{Deserialize, Serialize};
use shared::kitchen::{Order, OrderItem, OrderPriority};
use std::collections::BTreeMap;

/// What a ticket covers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketKind {
    /// Items routed to one station
    Station { station: Station },
    /// All items of the order, regardless of station
    Consolidated,
}

/// A line on a ticket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketItem {
    pub name: String,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Preparation minutes per unit
    pub prep_minutes: i64,
    pub category: String,
}

impl TicketItem {
    fn from_order_item(item: &OrderItem) -> Self {
        Self {
            name: item.menu_item.name.clone(),
            quantity: item.quantity,
            note: item.note.clone(),
            prep_minutes: item.menu_item.prep_minutes,
            category: item.menu_item.category.clone(),
        }
    }
}

/// Derived per-station (or consolidated) view of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub kind: TicketKind,
    pub order_id: String,
    pub order_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    pub priority: OrderPriority,
    /// Creation time of the backing order (Unix millis); keeps `split`
    /// deterministic across recomputations
    pub created_at: i64,
    pub items: Vec<TicketItem>,
}

impl Ticket {
    fn new(order: &Order, kind: TicketKind, items: Vec<TicketItem>) -> Self {
        Self {
            kind,
            order_id: order.order_id.clone(),
            order_number: order.order_number.clone(),
            table_name: order.table_name.clone(),
            priority: order.priority,
            created_at: order.created_at,
            items,
        }
    }

    /// Station of this ticket, if it is a station ticket
    pub fn station(&self) -> Option<Station> {
        match self.kind {
            TicketKind::Station { station } => Some(station),
            TicketKind::Consolidated => None,
        }
    }
}

/// Split an order into one ticket per distinct station present, plus one
/// consolidated kitchen ticket covering all items.
///
/// Deterministic and side-effect-free; an order with zero items yields no
/// tickets at all.
pub fn split(order: &Order) -> Vec<Ticket> {
    if order.items.is_empty() {
        return Vec::new();
    }

    let mut by_station: BTreeMap<Station, Vec<TicketItem>> = BTreeMap::new();
    for item in &order.items {
        let station = Station::for_category(&item.menu_item.category);
        by_station
            .entry(station)
            .or_default()
            .push(TicketItem::from_order_item(item));
    }

    let mut tickets: Vec<Ticket> = by_station
        .into_iter()
        .map(|(station, items)| Ticket::new(order, TicketKind::Station { station }, items))
        .collect();

    tickets.push(Ticket::new(
        order,
        TicketKind::Consolidated,
        order.items.iter().map(TicketItem::from_order_item).collect(),
    ));

    tickets
}

/// Build the ticket for one station only.
///
/// Returns `None` when the order has no items routed there.
pub fn for_station(order: &Order, station: Station) -> Option<Ticket> {
    let items: Vec<TicketItem> = order
        .items
        .iter()
        .filter(|i| Station::for_category(&i.menu_item.category) == station)
        .map(TicketItem::from_order_item)
        .collect();

    if items.is_empty() {
        return None;
    }
    Some(Ticket::new(order, TicketKind::Station { station }, items))
}

/// Build the consolidated ticket covering all items.
pub fn consolidated(order: &Order) -> Option<Ticket> {
    if order.items.is_empty() {
        return None;
    }
    Some(Ticket::new(
        order,
        TicketKind::Consolidated,
        order.items.iter().map(TicketItem::from_order_item).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::kitchen::MenuItemRef;

    fn item(name: &str, category: &str, prep: i64, qty: i32) -> OrderItem {
        OrderItem::new(
            MenuItemRef {
                name: name.to_string(),
                category: category.to_string(),
                prep_minutes: prep,
            },
            qty,
        )
    }

    #[test]
    fn test_split_two_stations_plus_consolidated() {
        let order = Order::confirmed(
            "FAC1",
            vec![item("Kebab", "kebab", 15, 2), item("Salad", "salad", 5, 1)],
        );

        let tickets = split(&order);
        assert_eq!(tickets.len(), 3);

        let grill = tickets
            .iter()
            .find(|t| t.station() == Some(Station::Grill))
            .unwrap();
        assert_eq!(grill.items.len(), 1);
        assert_eq!(grill.items[0].name, "Kebab");

        let cold = tickets
            .iter()
            .find(|t| t.station() == Some(Station::Cold))
            .unwrap();
        assert_eq!(cold.items.len(), 1);

        let consolidated = tickets
            .iter()
            .find(|t| t.kind == TicketKind::Consolidated)
            .unwrap();
        assert_eq!(consolidated.items.len(), 2);
    }

    #[test]
    fn test_station_tickets_partition_the_items() {
        let order = Order::confirmed(
            "FAC2",
            vec![
                item("Kebab", "kebab", 15, 1),
                item("Burger", "burger", 12, 1),
                item("Tiramisu", "dessert", 10, 1),
            ],
        );

        let tickets = split(&order);
        let station_items: Vec<&str> = tickets
            .iter()
            .filter(|t| t.station().is_some())
            .flat_map(|t| t.items.iter().map(|i| i.name.as_str()))
            .collect();

        // Union of station tickets equals the order's items, once each
        assert_eq!(station_items.len(), order.items.len());
        for i in &order.items {
            assert_eq!(
                station_items
                    .iter()
                    .filter(|n| **n == i.menu_item.name)
                    .count(),
                1
            );
        }
    }

    #[test]
    fn test_empty_order_yields_no_tickets() {
        let order = Order::confirmed("FAC3", vec![]);
        assert!(split(&order).is_empty());
        assert!(consolidated(&order).is_none());
    }

    #[test]
    fn test_split_is_deterministic() {
        let order = Order::confirmed(
            "FAC4",
            vec![item("Kebab", "kebab", 15, 1), item("Soup", "soup", 8, 1)],
        );
        assert_eq!(split(&order), split(&order));
    }

    #[test]
    fn test_for_station_filters() {
        let order = Order::confirmed(
            "FAC5",
            vec![item("Kebab", "kebab", 15, 1), item("Salad", "salad", 5, 1)],
        );

        let grill = for_station(&order, Station::Grill).unwrap();
        assert_eq!(grill.items.len(), 1);
        assert!(for_station(&order, Station::Oven).is_none());
    }
}
