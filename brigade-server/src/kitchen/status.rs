//! Status state machine - legal order and item transitions
//!
//! Pure functions over `&mut Order` that validate a transition, apply it,
//! and return the emitted events. Side effects live downstream of the
//! events; nothing here talks to a printer or notifier.
//!
//! Item states: PENDING → PREPARING → COMPLETED, with `reset` the only
//! backward step (PREPARING → PENDING).
//! Order states: CONFIRMED → PREPARING → READY → SERVED; CANCELLED is
//! reachable from CONFIRMED or PREPARING only.

use super::error::{KitchenError, KitchenResult};
use shared::kitchen::{
    EventPayload, ItemStatus, KitchenEvent, KitchenEventType, Order, OrderStatus,
};

/// Fail with `OrderClosed` when the order is served or cancelled.
pub fn ensure_open(order: &Order) -> KitchenResult<()> {
    if order.is_closed() {
        return Err(KitchenError::OrderClosed(order.order_id.clone()));
    }
    Ok(())
}

/// Validate an order handed over by intake.
///
/// The subsystem only accepts confirmed orders whose items have not been
/// worked on yet.
pub fn validate_admission(order: &Order) -> KitchenResult<KitchenEvent> {
    if order.status != OrderStatus::Confirmed {
        return Err(KitchenError::InvalidTransition(format!(
            "order {} is {:?}, only CONFIRMED orders enter the kitchen",
            order.order_id, order.status
        )));
    }
    if let Some(item) = order.items.iter().find(|i| i.status != ItemStatus::Pending) {
        return Err(KitchenError::InvalidTransition(format!(
            "item {} of order {} is {:?}, expected PENDING",
            item.item_id, order.order_id, item.status
        )));
    }

    Ok(KitchenEvent::new(
        order.order_id.clone(),
        KitchenEventType::OrderConfirmed,
        EventPayload::OrderConfirmed {
            order_number: order.order_number.clone(),
            item_count: order.items.len(),
        },
    ))
}

/// Start preparing an item: PENDING → PREPARING, timer starts.
///
/// The first item started also moves the order CONFIRMED → PREPARING.
pub fn begin_item(order: &mut Order, item_id: &str, now: i64) -> KitchenResult<Vec<KitchenEvent>> {
    ensure_open(order)?;

    let order_id = order.order_id.clone();
    let item = order
        .find_item_mut(item_id)
        .ok_or_else(|| KitchenError::ItemNotFound(item_id.to_string()))?;

    if item.status != ItemStatus::Pending {
        return Err(KitchenError::InvalidTransition(format!(
            "item {} is {:?}, start requires PENDING",
            item_id, item.status
        )));
    }

    item.status = ItemStatus::Preparing;
    item.started_at = Some(now);
    item.extended_ms = 0;
    item.completed_at = None;
    let estimated_end = now + item.prep_duration_ms();
    let item_name = item.menu_item.name.clone();

    let mut events = vec![KitchenEvent::new(
        order_id.clone(),
        KitchenEventType::ItemStarted,
        EventPayload::ItemStarted {
            item_id: item_id.to_string(),
            item_name,
            estimated_end,
        },
    )];

    if order.status == OrderStatus::Confirmed {
        order.status = OrderStatus::Preparing;
        events.push(KitchenEvent::new(
            order_id,
            KitchenEventType::OrderPreparing,
            EventPayload::OrderPreparing {},
        ));
    }

    order.touch(now);
    Ok(events)
}

/// Complete an item: PREPARING → COMPLETED, timer destroyed.
///
/// Runs the order-completion check: once every item is COMPLETED the
/// order becomes READY, exactly once.
pub fn complete_item(
    order: &mut Order,
    item_id: &str,
    now: i64,
) -> KitchenResult<Vec<KitchenEvent>> {
    ensure_open(order)?;

    let order_id = order.order_id.clone();
    let item = order
        .find_item_mut(item_id)
        .ok_or_else(|| KitchenError::ItemNotFound(item_id.to_string()))?;

    if item.status != ItemStatus::Preparing {
        return Err(KitchenError::InvalidTransition(format!(
            "item {} is {:?}, complete requires PREPARING",
            item_id, item.status
        )));
    }

    item.status = ItemStatus::Completed;
    item.completed_at = Some(now);
    let item_name = item.menu_item.name.clone();

    let order_ready = order.all_items_completed();

    let mut events = vec![KitchenEvent::new(
        order_id.clone(),
        KitchenEventType::ItemCompleted,
        EventPayload::ItemCompleted {
            item_id: item_id.to_string(),
            item_name,
            order_ready,
        },
    )];

    if order_ready {
        order.status = OrderStatus::Ready;
        events.push(KitchenEvent::new(
            order_id,
            KitchenEventType::OrderReady,
            EventPayload::OrderReady {
                order_number: order.order_number.clone(),
                table_name: order.table_name.clone(),
                customer_name: order.customer_name.clone(),
            },
        ));
    }

    order.touch(now);
    Ok(events)
}

/// Undo an accidental start: PREPARING → PENDING, timer discarded.
pub fn reset_item(order: &mut Order, item_id: &str, now: i64) -> KitchenResult<KitchenEvent> {
    ensure_open(order)?;

    let order_id = order.order_id.clone();
    let item = order
        .find_item_mut(item_id)
        .ok_or_else(|| KitchenError::ItemNotFound(item_id.to_string()))?;

    if item.status != ItemStatus::Preparing {
        return Err(KitchenError::InvalidTransition(format!(
            "item {} is {:?}, reset requires PREPARING",
            item_id, item.status
        )));
    }

    item.status = ItemStatus::Pending;
    item.started_at = None;
    item.extended_ms = 0;
    item.completed_at = None;
    let item_name = item.menu_item.name.clone();

    order.touch(now);
    Ok(KitchenEvent::new(
        order_id,
        KitchenEventType::ItemReset,
        EventPayload::ItemReset {
            item_id: item_id.to_string(),
            item_name,
        },
    ))
}

/// Grant a manual grace period: shifts the estimated end forward.
///
/// No status change; requires a live timer (item PREPARING).
pub fn extend_item(
    order: &mut Order,
    item_id: &str,
    minutes: i64,
    now: i64,
) -> KitchenResult<KitchenEvent> {
    ensure_open(order)?;

    if minutes <= 0 {
        return Err(KitchenError::InvalidTransition(
            "extend requires a positive number of minutes".to_string(),
        ));
    }

    let order_id = order.order_id.clone();
    let item = order
        .find_item_mut(item_id)
        .ok_or_else(|| KitchenError::ItemNotFound(item_id.to_string()))?;

    let Some(started_at) = item.started_at.filter(|_| item.status == ItemStatus::Preparing) else {
        return Err(KitchenError::InvalidTransition(format!(
            "item {} has no running timer to extend",
            item_id
        )));
    };

    item.extended_ms += minutes * 60_000;
    let estimated_end = started_at + item.prep_duration_ms() + item.extended_ms;

    order.touch(now);
    Ok(KitchenEvent::new(
        order_id,
        KitchenEventType::TimerExtended,
        EventPayload::TimerExtended {
            item_id: item_id.to_string(),
            added_minutes: minutes,
            estimated_end,
        },
    ))
}

/// Front-of-house handoff: READY → SERVED. Never automatic.
pub fn serve(order: &mut Order, now: i64) -> KitchenResult<KitchenEvent> {
    ensure_open(order)?;

    if order.status != OrderStatus::Ready {
        return Err(KitchenError::InvalidTransition(format!(
            "order {} is {:?}, serve requires READY",
            order.order_id, order.status
        )));
    }

    order.status = OrderStatus::Served;
    order.touch(now);
    Ok(KitchenEvent::new(
        order.order_id.clone(),
        KitchenEventType::OrderServed,
        EventPayload::OrderServed {},
    ))
}

/// Cancel an order. Reachable from CONFIRMED or PREPARING only;
/// cancellation is a status, not a removal.
pub fn cancel(order: &mut Order, now: i64) -> KitchenResult<KitchenEvent> {
    ensure_open(order)?;

    if !matches!(
        order.status,
        OrderStatus::Confirmed | OrderStatus::Preparing
    ) {
        return Err(KitchenError::InvalidTransition(format!(
            "order {} is {:?}, cancel requires CONFIRMED or PREPARING",
            order.order_id, order.status
        )));
    }

    order.status = OrderStatus::Cancelled;
    order.touch(now);
    Ok(KitchenEvent::new(
        order.order_id.clone(),
        KitchenEventType::OrderCancelled,
        EventPayload::OrderCancelled {},
    ))
}

/// Change the priority level. O(1): the queue reorders at read time.
///
/// The level arrives as its wire name so values outside the enumerated
/// set surface as `InvalidPriority`.
pub fn change_priority(order: &mut Order, level: &str, now: i64) -> KitchenResult<KitchenEvent> {
    let new_level = shared::kitchen::OrderPriority::parse(level)
        .ok_or_else(|| KitchenError::InvalidPriority(level.to_string()))?;

    ensure_open(order)?;

    let previous = order.priority;
    order.priority = new_level;
    // updated_at only; created_at stays the queue tiebreaker
    order.touch(now);

    Ok(KitchenEvent::new(
        order.order_id.clone(),
        KitchenEventType::PriorityChanged,
        EventPayload::PriorityChanged {
            previous,
            current: new_level,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::kitchen::{MenuItemRef, OrderItem, OrderPriority};

    const MIN: i64 = 60_000;

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

    fn two_item_order() -> Order {
        Order::confirmed(
            "FAC1",
            vec![item("Kebab", "kebab", 15, 2), item("Salad", "salad", 5, 1)],
        )
    }

    #[test]
    fn test_begin_first_item_moves_order_to_preparing() {
        let mut order = two_item_order();
        let id = order.items[0].item_id.clone();

        let events = begin_item(&mut order, &id, 1_000).unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.items[0].status, ItemStatus::Preparing);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, KitchenEventType::ItemStarted);
        assert_eq!(events[1].event_type, KitchenEventType::OrderPreparing);

        // Estimated end covers 2 units at 15 min
        match &events[0].payload {
            EventPayload::ItemStarted { estimated_end, .. } => {
                assert_eq!(*estimated_end, 1_000 + 30 * MIN);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_begin_second_item_emits_no_order_event() {
        let mut order = two_item_order();
        let first = order.items[0].item_id.clone();
        let second = order.items[1].item_id.clone();
        begin_item(&mut order, &first, 1_000).unwrap();

        let events = begin_item(&mut order, &second, 2_000).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, KitchenEventType::ItemStarted);
    }

    #[test]
    fn test_start_twice_is_invalid() {
        let mut order = two_item_order();
        let id = order.items[0].item_id.clone();
        begin_item(&mut order, &id, 1_000).unwrap();

        let err = begin_item(&mut order, &id, 2_000).unwrap_err();
        assert!(matches!(err, KitchenError::InvalidTransition(_)));
    }

    #[test]
    fn test_complete_never_started_is_invalid() {
        let mut order = two_item_order();
        let id = order.items[0].item_id.clone();

        let err = complete_item(&mut order, &id, 1_000).unwrap_err();
        assert!(matches!(err, KitchenError::InvalidTransition(_)));
    }

    #[test]
    fn test_order_ready_exactly_when_all_items_complete() {
        let mut order = two_item_order();
        let first = order.items[0].item_id.clone();
        let second = order.items[1].item_id.clone();

        begin_item(&mut order, &first, 1_000).unwrap();
        begin_item(&mut order, &second, 1_000).unwrap();

        let events = complete_item(&mut order, &first, 2_000).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(order.status, OrderStatus::Preparing);

        let events = complete_item(&mut order, &second, 3_000).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].event_type, KitchenEventType::OrderReady);
        assert_eq!(order.status, OrderStatus::Ready);
    }

    #[test]
    fn test_reset_returns_item_to_pending_and_discards_timer() {
        let mut order = two_item_order();
        let id = order.items[0].item_id.clone();
        begin_item(&mut order, &id, 1_000).unwrap();
        extend_item(&mut order, &id, 5, 1_500).unwrap();

        reset_item(&mut order, &id, 2_000).unwrap();
        let item = order.find_item(&id).unwrap();
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.started_at, None);
        assert_eq!(item.extended_ms, 0);
    }

    #[test]
    fn test_reset_pending_item_is_invalid() {
        let mut order = two_item_order();
        let id = order.items[0].item_id.clone();
        let err = reset_item(&mut order, &id, 1_000).unwrap_err();
        assert!(matches!(err, KitchenError::InvalidTransition(_)));
    }

    #[test]
    fn test_extend_requires_running_timer() {
        let mut order = two_item_order();
        let id = order.items[0].item_id.clone();
        assert!(extend_item(&mut order, &id, 5, 1_000).is_err());

        begin_item(&mut order, &id, 1_000).unwrap();
        let event = extend_item(&mut order, &id, 5, 2_000).unwrap();
        match event.payload {
            EventPayload::TimerExtended { estimated_end, .. } => {
                assert_eq!(estimated_end, 1_000 + 30 * MIN + 5 * MIN);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_extend_rejects_non_positive_minutes() {
        let mut order = two_item_order();
        let id = order.items[0].item_id.clone();
        begin_item(&mut order, &id, 1_000).unwrap();
        assert!(extend_item(&mut order, &id, 0, 2_000).is_err());
        assert!(extend_item(&mut order, &id, -3, 2_000).is_err());
    }

    #[test]
    fn test_serve_requires_ready() {
        let mut order = two_item_order();
        assert!(serve(&mut order, 1_000).is_err());

        for id in order
            .items
            .iter()
            .map(|i| i.item_id.clone())
            .collect::<Vec<_>>()
        {
            begin_item(&mut order, &id, 1_000).unwrap();
            complete_item(&mut order, &id, 2_000).unwrap();
        }
        assert_eq!(order.status, OrderStatus::Ready);
        serve(&mut order, 3_000).unwrap();
        assert_eq!(order.status, OrderStatus::Served);
    }

    #[test]
    fn test_closed_order_rejects_everything() {
        let mut order = two_item_order();
        let id = order.items[0].item_id.clone();
        cancel(&mut order, 1_000).unwrap();

        assert!(matches!(
            begin_item(&mut order, &id, 2_000),
            Err(KitchenError::OrderClosed(_))
        ));
        assert!(matches!(
            complete_item(&mut order, &id, 2_000),
            Err(KitchenError::OrderClosed(_))
        ));
        assert!(matches!(
            change_priority(&mut order, "HIGH", 2_000),
            Err(KitchenError::OrderClosed(_))
        ));
        assert!(matches!(
            cancel(&mut order, 2_000),
            Err(KitchenError::OrderClosed(_))
        ));
    }

    #[test]
    fn test_cancel_not_reachable_from_ready() {
        let mut order = Order::confirmed("FAC2", vec![item("Salad", "salad", 5, 1)]);
        let id = order.items[0].item_id.clone();
        begin_item(&mut order, &id, 1_000).unwrap();
        complete_item(&mut order, &id, 2_000).unwrap();
        assert_eq!(order.status, OrderStatus::Ready);

        let err = cancel(&mut order, 3_000).unwrap_err();
        assert!(matches!(err, KitchenError::InvalidTransition(_)));
    }

    #[test]
    fn test_change_priority_keeps_created_at() {
        let mut order = two_item_order();
        let created = order.created_at;

        let event = change_priority(&mut order, "URGENT", 5_000).unwrap();
        assert_eq!(order.priority, OrderPriority::Urgent);
        assert_eq!(order.created_at, created);
        match event.payload {
            EventPayload::PriorityChanged { previous, current } => {
                assert_eq!(previous, OrderPriority::Normal);
                assert_eq!(current, OrderPriority::Urgent);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_change_priority_rejects_unknown_level() {
        let mut order = two_item_order();
        let err = change_priority(&mut order, "ASAP", 1_000).unwrap_err();
        assert!(matches!(err, KitchenError::InvalidPriority(_)));
    }

    #[test]
    fn test_admission_requires_confirmed_pending_order() {
        let order = two_item_order();
        assert!(validate_admission(&order).is_ok());

        let mut served = two_item_order();
        served.status = OrderStatus::Served;
        assert!(validate_admission(&served).is_err());

        let mut started = two_item_order();
        started.items[0].status = ItemStatus::Preparing;
        assert!(validate_admission(&started).is_err());
    }
}
