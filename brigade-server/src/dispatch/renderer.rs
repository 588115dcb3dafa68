//! Kitchen ticket renderer
//!
//! Renders Ticket data into ESC/POS format for thermal printers.

use crate::kitchen::{Ticket, TicketItem, TicketKind};
use brigade_printer::EscPosBuilder;
use shared::kitchen::OrderPriority;

/// Kitchen ticket renderer
///
/// Renders station and consolidated tickets for thermal printers.
pub struct TicketRenderer {
    width: usize,
}

impl TicketRenderer {
    /// Create a new renderer with specified paper width
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Render a ticket to ESC/POS bytes
    pub fn render(&self, ticket: &Ticket, print_count: u32) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        self.render_header(&mut b, ticket);

        for item in &ticket.items {
            self.render_item(&mut b, item);
        }

        self.render_footer(&mut b, print_count);

        b.build()
    }

    /// Render the header section
    fn render_header(&self, b: &mut EscPosBuilder, ticket: &Ticket) {
        // Station banner (large, centered)
        b.center();
        b.double_size();
        b.bold();

        let title = match ticket.kind {
            TicketKind::Station { station } => station.as_str().to_ascii_uppercase(),
            TicketKind::Consolidated => "KITCHEN".to_string(),
        };
        b.line(&title);

        b.bold_off();
        b.reset_size();

        b.line(&ticket.order_number);
        if let Some(ref table) = ticket.table_name {
            b.line(&format!("Table {}", table));
        }

        // Priority flag for orders the queue sorts ahead
        if ticket.priority >= OrderPriority::High {
            b.bold();
            b.line(&format!("*** {} ***", ticket.priority));
            b.bold_off();
        }

        b.line(&format_timestamp(ticket.created_at));

        b.left();
        b.sep_double();
    }

    /// Render a single item line
    fn render_item(&self, b: &mut EscPosBuilder, item: &TicketItem) {
        let line = format!("{}x {}", item.quantity, item.name);
        let prep = format!("{}m", item.prep_minutes);

        b.double_height();
        b.line_lr(&line, &prep);
        b.reset_size();

        if let Some(ref note) = item.note
            && !note.is_empty()
        {
            b.bold();
            b.line(&format!("   * {}", note));
            b.bold_off();
        }
    }

    /// Render the footer section
    fn render_footer(&self, b: &mut EscPosBuilder, print_count: u32) {
        b.sep_single();

        if print_count > 0 {
            b.center();
            b.bold();
            b.line(&format!("*** REPRINT #{} ***", print_count));
            b.bold_off();
            b.left();
        }

        b.cut_feed(3);
    }
}

impl Default for TicketRenderer {
    fn default() -> Self {
        Self::new(48)
    }
}

/// Format unix timestamp (millis) to readable string (MM-DD HH:mm)
fn format_timestamp(ts: i64) -> String {
    if let Some(dt) = chrono::DateTime::from_timestamp_millis(ts) {
        dt.with_timezone(&chrono::Local)
            .format("%m-%d %H:%M")
            .to_string()
    } else {
        "time unknown".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::ticket::split;
    use shared::kitchen::{MenuItemRef, Order, OrderItem, OrderPriority};

    fn test_order() -> Order {
        let mut order = Order::confirmed(
            "FAC20260801",
            vec![
                OrderItem::new(
                    MenuItemRef {
                        name: "Kebab".to_string(),
                        category: "kebab".to_string(),
                        prep_minutes: 15,
                    },
                    2,
                )
                .with_note("no onions"),
                OrderItem::new(
                    MenuItemRef {
                        name: "Salad".to_string(),
                        category: "salad".to_string(),
                        prep_minutes: 5,
                    },
                    1,
                ),
            ],
        );
        order.table_name = Some("12".to_string());
        order.priority = OrderPriority::Urgent;
        order
    }

    #[test]
    fn test_render_station_ticket() {
        let order = test_order();
        let tickets = split(&order);
        let renderer = TicketRenderer::new(48);

        let data = renderer.render(&tickets[0], 0);
        assert!(!data.is_empty());

        let text = String::from_utf8_lossy(&data);
        assert!(text.contains("GRILL"));
        assert!(text.contains("2x Kebab"));
        assert!(text.contains("* no onions"));
        assert!(text.contains("URGENT"));
    }

    #[test]
    fn test_render_consolidated_ticket_covers_all_items() {
        let order = test_order();
        let tickets = split(&order);
        let consolidated = tickets.last().unwrap();
        let renderer = TicketRenderer::new(48);

        let text = String::from_utf8_lossy(&renderer.render(consolidated, 0)).to_string();
        assert!(text.contains("KITCHEN"));
        assert!(text.contains("Kebab"));
        assert!(text.contains("Salad"));
    }

    #[test]
    fn test_reprint_marker() {
        let order = test_order();
        let tickets = split(&order);
        let renderer = TicketRenderer::new(48);

        let text = String::from_utf8_lossy(&renderer.render(&tickets[0], 2)).to_string();
        assert!(text.contains("REPRINT #2"));
    }
}
