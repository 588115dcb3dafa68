//! # brigade-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Windows-1252 encoding for European receipt printers
//! - Network printing (TCP port 9100)
//!
//! Business logic (WHAT to print) should stay in application code:
//! - Kitchen ticket rendering → brigade-server
//!
//! ## Example
//!
//! ```ignore
//! use brigade_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! // Build ESC/POS content
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.double_size();
//! builder.line("GRILL");
//! builder.reset_size();
//! builder.sep_double();
//! builder.left();
//! builder.line("2x Kebab");
//! builder.cut();
//!
//! // Send to network printer
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{convert_to_cp1252, pad_text, text_width, truncate_text};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{NetworkPrinter, Printer};
