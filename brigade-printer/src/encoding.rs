//! Windows-1252 encoding utilities for European thermal printers
//!
//! Most receipt printers sold in Europe ship with code page WPC1252
//! (table 16). This module provides utilities for:
//! - Calculating printed string widths
//! - Truncating/padding strings to a column width
//! - Converting UTF-8 to Windows-1252 while preserving ESC/POS commands

use tracing::instrument;

/// Get the printed width of a string in Windows-1252 columns
///
/// Every encodable character occupies one column; characters outside the
/// code page encode to a single replacement byte and also occupy one.
pub fn text_width(s: &str) -> usize {
    let (cow, _, _) = encoding_rs::WINDOWS_1252.encode(s);
    cow.len()
}

/// Truncate a string to fit within a column width
pub fn truncate_text(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let s_char = c.to_string();
        let (cow, _, _) = encoding_rs::WINDOWS_1252.encode(&s_char);
        let char_len = cow.len();

        if width + char_len > max_width {
            break;
        }
        result.push(c);
        width += char_len;
    }
    result
}

/// Pad a string to a specific column width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_text(s: &str, width: usize, align_right: bool) -> String {
    let current_width = text_width(s);
    if current_width >= width {
        return truncate_text(s, width);
    }
    let spaces = width - current_width;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to Windows-1252
///
/// ASCII bytes (0x00-0x7F) are preserved exactly as is, which protects
/// ESC/POS commands from being corrupted. Only bytes >= 0x80 are treated
/// as UTF-8 sequences and converted to Windows-1252.
///
/// Also handles re-selecting the code page after an INIT command (ESC @),
/// which resets the printer's character table.
#[instrument(skip(bytes))]
pub fn convert_to_cp1252(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + 16);

    // Select code page WPC1252 at the start
    // ESC t 16 (0x1B 0x74 0x10)
    result.extend_from_slice(&[0x1B, 0x74, 0x10]);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        // Check for INIT command (ESC @ = 0x1B 0x40)
        // INIT resets the character table, so re-select the code page
        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            // Flush pending non-ASCII buffer
            flush_buffer(&mut buffer, &mut result);

            // Write INIT
            result.push(0x1B);
            result.push(0x40);

            // Re-select WPC1252
            result.extend_from_slice(&[0x1B, 0x74, 0x10]);

            i += 2;
            continue;
        }

        if b < 128 {
            // ASCII byte (command or ASCII text)
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            // Non-ASCII byte (part of a UTF-8 sequence)
            buffer.push(b);
        }
        i += 1;
    }

    // Flush remaining buffer
    flush_buffer(&mut buffer, &mut result);

    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to Windows-1252
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }

    let s = String::from_utf8_lossy(buffer);
    let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(&s);
    result.extend_from_slice(&encoded);
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("hello"), 5);
        assert_eq!(text_width("crème brûlée"), 12);
        assert_eq!(text_width("A€B"), 3);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello world", 5), "hello");
        assert_eq!(truncate_text("crème", 3), "crè");
    }

    #[test]
    fn test_pad_text() {
        assert_eq!(pad_text("hi", 5, false), "hi   ");
        assert_eq!(pad_text("hi", 5, true), "   hi");
        assert_eq!(pad_text("hello world", 5, false), "hello");
    }

    #[test]
    fn test_convert_preserves_commands() {
        // Bold on + accented text + bold off
        let mut input = vec![0x1B, 0x45, 0x01];
        input.extend_from_slice("crème".as_bytes());
        input.extend_from_slice(&[0x1B, 0x45, 0x00]);

        let out = convert_to_cp1252(&input);

        // Starts with code page selection
        assert_eq!(&out[..3], &[0x1B, 0x74, 0x10]);
        // Bold commands survive untouched
        assert!(out.windows(3).any(|w| w == [0x1B, 0x45, 0x01]));
        assert!(out.windows(3).any(|w| w == [0x1B, 0x45, 0x00]));
        // "è" became a single 1252 byte (0xE8)
        assert!(out.contains(&0xE8));
    }

    #[test]
    fn test_convert_reselects_code_page_after_init() {
        let input = vec![0x1B, 0x40, b'A'];
        let out = convert_to_cp1252(&input);
        // code page, INIT, code page again, then text
        assert_eq!(
            out,
            vec![0x1B, 0x74, 0x10, 0x1B, 0x40, 0x1B, 0x74, 0x10, b'A']
        );
    }
}
