//! Pointer text rendering

use tracing::debug;

use super::{Base, MemoryPointer};
use crate::config::{FormatOptions, OffsetPrinting};

/// `i32::MAX + |i32::MIN|` evaluated with 32-bit wraparound, i.e. -1
const INT32_WRAPAROUND: i64 = i32::MAX.wrapping_add(i32::MIN.wrapping_abs()) as i64;

/// Format `value` as uppercase hex zero-padded to `address_size * 2` digits
pub fn to_hexadecimal(value: u64, address_size: usize, prefix: bool) -> String {
    let width = address_size * 2;
    if prefix {
        format!("0x{:0width$X}", value, width = width)
    } else {
        format!("{:0width$X}", value, width = width)
    }
}

/// Magnitude shown after `-` for a negative offset in signed mode.
///
/// Mirrors 32-bit int arithmetic: with the wrapped constant this is the
/// two's complement negation of `offset`.
fn signed_display_magnitude(offset: i64) -> u64 {
    INT32_WRAPAROUND.wrapping_sub(offset).wrapping_add(1) as u64
}

impl MemoryPointer {
    /// Render as `[[base] + off1] - off2` with hex numbers `address_size` bytes wide
    pub fn format(&self, signed_offsets: bool, address_size: usize) -> String {
        // base + "] " + per offset "- " + digits + "] "
        let mut text = String::with_capacity((self.depth() + 1) * (address_size * 2 + 5));

        for _ in &self.offsets {
            text.push('[');
        }

        match &self.base {
            Base::Absolute(address) => {
                text.push_str(&to_hexadecimal(*address, address_size, false));
            }
            Base::ModuleRelative { name, .. } => text.push_str(name),
        }
        text.push_str("] ");

        let last = self.offsets.len().saturating_sub(1);
        for (index, &offset) in self.offsets.iter().enumerate() {
            let magnitude = if offset < 0 && signed_offsets {
                text.push('-');
                signed_display_magnitude(offset)
            } else {
                text.push('+');
                offset as u64
            };

            text.push(' ');
            text.push_str(&to_hexadecimal(magnitude, address_size, false));

            if index != last {
                text.push_str("] ");
            }
        }

        text.truncate(text.trim_end().len());
        text
    }

    pub fn format_with(&self, options: &FormatOptions) -> String {
        self.format(options.offset_printing.is_signed(), options.address_size)
    }
}

/// Render one pointer per line, in order
pub fn format_list(
    pointers: &[MemoryPointer],
    address_size: usize,
    offset_printing: OffsetPrinting,
) -> String {
    let signed = offset_printing.is_signed();
    let text = pointers
        .iter()
        .map(|pointer| pointer.format(signed, address_size))
        .collect::<Vec<_>>()
        .join("\n");

    debug!(
        "Formatted {} pointers ({}, {} byte addresses)",
        pointers.len(),
        offset_printing,
        address_size
    );
    text.trim().to_string()
}
