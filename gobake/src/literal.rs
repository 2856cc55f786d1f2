//! Formatting of raw bytes as Go string literals.

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Formats `value` as a Go string literal expression.
///
/// Every byte is written as a `\xHH` escape, so the literal is valid for any
/// payload regardless of encoding. When `wrap` is non-zero and the payload is
/// longer than `wrap` bytes, the literal is split into chunks of `wrap` bytes
/// joined with `+`, each chunk after the first on its own line indented by
/// `indent` tabs.
///
/// A non-empty `type_name` other than `string` wraps the whole expression in a
/// conversion, e.g. `[]byte("...")`.
///
/// The returned expression has no trailing newline.
#[must_use]
pub fn format_value(value: &[u8], wrap: usize, indent: usize, type_name: &str) -> String {
    let type_name = if type_name == "string" { "" } else { type_name };

    // 4 bytes per escape, plus quotes, separators and indentation per chunk.
    let chunk_count = if wrap == 0 { 1 } else { value.len() / wrap + 1 };
    let mut s = String::with_capacity(
        value.len() * 4 + chunk_count * (indent + 5) + type_name.len() + 2,
    );

    if !type_name.is_empty() {
        s.push_str(type_name);
        s.push('(');
    }

    if value.is_empty() {
        s.push_str("\"\"");
    } else {
        // The first chunk stays on the declaration's line; there is no
        // leading empty literal.
        let width = if wrap == 0 { value.len() } else { wrap };
        for (i, chunk) in value.chunks(width).enumerate() {
            if i > 0 {
                s.push_str(" +\n");
                for _ in 0..indent {
                    s.push('\t');
                }
            }
            s.push('"');
            for &b in chunk {
                s.push_str("\\x");
                s.push(HEX_DIGITS[usize::from(b >> 4)] as char);
                s.push(HEX_DIGITS[usize::from(b & 0x0f)] as char);
            }
            s.push('"');
        }
    }

    if !type_name.is_empty() {
        s.push(')');
    }
    s
}
