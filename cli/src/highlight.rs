use colored::Color;

use crate::report::Palette;

/// Colours serialized JSON token by token: member names, string values,
/// numbers and the `true`/`false`/`null` literals each get their own
/// colour. Punctuation and whitespace pass through.
pub fn highlight_json(text: &str, palette: &Palette) -> String {
    if !palette.is_enabled() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() * 2);
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        let len = match ch {
            '"' => {
                let len = string_len(rest);
                let color = if is_member_name(&rest[len..]) {
                    Color::Blue
                } else {
                    Color::Green
                };
                out.push_str(&palette.paint(&rest[..len], color));
                len
            }
            '-' | '0'..='9' => {
                let len = rest
                    .find(|c: char| !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')))
                    .unwrap_or(rest.len());
                out.push_str(&palette.paint(&rest[..len], Color::Cyan));
                len
            }
            't' | 'f' | 'n' => {
                let len = rest
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(rest.len());
                out.push_str(&palette.paint(&rest[..len], Color::Magenta));
                len
            }
            other => {
                out.push(other);
                other.len_utf8()
            }
        };
        rest = &rest[len..];
    }
    out
}

/// Byte length of the string literal at the start of `text`, quotes
/// included.
fn string_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut pos = 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return pos + 1,
            _ => pos += 1,
        }
    }
    text.len()
}

fn is_member_name(after: &str) -> bool {
    after.trim_start().starts_with(':')
}
