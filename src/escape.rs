//! C-style escape codec for quoted PO string payloads.
//!
//! [`unescape`] turns the raw text between the quotes into its value;
//! [`escape`] produces the raw text for a value. For every value `s`,
//! `unescape(&escape(s)) == Ok(s)`, and for every raw text `r` produced by
//! [`escape`], `escape(&unescape(r)?) == r`.

const HEX_DIGITS: [u8; 16] = *b"0123456789abcdef";

/// Escapes a value so it can be placed between the quotes of a PO string.
///
/// Only backslash, double quote and the C0 control characters are escaped;
/// controls without a named escape are written as `\xHH`.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{1b}' => out.push_str("\\e"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if (c as u32) < 0x20 => {
                let b = c as u8;
                out.push_str("\\x");
                out.push(HEX_DIGITS[(b >> 4) as usize] as char);
                out.push(HEX_DIGITS[(b & 0xf) as usize] as char);
            }
            c => out.push(c),
        }
    }

    out
}

/// Resolves every escape sequence in a raw quoted payload.
///
/// Returns a short reason when the payload holds an unknown or truncated
/// escape sequence.
pub fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(code) = chars.next() else {
            return Err("dangling backslash".to_string());
        };

        let resolved = match code {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'e' => '\u{1b}',
            'f' => '\u{0c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0b}',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            '?' => '?',
            'x' => {
                let mut byte = 0u32;
                for _ in 0..2 {
                    let digit = chars
                        .next_if(char::is_ascii_hexdigit)
                        .and_then(|d| d.to_digit(16))
                        .ok_or_else(|| "`\\x` must be followed by two hex digits".to_string())?;
                    byte = byte * 16 + digit;
                }
                byte_to_char(byte)
            }
            '0'..='7' => {
                let mut byte = code.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    let digit = chars
                        .next_if(|d| ('0'..='7').contains(d))
                        .and_then(|d| d.to_digit(8))
                        .ok_or_else(|| "octal escapes must have three digits".to_string())?;
                    byte = byte * 8 + digit;
                }
                byte_to_char(byte)
            }
            other => return Err(format!("invalid escape sequence `\\{other}`")),
        };

        out.push(resolved);
    }

    Ok(out)
}

// Escaped bytes are at most 0o377, so they always land in Latin-1.
fn byte_to_char(byte: u32) -> char {
    debug_assert!(byte <= 0xff);
    char::from_u32(byte).unwrap_or(char::REPLACEMENT_CHARACTER)
}
