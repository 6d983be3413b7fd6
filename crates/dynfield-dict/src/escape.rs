//! Escaping of field values for quoted textual output.

/// Colour control bytes 0x01..=0x0E map onto `\c0`..`\c9`; the gaps are
/// `\b`, `\t`, `\n` and `\r`, which have their own escapes or none.
const COLOR_REMAP: [u8; 15] = [0, 0, 1, 2, 3, 4, 5, 6, 0, 0, 0, 7, 8, 0, 9];

/// Escape `src` so it can sit between double quotes.
///
/// Quotes, backslashes and `\r`/`\n`/`\t` get backslash escapes. Colour
/// control bytes become `\cN` (or `\cr`, `\cp`, `\co` for 0x0F..=0x11) and
/// any other control byte becomes `\xHH`.
pub fn expand_escape(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    expand_escape_into(&mut out, src);
    out
}

/// Append the escaped form of `src` to `dest`.
pub fn expand_escape_into(dest: &mut String, src: &str) {
    for c in src.chars() {
        match c {
            '"' => dest.push_str("\\\""),
            '\\' => dest.push_str("\\\\"),
            '\'' => dest.push_str("\\'"),
            '\r' => dest.push_str("\\r"),
            '\n' => dest.push_str("\\n"),
            '\t' => dest.push_str("\\t"),
            '\x01'..='\x07' | '\x0b' | '\x0c' | '\x0e' => {
                dest.push_str("\\c");
                dest.push(char::from(b'0' + COLOR_REMAP[c as usize]));
            }
            '\x0f' => dest.push_str("\\cr"),
            '\x10' => dest.push_str("\\cp"),
            '\x11' => dest.push_str("\\co"),
            c if (c as u32) < 0x20 => {
                dest.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => dest.push(c),
        }
    }
}
