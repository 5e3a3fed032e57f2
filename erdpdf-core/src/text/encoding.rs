//! WinAnsi (CP1252) encoding for standard-font text strings.

/// Encodes text to Windows-1252 bytes. Characters with no CP1252 code point
/// become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> u8 {
    match ch as u32 {
        0x00..=0x7F | 0xA0..=0xFF => ch as u8,
        0x20AC => 0x80, // Euro sign
        0x201A => 0x82, // Single low quotation mark
        0x201E => 0x84, // Double low quotation mark
        0x2026 => 0x85, // Horizontal ellipsis
        0x2020 => 0x86, // Dagger
        0x2021 => 0x87, // Double dagger
        0x2030 => 0x89, // Per mille sign
        0x2039 => 0x8B, // Single left angle quotation mark
        0x2018 => 0x91, // Left single quotation mark
        0x2019 => 0x92, // Right single quotation mark
        0x201C => 0x93, // Left double quotation mark
        0x201D => 0x94, // Right double quotation mark
        0x2022 => 0x95, // Bullet
        0x2013 => 0x96, // En dash
        0x2014 => 0x97, // Em dash
        0x2122 => 0x99, // Trade mark sign
        0x203A => 0x9B, // Single right angle quotation mark
        _ => b'?',
    }
}

/// Writes `bytes` as a PDF literal string, escaping delimiters and using
/// octal escapes outside printable ASCII.
pub fn write_literal(out: &mut String, bytes: &[u8]) {
    out.push('(');
    for &byte in bytes {
        match byte {
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7E => out.push(byte as char),
            _ => out.push_str(&format!("\\{byte:03o}")),
        }
    }
    out.push(')');
}
