/// Turns a Unicode title into the single-byte character set stored in title cells.
pub trait TitleEncoder {
    /// Must never emit a zero byte, the allocator appends the terminator itself.
    fn encode_title(&self, title: &str) -> Vec<u8>;
}

const HALF_WIDTH_KATAKANA_OFFSET: u32 = 0xfec0;
const FULL_WIDTH_ASCII_OFFSET: u32 = 0xfee0;

/// Half-width (JIS X 0201) encoder: ASCII plus half-width katakana, with full-width forms
/// folded down and anything else replaced by a space.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalfWidthEncoder;

impl TitleEncoder for HalfWidthEncoder {
    fn encode_title(&self, title: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(title.len());

        for c in title.chars() {
            match c {
                ' '..='~' => out.push(c as u8),
                '\u{ff01}'..='\u{ff5e}' => out.push((c as u32 - FULL_WIDTH_ASCII_OFFSET) as u8),
                '\u{ff61}'..='\u{ff9f}' => out.push((c as u32 - HALF_WIDTH_KATAKANA_OFFSET) as u8),
                '\u{3000}' => out.push(b' '),
                '\u{2018}' | '\u{2019}' | '\u{2032}' => out.push(b'\''),
                '\u{201c}' | '\u{201d}' | '\u{2033}' => out.push(b'"'),
                '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push(b'-'),
                '\u{2026}' => out.extend_from_slice(b"..."),
                _ => out.push(b' '),
            }
        }

        out
    }
}

/// Renders stored title bytes for display.
pub fn decode_half_width(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x20..=0x7e => b as char,
            0xa1..=0xdf => char::from_u32(b as u32 + HALF_WIDTH_KATAKANA_OFFSET).unwrap_or('?'),
            _ => '?',
        })
        .collect()
}
