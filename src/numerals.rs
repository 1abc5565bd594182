//! Score numeral layout: split a score into digits and centre the row of
//! glyphs horizontally at a fixed height.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedDigit {
    pub digit: u8,
    pub x: i32,
    pub y: i32,
}

pub fn digits(score: u32) -> Vec<u8> {
    score
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect()
}

/// Positions for each digit of `score`, all glyphs `glyph_width` wide.
pub fn layout(score: u32, field_width: u32, glyph_width: u32, top: i32) -> Vec<PlacedDigit> {
    let digits = digits(score);
    let total = (digits.len() as u32 * glyph_width) as i32;
    let left = field_width as i32 / 2 - total / 2;

    digits
        .into_iter()
        .enumerate()
        .map(|(i, digit)| PlacedDigit {
            digit,
            x: left + i as i32 * glyph_width as i32,
            y: top,
        })
        .collect()
}
