//! Helvetica glyph widths (standard AFM metrics, 1/1000 em) and WinAnsi encoding.

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const BOLD_ASCII_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

fn ascii_width(c: char, font: Font) -> u16 {
    let index = c as usize - 0x20;
    match font {
        Font::Regular => ASCII_WIDTHS[index],
        Font::Bold => BOLD_ASCII_WIDTHS[index],
    }
}

fn glyph_width(c: char, font: Font) -> u16 {
    if (' '..='~').contains(&c) {
        return ascii_width(c, font);
    }
    let bold = font == Font::Bold;
    match c {
        'À'..='Å' | 'È'..='Ë' => 667,
        'Ç' | 'Ñ' | 'Ù'..='Ü' => 722,
        'Ò'..='Ö' => 778,
        'Ì'..='Ï' | 'ì'..='ï' => 278,
        'Æ' | '—' => 1000,
        'æ' => 889,
        'ç' | 'ÿ' if !bold => 500,
        'ç' | 'ÿ' => 556,
        'à'..='å' | 'è'..='ë' | 'ñ' | 'ò'..='ö' | 'ù'..='ü' if bold => 611,
        'à'..='å' | 'è'..='ë' | 'ñ' | 'ò'..='ö' | 'ù'..='ü' => 556,
        '•' => 350,
        '©' => 737,
        '°' => 400,
        '‘' | '’' if bold => 278,
        '‘' | '’' => 222,
        '“' | '”' if bold => 500,
        '“' | '”' => 333,
        '…' => 1000,
        _ => 556,
    }
}

/// Width of `text` in millimetres at `size` points.
pub fn text_width_mm(text: &str, size: f32, font: Font) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c, font) as u32).sum();
    units as f32 / 1000.0 * size * MM_PER_PT
}

/// Single-byte WinAnsi form of `text`; characters outside the encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‚' => 0x82,
            '…' => 0x85,
            'Œ' => 0x8C,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            'œ' => 0x9C,
            ' '..='~' | '\u{A0}'..='\u{FF}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_scales_with_size() {
        let small = text_width_mm("Career", 10.0, Font::Regular);
        let large = text_width_mm("Career", 20.0, Font::Regular);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_known_widths() {
        // 'W' = 944 units, 'i' = 222 units
        let w = text_width_mm("W", 1000.0 / MM_PER_PT / 1000.0, Font::Regular);
        assert!((w - 0.944).abs() < 1e-3);
        assert!(text_width_mm("i", 10.0, Font::Regular) < text_width_mm("m", 10.0, Font::Regular));
        assert!(text_width_mm("é", 10.0, Font::Regular) == text_width_mm("e", 10.0, Font::Regular));
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("É•"), vec![0xC9, 0x95]);
        assert_eq!(encode_win_ansi("a漢"), vec![b'a', b'?']);
    }
}
