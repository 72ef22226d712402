//! Page model for generated reports: A4 pages of draw operations in millimetres, origin at
//! the top-left corner. Text `y` is the baseline.

use super::metrics::{text_width_mm, Font};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#rrggbb`; anything else is black.
    pub fn from_hex(hex: &str) -> Self {
        let digits = hex.trim_start_matches('#');
        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .unwrap_or(0)
        };
        if digits.len() != 6 {
            return Rgb(0, 0, 0);
        }
        Rgb(channel(0), channel(2), channel(4))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        color: Rgb,
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
    /// Filled rectangle, corners rounded by `radius` when non-zero.
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        fill: Rgb,
    },
    /// Stroked circle.
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        width: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Accumulates pages while a layout is built; drawing always targets the last page.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pages: Vec<Page>,
    size: f32,
    font: Font,
    color: Rgb,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            size: 10.0,
            font: Font::Regular,
            color: Rgb(0, 0, 0),
        }
    }

    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
    }

    pub fn set_font(&mut self, size: f32, font: Font) {
        self.size = size;
        self.font = font;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    pub fn text(&mut self, text: impl Into<String>, x: f32, y: f32) {
        let op = DrawOp::Text {
            x,
            y,
            size: self.size,
            font: self.font,
            color: self.color,
            text: text.into(),
        };
        self.push(op);
    }

    pub fn centered_text(&mut self, text: &str, center_x: f32, y: f32) {
        let width = text_width_mm(text, self.size, self.font);
        self.text(text, center_x - width / 2.0, y);
    }

    /// One baseline every `line_height` mm starting at `y`.
    pub fn lines(&mut self, lines: &[String], x: f32, y: f32, line_height: f32) {
        for (i, line) in lines.iter().enumerate() {
            self.text(line.clone(), x, y + i as f32 * line_height);
        }
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Rgb) {
        self.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        });
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, fill: Rgb) {
        self.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            radius,
            fill,
        });
    }

    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, width: f32, color: Rgb) {
        self.push(DrawOp::Circle {
            cx,
            cy,
            r,
            width,
            color,
        });
    }

    /// Greedy word wrap at the current font.
    pub fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        wrap_text(text, max_width, self.size, self.font)
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

fn split_long_word(word: &str, max_width: f32, size: f32, font: Font) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if text_width_mm(&current, size, font) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Splits `text` into lines no wider than `max_width` mm. Explicit newlines are kept;
/// a word wider than a whole line is broken between characters.
pub fn wrap_text(text: &str, max_width: f32, size: f32, font: Font) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width_mm(&candidate, size, font) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width_mm(word, size, font) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = split_long_word(word, max_width, size, font);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let text = "Votre CV montre un bon potentiel mais pourrait être amélioré avec davantage de réalisations chiffrées";
        let lines = wrap_text(text, 60.0, 10.0, Font::Regular);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 10.0, Font::Regular) <= 60.0);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap_text("Bonjour", 170.0, 10.0, Font::Regular), vec!["Bonjour"]);
        assert_eq!(wrap_text("", 170.0, 10.0, Font::Regular), vec![""]);
    }

    #[test]
    fn test_long_word_is_split() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, 20.0, 10.0, Font::Regular);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(Rgb::from_hex("#10b981"), Rgb(16, 185, 129));
        assert_eq!(Rgb::from_hex("bad"), Rgb(0, 0, 0));
    }

    #[test]
    fn test_centered_text() {
        let mut canvas = Canvas::new();
        canvas.set_font(20.0, Font::Regular);
        canvas.centered_text("ABC", 105.0, 20.0);
        canvas.add_page();

        let pages = canvas.into_pages();
        assert_eq!(pages.len(), 2);
        match &pages[0].ops[0] {
            DrawOp::Text { x, .. } => {
                let width = text_width_mm("ABC", 20.0, Font::Regular);
                assert!((x + width / 2.0 - 105.0).abs() < 1e-3);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }
}
