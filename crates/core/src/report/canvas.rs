//! Drawing surface that records PDF content-stream operations.

use lopdf::content::{Content, Operation};
use lopdf::Object;

use super::ReportError;

/// Fonts available on every report page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// Resource name the font is registered under in page resources.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }
}

/// Default distance between baselines of consecutive lines.
pub const LINE_LEADING: f32 = 10.0;

/// Records text and line drawing in PDF user space (origin bottom-left).
#[derive(Debug, Default)]
pub struct Canvas {
    operations: Vec<Operation>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw one line of text with its baseline at `(x, y)`.
    pub fn text(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.resource_name().into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Draw consecutive lines downwards starting at baseline `y`.
    pub fn lines(&mut self, font: Font, size: f32, x: f32, y: f32, leading: f32, lines: &[String]) {
        let mut baseline = y;
        for line in lines {
            self.text(font, size, x, baseline, line);
            baseline -= leading;
        }
    }

    /// Stroke a straight segment.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.operations.extend([
            Operation::new("m", vec![x1.into(), y1.into()]),
            Operation::new("l", vec![x2.into(), y2.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    /// Stroke a rectangle whose lower-left corner is `(x, y)`.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.operations.extend([
            Operation::new("re", vec![x.into(), y.into(), width.into(), height.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    pub fn line_width(&mut self, width: f32) {
        self.operations.push(Operation::new("w", vec![width.into()]));
    }

    /// Draw the form XObject registered as `name` over the whole page.
    pub fn form(&mut self, name: &str) {
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new("Do", vec![name.into()]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Append everything recorded on `other` after this canvas's operations.
    pub fn append(&mut self, other: Canvas) {
        self.operations.extend(other.operations);
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Serialize the recorded operations as a content stream.
    pub fn encode(self) -> Result<Vec<u8>, ReportError> {
        Ok(Content {
            operations: self.operations,
        }
        .encode()?)
    }
}

/// Encode text for the standard 14 fonts with `WinAnsiEncoding`.
///
/// Latin-1 maps directly; a few common typographic characters are mapped to
/// their WinAnsi slots; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2026}' => 0x85,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{20AC}' => 0x80,
            '\t' | '\n' | '\r' => b' ',
            c if (c as u32) >= 0x20 && (c as u32) <= 0xFF && !(0x7F..0xA0).contains(&(c as u32)) => {
                c as u32 as u8
            }
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_passes_through() {
        assert_eq!(encode_win_ansi("Mañana"), b"Ma\xF1ana".to_vec());
        assert_eq!(encode_win_ansi("Exposición"), b"Exposici\xF3n".to_vec());
    }

    #[test]
    fn unsupported_characters_become_question_marks() {
        assert_eq!(encode_win_ansi("a\u{4E2D}b"), b"a?b".to_vec());
        assert_eq!(encode_win_ansi("x\u{2026}"), vec![b'x', 0x85]);
    }

    #[test]
    fn empty_text_records_nothing() {
        let mut canvas = Canvas::new();
        canvas.text(Font::Regular, 8.0, 0.0, 0.0, "");
        assert!(canvas.is_empty());
    }

    #[test]
    fn encodes_text_operators() {
        let mut canvas = Canvas::new();
        canvas.text(Font::Bold, 10.0, 40.0, 500.0, "Hola");
        let bytes = canvas.encode().unwrap();
        let stream = String::from_utf8_lossy(&bytes);
        assert!(stream.contains("/F2"));
        assert!(stream.contains("(Hola)"));
        assert!(stream.contains("Tj"));
    }
}
