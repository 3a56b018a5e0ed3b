//! Helvetica advance widths and width-aware word wrapping.
//!
//! Widths are the standard Type 1 metrics in 1/1000 em. The same functions
//! measure blocks for pagination and break the lines that get drawn, so a
//! measured height always matches the drawn height.

use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;

/// The three standard faces the PDF writer embeds by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
}

impl FontFace {
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Oblique => "Helvetica-Oblique",
        }
    }

    /// Resource name inside page content streams.
    pub fn resource(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Oblique => "F3",
        }
    }
}

// ASCII 32..=126.
const REGULAR: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_units(face: FontFace, ch: char) -> u16 {
    let table = match face {
        FontFace::Bold => &BOLD,
        FontFace::Regular | FontFace::Oblique => &REGULAR,
    };
    let bold = face == FontFace::Bold;
    match ch {
        ' '..='~' => table[ch as usize - 32],
        '\u{2014}' | '\u{2026}' => 1000,
        '\u{2013}' => 556,
        '\u{2018}' | '\u{2019}' => {
            if bold {
                278
            } else {
                222
            }
        }
        '\u{201C}' | '\u{201D}' => {
            if bold {
                500
            } else {
                333
            }
        }
        '\u{2022}' => 350,
        _ => 556,
    }
}

/// Width of `text` in points.
pub fn text_width(face: FontFace, size: f32, text: &str) -> f32 {
    let units: u32 = text.chars().map(|c| char_units(face, c) as u32).sum();
    units as f32 * size / 1000.0
}

#[derive(Debug)]
struct MeasuredWord {
    text: String,
    width: f64,
    space: f64,
}

impl Fragment for MeasuredWord {
    fn width(&self) -> f64 {
        self.width
    }

    fn whitespace_width(&self) -> f64 {
        self.space
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Break a word wider than `max_width` into pieces that fit.
fn split_oversized(word: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;
    for ch in word.chars() {
        let w = char_units(face, ch) as f32 * size / 1000.0;
        if current_width + w > max_width && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        current.push(ch);
        current_width += w;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Wrap `text` to `max_width` points. Explicit newlines are kept; an empty
/// paragraph yields an empty line.
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let space = text_width(face, size, " ") as f64;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<MeasuredWord> = paragraph
            .split_whitespace()
            .flat_map(|w| {
                if text_width(face, size, w) > max_width {
                    split_oversized(w, face, size, max_width)
                } else {
                    vec![w.to_string()]
                }
            })
            .map(|w| MeasuredWord {
                width: text_width(face, size, &w) as f64,
                space,
                text: w,
            })
            .collect();

        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        for line in wrap_first_fit(&words, &[max_width as f64]) {
            let joined: Vec<&str> = line.iter().map(|w| w.text.as_str()).collect();
            lines.push(joined.join(" "));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_known_widths() {
        assert!((text_width(FontFace::Regular, 10.0, "A") - 6.67).abs() < 1e-4);
        assert!((text_width(FontFace::Bold, 10.0, "A") - 7.22).abs() < 1e-4);
        assert_eq!(
            text_width(FontFace::Oblique, 12.0, "hello"),
            text_width(FontFace::Regular, 12.0, "hello")
        );
    }

    #[test]
    fn wrapped_lines_fit_the_width() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
        let lines = wrap_text(&text, FontFace::Regular, 10.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(FontFace::Regular, 10.0, line) <= 200.0, "{line}");
        }
    }

    #[test]
    fn keeps_explicit_newlines() {
        let lines = wrap_text("Line1\nLine2\n\nLine4", FontFace::Regular, 10.0, 400.0);
        assert_eq!(lines, vec!["Line1", "Line2", "", "Line4"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_text("", FontFace::Bold, 10.0, 100.0), vec![String::new()]);
    }

    #[test]
    fn oversized_words_are_split() {
        let word = "W".repeat(100);
        let lines = wrap_text(&word, FontFace::Regular, 10.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(FontFace::Regular, 10.0, line) <= 100.0);
        }
    }
}
