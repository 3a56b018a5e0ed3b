//! Minimal PDF 1.4 serializer for a [`DocumentLayout`].
//!
//! Only what the layout emits is supported: filled rectangles, horizontal
//! rules and single-line text in the three standard Helvetica faces with
//! WinAnsi encoding. Content streams are left uncompressed.

use std::io::Write;

use super::layout::{DocumentLayout, DrawOp};
use super::metrics::FontFace;

const FACES: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Oblique];

// Fixed object numbers; pages follow in (page, contents) pairs.
const CATALOG_OBJ: usize = 1;
const PAGES_OBJ: usize = 2;
const FIRST_FONT_OBJ: usize = 3;
const INFO_OBJ: usize = 6;
const FIRST_PAGE_OBJ: usize = 7;

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new(object_count: usize) -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: vec![0; object_count + 1],
        }
    }

    fn object(&mut self, number: usize, body: &[u8]) {
        self.offsets[number] = self.buf.len();
        let _ = write!(self.buf, "{number} 0 obj\n");
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, number: usize, content: &[u8]) {
        let mut body = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(b"\nendstream");
        self.object(number, &body);
    }

    fn finish(mut self, root: usize, info: usize) -> Vec<u8> {
        let xref = self.buf.len();
        let size = self.offsets.len();
        let _ = write!(self.buf, "xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets[1..] {
            let _ = write!(self.buf, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            self.buf,
            "trailer\n<< /Size {size} /Root {root} 0 R /Info {info} 0 R >>\nstartxref\n{xref}\n%%EOF\n"
        );
        self.buf
    }
}

/// Map a char to its WinAnsi byte, `?` when it has none.
fn win_ansi(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\t' => b' ',
        '\u{A0}'..='\u{FF}' => ch as u32 as u8,
        '\u{2026}' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        _ => b'?',
    }
}

/// Literal string body, escaped and kept 7-bit.
fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match win_ansi(ch) {
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            b if b >= 0x80 => out.push_str(&format!("\\{b:03o}")),
            b => out.push(b as char),
        }
    }
    out
}

fn page_content(layout: &DocumentLayout, ops: &[DrawOp]) -> Vec<u8> {
    let height = layout.geometry.height;
    let mut out = Vec::new();
    for op in ops {
        let _ = match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height: h,
                fill,
            } => {
                let (r, g, b) = fill.unit();
                writeln!(
                    out,
                    "{r:.3} {g:.3} {b:.3} rg {x:.2} {:.2} {width:.2} {h:.2} re f",
                    height - y - h
                )
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                thickness,
                color,
            } => {
                let (r, g, b) = color.unit();
                let py = height - y;
                writeln!(
                    out,
                    "{r:.3} {g:.3} {b:.3} RG {thickness:.2} w {x1:.2} {py:.2} m {x2:.2} {py:.2} l S"
                )
            }
            DrawOp::Text {
                x,
                y,
                text,
                face,
                size,
                color,
            } => {
                let (r, g, b) = color.unit();
                writeln!(
                    out,
                    "BT /{} {size:.1} Tf {r:.3} {g:.3} {b:.3} rg {x:.2} {:.2} Td ({}) Tj ET",
                    face.resource(),
                    height - y,
                    encode_text(text)
                )
            }
        };
    }
    out
}

/// Serialize a layout to PDF bytes.
pub fn write_pdf(layout: &DocumentLayout, title: &str) -> Vec<u8> {
    let page_count = layout.pages.len();
    let object_count = FIRST_PAGE_OBJ - 1 + page_count * 2;
    let mut w = PdfWriter::new(object_count);

    w.object(
        CATALOG_OBJ,
        format!("<< /Type /Catalog /Pages {PAGES_OBJ} 0 R >>").as_bytes(),
    );

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", FIRST_PAGE_OBJ + i * 2))
        .collect();
    w.object(
        PAGES_OBJ,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {page_count} >>",
            kids.join(" ")
        )
        .as_bytes(),
    );

    for (i, face) in FACES.iter().enumerate() {
        w.object(
            FIRST_FONT_OBJ + i,
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                face.base_font()
            )
            .as_bytes(),
        );
    }

    w.object(
        INFO_OBJ,
        format!(
            "<< /Title ({}) /Producer (vsg-assessment) >>",
            encode_text(title)
        )
        .as_bytes(),
    );

    let fonts: Vec<String> = FACES
        .iter()
        .enumerate()
        .map(|(i, face)| format!("/{} {} 0 R", face.resource(), FIRST_FONT_OBJ + i))
        .collect();
    let g = layout.geometry;
    for (i, page) in layout.pages.iter().enumerate() {
        let page_obj = FIRST_PAGE_OBJ + i * 2;
        let content_obj = page_obj + 1;
        w.object(
            page_obj,
            format!(
                "<< /Type /Page /Parent {PAGES_OBJ} 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << {} >> >> /Contents {content_obj} 0 R >>",
                g.width,
                g.height,
                fonts.join(" ")
            )
            .as_bytes(),
        );
        w.stream(content_obj, &page_content(layout, &page.ops));
    }

    w.finish(CATALOG_OBJ, INFO_OBJ)
}
