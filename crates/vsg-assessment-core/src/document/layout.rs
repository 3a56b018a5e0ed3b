//! Page layout and pagination.
//!
//! Coordinates are in points with the origin at the top-left of the page and
//! `y` growing downwards. The PDF writer flips them.
//!
//! Every block (section bar, or question label plus answer) is measured
//! before it is drawn. If it does not fit between the cursor and the bottom
//! margin, a new page is started and the block is placed at the top margin.

use chrono::NaiveDateTime;

use super::metrics::{text_width, wrap_text, FontFace};
use super::DocumentOptions;
use crate::answers::AnswerMap;
use crate::catalog::{Catalog, Question};
use crate::style::{style, FontWeight, Rgb, RoleStyle, StyleRole};

const HEADER_BAND_HEIGHT: f32 = 96.0;
const HEADER_GAP: f32 = 24.0;
const INTRO_GAP: f32 = 14.0;
const SECTION_BAR_HEIGHT: f32 = 22.0;
const SECTION_BAR_GAP: f32 = 12.0;
const LABEL_GAP: f32 = 4.0;
const ANSWER_PAD_X: f32 = 10.0;
const ANSWER_PAD_Y: f32 = 6.0;
const ACCENT_WIDTH: f32 = 3.0;
const BLOCK_GAP: f32 = 14.0;
const LINE_SPACING: f32 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest `y` a block may reach.
    pub fn printable_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }

    pub fn printable_height(&self) -> f32 {
        self.printable_bottom() - self.margin_top
    }

    /// Width shared by question labels and answer text.
    pub fn wrap_width(&self) -> f32 {
        self.content_width() - ACCENT_WIDTH - 2.0 * ANSWER_PAD_X
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgb,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        color: Rgb,
    },
    /// `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        face: FontFace,
        size: f32,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    SectionBar { section: usize },
    Question { id: &'static str },
}

/// Where a measured block landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBlock {
    pub kind: BlockKind,
    pub page: usize,
    pub top: f32,
    pub height: f32,
    /// Taller than a whole printable area, so continued across pages.
    pub continued: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
    pub blocks: Vec<PlacedBlock>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn block(&self, kind: BlockKind) -> Option<&PlacedBlock> {
        self.blocks.iter().find(|b| b.kind == kind)
    }
}

fn face_for(role: &RoleStyle) -> FontFace {
    match role.weight {
        FontWeight::Regular => FontFace::Regular,
        FontWeight::Bold => FontFace::Bold,
        FontWeight::Italic => FontFace::Oblique,
    }
}

fn line_height(size: f32) -> f32 {
    size * LINE_SPACING
}

/// Pre-wrapped question block.
struct QuestionBlock {
    label: Vec<String>,
    answer: Vec<String>,
    answered: bool,
}

impl QuestionBlock {
    fn measure(question: &Question, answers: &AnswerMap, geometry: &PageGeometry) -> Self {
        let label_style = style(StyleRole::QuestionLabel);
        let answer_style = style(StyleRole::AnswerText);
        let width = geometry.wrap_width();
        let text = answers.display(question.id);
        let answered = answers.get(question.id).is_some_and(|v| !v.is_empty());
        let answer_face = if answered {
            face_for(&answer_style)
        } else {
            face_for(&style(StyleRole::Unanswered))
        };
        Self {
            label: wrap_text(question.label, face_for(&label_style), label_style.size, width),
            answer: wrap_text(text, answer_face, answer_style.size, width),
            answered,
        }
    }

    fn label_height(&self) -> f32 {
        self.label.len() as f32 * line_height(style(StyleRole::QuestionLabel).size)
    }

    fn answer_height(&self, lines: usize) -> f32 {
        lines as f32 * line_height(style(StyleRole::AnswerText).size) + 2.0 * ANSWER_PAD_Y
    }

    fn height(&self) -> f32 {
        self.label_height() + LABEL_GAP + self.answer_height(self.answer.len()) + BLOCK_GAP
    }
}

struct LayoutBuilder<'a> {
    geometry: PageGeometry,
    options: &'a DocumentOptions,
    footer_right: String,
    pages: Vec<Page>,
    blocks: Vec<PlacedBlock>,
    cursor: f32,
}

impl<'a> LayoutBuilder<'a> {
    fn new(geometry: PageGeometry, options: &'a DocumentOptions, generated_at: NaiveDateTime) -> Self {
        Self {
            geometry,
            options,
            footer_right: format!("Generated {}", generated_at.format("%B %-d, %Y %-I:%M %p")),
            pages: vec![Page::default()],
            blocks: Vec::new(),
            cursor: geometry.margin_top,
        }
    }

    fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text(&mut self, x: f32, y: f32, text: impl Into<String>, role: StyleRole) {
        let s = style(role);
        self.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            face: face_for(&s),
            size: s.size,
            color: s.color,
        });
    }

    fn text_right(&mut self, right: f32, y: f32, text: &str, role: StyleRole) {
        let s = style(role);
        let x = right - text_width(face_for(&s), s.size, text);
        self.text(x, y, text, role);
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = self.geometry.margin_top;
    }

    /// Start a new page unless `height` fits below the cursor.
    fn ensure_room(&mut self, height: f32) {
        if self.cursor + height > self.geometry.printable_bottom() {
            self.new_page();
        }
    }

    fn header(&mut self, name: &str, generated_at: NaiveDateTime) {
        let g = self.geometry;
        let band = style(StyleRole::HeaderBand);
        self.push(DrawOp::Rect {
            x: 0.0,
            y: 0.0,
            width: g.width,
            height: HEADER_BAND_HEIGHT,
            fill: band.background.unwrap_or(band.color),
        });

        let right = g.width - g.margin_right;
        let title = self.options.title.clone();
        let subtitle = self.options.subtitle.clone();
        self.text(g.margin_left, 44.0, title, StyleRole::HeaderTitle);
        self.text(g.margin_left, 64.0, subtitle, StyleRole::HeaderSubtitle);
        self.text_right(right, 44.0, name, StyleRole::HeaderMeta);
        let date = generated_at.format("%A, %B %-d, %Y").to_string();
        self.text_right(right, 64.0, &date, StyleRole::HeaderMeta);

        self.cursor = HEADER_BAND_HEIGHT + HEADER_GAP;

        let intro = style(StyleRole::Intro);
        let lines = wrap_text(&self.options.intro, face_for(&intro), intro.size, g.content_width());
        let lh = line_height(intro.size);
        for line in lines {
            self.text(g.margin_left, self.cursor + intro.size, line, StyleRole::Intro);
            self.cursor += lh;
        }
        self.cursor += INTRO_GAP;
    }

    fn section_bar(&mut self, index: usize, title: &str) {
        let height = SECTION_BAR_HEIGHT + SECTION_BAR_GAP;
        self.ensure_room(height);
        let g = self.geometry;
        let bar = style(StyleRole::SectionBar);
        let top = self.cursor;
        self.push(DrawOp::Rect {
            x: g.margin_left,
            y: top,
            width: g.content_width(),
            height: SECTION_BAR_HEIGHT,
            fill: bar.background.unwrap_or(bar.color),
        });
        self.text(
            g.margin_left + ANSWER_PAD_X,
            top + (SECTION_BAR_HEIGHT + bar.size) / 2.0 - 1.0,
            title,
            StyleRole::SectionBar,
        );
        self.blocks.push(PlacedBlock {
            kind: BlockKind::SectionBar { section: index },
            page: self.page_index(),
            top,
            height,
            continued: false,
        });
        self.cursor += height;
    }

    fn question(&mut self, question: &Question, answers: &AnswerMap) {
        let g = self.geometry;
        let block = QuestionBlock::measure(question, answers, &g);
        let height = block.height();
        let continued = height > g.printable_height();

        if continued {
            if self.cursor > g.margin_top {
                self.new_page();
            }
        } else {
            self.ensure_room(height);
        }

        let page = self.page_index();
        let top = self.cursor;

        let label = style(StyleRole::QuestionLabel);
        let label_lh = line_height(label.size);
        for line in &block.label {
            self.text(
                g.margin_left,
                self.cursor + label.size,
                line.clone(),
                StyleRole::QuestionLabel,
            );
            self.cursor += label_lh;
        }
        self.cursor += LABEL_GAP;

        let answer_role = if block.answered {
            StyleRole::AnswerText
        } else {
            StyleRole::Unanswered
        };
        let answer_lh = line_height(style(StyleRole::AnswerText).size);
        let mut remaining: &[String] = &block.answer;
        while !remaining.is_empty() {
            let room = g.printable_bottom() - self.cursor - 2.0 * ANSWER_PAD_Y;
            let fit = ((room / answer_lh).floor() as usize).clamp(1, remaining.len());
            let (chunk, rest) = remaining.split_at(fit);
            self.answer_chunk(chunk, answer_role);
            remaining = rest;
            if !remaining.is_empty() {
                self.new_page();
            }
        }
        self.cursor += BLOCK_GAP;

        self.blocks.push(PlacedBlock {
            kind: BlockKind::Question { id: question.id },
            page,
            top,
            height,
            continued,
        });
    }

    fn answer_chunk(&mut self, lines: &[String], role: StyleRole) {
        let g = self.geometry;
        let block = style(StyleRole::AnswerBlock);
        let text_style = style(role);
        let lh = line_height(style(StyleRole::AnswerText).size);
        let height = lines.len() as f32 * lh + 2.0 * ANSWER_PAD_Y;
        let top = self.cursor;

        self.push(DrawOp::Rect {
            x: g.margin_left,
            y: top,
            width: g.content_width(),
            height,
            fill: block.background.unwrap_or(block.color),
        });
        self.push(DrawOp::Rect {
            x: g.margin_left,
            y: top,
            width: ACCENT_WIDTH,
            height,
            fill: block.color,
        });

        let x = g.margin_left + ACCENT_WIDTH + ANSWER_PAD_X;
        let mut y = top + ANSWER_PAD_Y;
        for line in lines {
            self.text(x, y + text_style.size, line.clone(), role);
            y += lh;
        }
        self.cursor = top + height;
    }

    /// Footer rule and text on every page, once pagination is final.
    fn footers(&mut self) {
        let g = self.geometry;
        let footer = style(StyleRole::Footer);
        let face = face_for(&footer);
        let rule_y = g.printable_bottom() + 18.0;
        let text_y = rule_y + 14.0;
        let right = g.width - g.margin_right;
        let right_x = right - text_width(face, footer.size, &self.footer_right);
        for page in &mut self.pages {
            page.ops.push(DrawOp::Rule {
                x1: g.margin_left,
                x2: right,
                y: rule_y,
                thickness: 0.5,
                color: footer.color,
            });
            page.ops.push(DrawOp::Text {
                x: g.margin_left,
                y: text_y,
                text: self.options.program_name.clone(),
                face,
                size: footer.size,
                color: footer.color,
            });
            page.ops.push(DrawOp::Text {
                x: right_x,
                y: text_y,
                text: self.footer_right.clone(),
                face,
                size: footer.size,
                color: footer.color,
            });
        }
    }

    fn finish(mut self) -> DocumentLayout {
        self.footers();
        DocumentLayout {
            geometry: self.geometry,
            pages: self.pages,
            blocks: self.blocks,
        }
    }
}

pub(super) fn layout_document(
    options: &DocumentOptions,
    name: &str,
    generated_at: NaiveDateTime,
    catalog: &Catalog,
    answers: &AnswerMap,
) -> DocumentLayout {
    let mut builder = LayoutBuilder::new(options.paper.geometry(), options, generated_at);
    builder.header(name, generated_at);

    for (index, section) in catalog.sections().iter().enumerate() {
        if section.is_informational() {
            continue;
        }
        builder.section_bar(index, section.title);
        for question in section.questions {
            builder.question(question, answers);
        }
    }

    builder.finish()
}
