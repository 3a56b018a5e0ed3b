//! Paginated PDF export of a submission.
//!
//! Rendering is split in two: [`DocumentRenderer::layout`] produces
//! positioned draw operations page by page, and the PDF writer serializes
//! them. Both are pure; writing the file is the job of [`crate::export`].

mod layout;
mod metrics;
mod pdf;

pub use layout::{BlockKind, DocumentLayout, DrawOp, Page, PageGeometry, PlacedBlock};
pub use metrics::{text_width, wrap_text, FontFace};
pub use pdf::write_pdf;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::answers::AnswerMap;
use crate::catalog::Catalog;

/// Stand-in for a blank respondent name.
pub const UNKNOWN_RESPONDENT: &str = "Unknown";

const FILENAME_PREFIX: &str = "VSG_Assessment";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paper {
    #[default]
    Letter,
    A4,
}

impl Paper {
    pub fn geometry(self) -> PageGeometry {
        let (width, height) = match self {
            Paper::Letter => (612.0, 792.0),
            Paper::A4 => (595.28, 841.89),
        };
        PageGeometry {
            width,
            height,
            margin_top: 54.0,
            margin_bottom: 60.0,
            margin_left: 54.0,
            margin_right: 54.0,
        }
    }
}

impl std::str::FromStr for Paper {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "letter" => Ok(Paper::Letter),
            "a4" => Ok(Paper::A4),
            other => Err(format!("unknown paper size: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOptions {
    pub paper: Paper,
    pub title: String,
    pub subtitle: String,
    pub intro: String,
    /// Left side of every footer.
    pub program_name: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            paper: Paper::Letter,
            title: "VSG Week 1 Assessment".to_string(),
            subtitle: "Intern Knowledge Check".to_string(),
            intro: "Responses covering VSG, the Core 4 framework, and the internship program, \
                    exactly as submitted."
                .to_string(),
            program_name: "VSG Internship Program".to_string(),
        }
    }
}

/// Respondent name as printed, with the blank-name fallback.
pub fn display_name(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        UNKNOWN_RESPONDENT
    } else {
        trimmed
    }
}

/// `VSG_Assessment_<Name_Parts>_<YYYY-MM-DD>.pdf`
pub fn export_filename(name: &str, date: NaiveDate) -> String {
    let slug: String = display_name(name)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{FILENAME_PREFIX}_{slug}_{}.pdf", date.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    options: DocumentOptions,
}

impl DocumentRenderer {
    pub fn new(options: DocumentOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    pub fn layout(
        &self,
        name: &str,
        generated_at: NaiveDateTime,
        catalog: &Catalog,
        answers: &AnswerMap,
    ) -> DocumentLayout {
        layout::layout_document(&self.options, display_name(name), generated_at, catalog, answers)
    }

    /// Lay out and serialize in one go.
    pub fn render(
        &self,
        name: &str,
        generated_at: NaiveDateTime,
        catalog: &Catalog,
        answers: &AnswerMap,
    ) -> Vec<u8> {
        let layout = self.layout(name, generated_at, catalog, answers);
        write_pdf(&layout, &self.options.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Question, QuestionKind, Section};
    use proptest::prelude::*;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn lines(n: usize) -> String {
        (1..=n).map(|i| format!("Line {i}")).collect::<Vec<_>>().join("\n")
    }

    fn layout_with(answers: &AnswerMap) -> DocumentLayout {
        DocumentRenderer::default().layout("Ada Lovelace", at(), &Catalog::week1(), answers)
    }

    /// Fits-or-moves invariant for every block that fits on a page.
    fn assert_paginated(layout: &DocumentLayout) {
        let bottom = layout.geometry.printable_bottom();
        let mut prev: Option<&PlacedBlock> = None;
        for block in &layout.blocks {
            if !block.continued {
                assert!(
                    block.top + block.height <= bottom + 1e-3,
                    "{:?} overflows the page",
                    block.kind
                );
            }
            if let Some(p) = prev.filter(|p| !p.continued) {
                if block.page != p.page {
                    assert_eq!(block.page, p.page + 1);
                    assert!(
                        (block.top - layout.geometry.margin_top).abs() < 1e-3,
                        "{:?} did not start at the top margin",
                        block.kind
                    );
                    assert!(
                        p.top + p.height + block.height > bottom,
                        "{:?} moved to a new page although it fit",
                        block.kind
                    );
                } else {
                    assert!(block.top >= p.top + p.height - 1e-3);
                }
            }
            prev = Some(block);
        }
    }

    #[test]
    fn filename_from_name_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        assert_eq!(
            export_filename("Ada Lovelace", date),
            "VSG_Assessment_Ada_Lovelace_2026-10-14.pdf"
        );
        assert_eq!(
            export_filename("  Ada   King \t Lovelace ", date),
            "VSG_Assessment_Ada_King_Lovelace_2026-10-14.pdf"
        );
        assert_eq!(export_filename("   ", date), "VSG_Assessment_Unknown_2026-10-14.pdf");
        assert_eq!(export_filename("a/b", date), "VSG_Assessment_a_b_2026-10-14.pdf");
    }

    #[test]
    fn paper_parses_case_insensitively() {
        assert_eq!("A4".parse::<Paper>(), Ok(Paper::A4));
        assert_eq!("letter".parse::<Paper>(), Ok(Paper::Letter));
        assert!("legal".parse::<Paper>().is_err());
    }

    #[test]
    fn header_shows_name_and_long_date() {
        let layout = layout_with(&AnswerMap::new());
        let first: Vec<_> = layout.pages[0].texts().collect();
        assert!(first.contains(&"VSG Week 1 Assessment"));
        assert!(first.contains(&"Ada Lovelace"));
        assert!(first.contains(&"Wednesday, October 14, 2026"));
    }

    #[test]
    fn blank_name_prints_unknown() {
        let layout = DocumentRenderer::default().layout("  ", at(), &Catalog::week1(), &AnswerMap::new());
        assert!(layout.pages[0].texts().any(|t| t == UNKNOWN_RESPONDENT));
    }

    #[test]
    fn footer_on_every_page() {
        let mut answers = AnswerMap::new();
        for q in Catalog::week1().questions() {
            answers.set(q.id, lines(12));
        }
        let layout = layout_with(&answers);
        assert!(layout.page_count() > 2);
        for page in &layout.pages {
            let texts: Vec<_> = page.texts().collect();
            assert!(texts.contains(&"VSG Internship Program"));
            assert!(texts.contains(&"Generated October 14, 2026 9:30 AM"));
            assert!(page.ops.iter().any(|op| matches!(op, DrawOp::Rule { .. })));
        }
    }

    #[test]
    fn informational_sections_get_no_bar() {
        let layout = layout_with(&AnswerMap::new());
        let bars: Vec<_> = layout
            .blocks
            .iter()
            .filter_map(|b| match b.kind {
                BlockKind::SectionBar { section } => Some(section),
                _ => None,
            })
            .collect();
        assert_eq!(bars, vec![1, 2, 3, 4, 5]);
        assert!(!layout.pages.iter().flat_map(|p| p.texts()).any(|t| t == "Welcome"));
    }

    #[test]
    fn unanswered_questions_print_placeholder() {
        let layout = layout_with(&AnswerMap::new());
        let placeholders = layout
            .pages
            .iter()
            .flat_map(|p| p.texts())
            .filter(|t| *t == crate::answers::NOT_ANSWERED)
            .count();
        assert_eq!(placeholders, Catalog::week1().question_count());
    }

    #[test]
    fn long_answer_moves_whole_block_to_next_page() {
        let geometry = Paper::Letter.geometry();
        let answer_lh = crate::style::style(crate::style::StyleRole::AnswerText).size * 1.4;
        // Fits on an empty page, but not under the header of page one.
        let n = (geometry.printable_height() * 0.8 / answer_lh) as usize;
        let mut answers = AnswerMap::new();
        answers.set("core4_list", lines(n));
        let layout = layout_with(&answers);

        let bar = layout.block(BlockKind::SectionBar { section: 1 }).unwrap();
        let block = layout.block(BlockKind::Question { id: "core4_list" }).unwrap();
        assert_eq!(bar.page, 0);
        assert_eq!(block.page, 1);
        assert!(!block.continued);
        assert!((block.top - geometry.margin_top).abs() < 1e-3);
        assert!(bar.top + bar.height + block.height > geometry.printable_bottom());

        // Every answer line sits on page two.
        assert!(layout.pages[1].texts().any(|t| t == "Line 1"));
        assert!(layout.pages[1].texts().any(|t| t == format!("Line {n}")));
        assert!(!layout.pages[0].texts().any(|t| t == "Line 1"));
        assert_paginated(&layout);
    }

    #[test]
    fn oversized_answer_continues_across_pages() {
        let mut answers = AnswerMap::new();
        answers.set("vsg_different", lines(150));
        let layout = layout_with(&answers);
        let block = layout.block(BlockKind::Question { id: "vsg_different" }).unwrap();
        assert!(block.continued);
        let all: Vec<_> = layout.pages.iter().flat_map(|p| p.texts()).collect();
        assert!(all.contains(&"Line 1"));
        assert!(all.contains(&"Line 150"));
        assert_paginated(&layout);
    }

    #[test]
    fn wraps_long_labels_like_answers() {
        static WIDE: [Section; 1] = [Section {
            title: "Wide",
            questions: &[Question {
                id: "wide",
                label: "A very long label that keeps going and going well past a single line of the page so that it must wrap onto several lines before the answer block starts",
                kind: QuestionKind::LongText,
            }],
        }];
        let layout = DocumentRenderer::default().layout("Ada", at(), &Catalog::new(&WIDE), &AnswerMap::new());
        let geometry = layout.geometry;
        let label_lines = wrap_text(WIDE[0].questions[0].label, FontFace::Bold, 10.0, geometry.wrap_width());
        assert!(label_lines.len() > 1);
        for line in &label_lines {
            assert!(layout.pages[0].texts().any(|t| t == line));
        }
    }

    #[test]
    fn render_produces_pdf_bytes() {
        let mut answers = AnswerMap::new();
        answers.set("core4_list", "Line1\nLine2");
        let bytes = DocumentRenderer::default().render("Ada Lovelace", at(), &Catalog::week1(), &answers);
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }

    proptest! {
        #[test]
        fn pagination_never_splits_fitting_blocks(counts in proptest::collection::vec(0usize..40, 16)) {
            let mut answers = AnswerMap::new();
            for (q, n) in Catalog::week1().questions().zip(counts) {
                answers.set(q.id, lines(n));
            }
            let layout = layout_with(&answers);
            assert_paginated(&layout);
        }
    }
}
