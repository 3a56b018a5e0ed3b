//! Plain-text digest of a submission, for pasting into email or Slack.

use chrono::NaiveDateTime;
use std::fmt::Write;

use crate::answers::AnswerMap;
use crate::catalog::Catalog;

pub const DIGEST_TITLE: &str = "VSG Week 1 Assessment";

const HEADER_RULE_WIDTH: usize = 50;
const SECTION_RULE_WIDTH: usize = 40;

/// `M/D/YYYY, h:mm:ss AM`
pub fn format_submitted(at: NaiveDateTime) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Render the digest. Sections without questions are skipped.
pub fn render_digest(
    name: &str,
    submitted_at: NaiveDateTime,
    catalog: &Catalog,
    answers: &AnswerMap,
) -> String {
    let mut body = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(body, "{DIGEST_TITLE} - {name}");
    let _ = writeln!(body, "Submitted: {}", format_submitted(submitted_at));
    let _ = writeln!(body, "{}", "=".repeat(HEADER_RULE_WIDTH));
    body.push('\n');

    for section in catalog.sections().iter().filter(|s| !s.is_informational()) {
        let _ = writeln!(body, "{}", section.title);
        let _ = writeln!(body, "{}", "-".repeat(SECTION_RULE_WIDTH));
        for question in section.questions {
            let _ = writeln!(body, "\n{}", question.label);
            let _ = writeln!(body, "Answer: {}", answers.display(question.id));
        }
        body.push('\n');
    }

    body
}
