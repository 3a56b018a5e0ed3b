//! Frame rendering. Reads the app; never mutates it.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use vsg_assessment_core::{
    style, FontWeight, Question, QuestionKind, Rgb, SectionStatus, StyleRole, WizardController,
};

use super::app::{App, NoticeKind, Screen};

const PRODUCT_TITLE: &str = "VSG Week 1 Assessment";
const WELCOME_TEXT: &str =
    "Demonstrate your understanding of VSG, Core 4, and the internship program.";
const NAME_LABEL: &str = "Your Name";
const NAME_PLACEHOLDER: &str = "Enter your full name";
const ANSWER_PLACEHOLDER: &str = "Type your answer here...";
const TIP: &str = "Tip: Take your time. There are no wrong answers. This helps us \
                   understand where you're at and how we can help.";
const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Foreground and weight for a role.
fn fg(role: StyleRole) -> Style {
    let s = style(role);
    let base = Style::default().fg(color(s.color));
    match s.weight {
        FontWeight::Regular => base,
        FontWeight::Bold => base.add_modifier(Modifier::BOLD),
        FontWeight::Italic => base.add_modifier(Modifier::ITALIC),
    }
}

/// Foreground plus the role's fill, when it has one.
fn filled(role: StyleRole) -> Style {
    match style(role).background {
        Some(bg) => fg(role).bg(color(bg)),
        None => fg(role),
    }
}

fn wrapped(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|l| Line::from(Span::styled(l.into_owned(), style)))
        .collect()
}

pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen() {
        Screen::Questions => draw_questions(frame, app),
        Screen::Completion => draw_completion(frame, app),
    }
}

// ── Question screen ──────────────────────────────────────────────────

fn draw_questions(frame: &mut Frame, app: &App) {
    let wizard = app.wizard();
    let [progress, card, dots, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let last = wizard.catalog().len().saturating_sub(1);
    let gauge = Gauge::default()
        .block(Block::bordered().title("Progress"))
        .gauge_style(fg(StyleRole::ProgressCurrent))
        .ratio((wizard.progress_pct() / 100.0).clamp(0.0, 1.0))
        .label(format!("{} of {last}", wizard.section_index()));
    frame.render_widget(gauge, progress);

    draw_card(frame, app, card);
    frame.render_widget(Paragraph::new(dot_line(wizard)), dots);
    frame.render_widget(Paragraph::new(status_line(app, QUESTION_HELP)), status);
}

const QUESTION_HELP: &str =
    "Tab field  Enter newline/next  Ctrl-N next  Ctrl-B back  Ctrl-S submit  Esc quit";

fn draw_card(frame: &mut Frame, app: &App, area: Rect) {
    let wizard = app.wizard();
    let title = match wizard.section_index() {
        0 => PRODUCT_TITLE,
        _ => wizard.current_section().map(|s| s.title).unwrap_or_default(),
    };
    let block = Block::bordered().title(Span::styled(format!(" {title} "), fg(StyleRole::HeaderTitle)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body, nav] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
    let width = body.width.saturating_sub(1) as usize;
    let (lines, focus_span) = card_lines(app, width);

    // Keep the focused field on screen.
    let height = body.height as usize;
    let (start, end) = focus_span;
    let offset = if end > height {
        (end - height).min(start)
    } else {
        0
    };
    frame.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), body);
    frame.render_widget(Paragraph::new(nav_line(wizard, nav.width as usize)), nav);
}

/// Card body lines and the line range of the focused field.
fn card_lines(app: &App, width: usize) -> (Vec<Line<'static>>, (usize, usize)) {
    let wizard = app.wizard();
    let mut lines = Vec::new();
    let mut focus_span = (0, 0);

    if wizard.section_index() == 0 {
        lines.extend(wrapped(WELCOME_TEXT, width, fg(StyleRole::Intro)));
        lines.push(Line::default());
        let start = lines.len();
        lines.push(Line::from(Span::styled(NAME_LABEL, fg(StyleRole::QuestionLabel))));
        lines.extend(input_lines(
            wizard.respondent_name(),
            NAME_PLACEHOLDER,
            QuestionKind::ShortText,
            true,
            app.tick_count(),
            width,
        ));
        focus_span = (start, lines.len());
        lines.push(Line::default());
        lines.extend(wrapped(TIP, width, filled(StyleRole::Tip)));
        return (lines, focus_span);
    }

    let questions: &[Question] = wizard.current_section().map(|s| s.questions).unwrap_or(&[]);
    for (i, question) in questions.iter().enumerate() {
        let focused = i == app.focus();
        let start = lines.len();
        let label_style = if focused {
            fg(StyleRole::QuestionLabel).add_modifier(Modifier::UNDERLINED)
        } else {
            fg(StyleRole::QuestionLabel)
        };
        lines.extend(wrapped(question.label, width, label_style));
        lines.extend(input_lines(
            wizard.answer(question.id).unwrap_or_default(),
            ANSWER_PLACEHOLDER,
            question.kind,
            focused,
            app.tick_count(),
            width,
        ));
        if focused {
            focus_span = (start, lines.len());
        }
        lines.push(Line::default());
    }
    (lines, focus_span)
}

fn input_lines(
    value: &str,
    placeholder: &str,
    kind: QuestionKind,
    focused: bool,
    tick: u64,
    width: usize,
) -> Vec<Line<'static>> {
    let accent = Style::default().fg(color(style(StyleRole::AnswerBlock).color));
    let gutter = || Span::styled("\u{2502} ", accent);
    let cursor = if focused && tick % 10 < 5 { "\u{2588}" } else { " " };
    let text_width = width.saturating_sub(3).max(1);

    if value.is_empty() {
        return vec![Line::from(vec![
            gutter(),
            Span::styled(cursor, fg(StyleRole::AnswerText)),
            Span::styled(placeholder.to_string(), fg(StyleRole::Muted)),
        ])];
    }

    let mut rows: Vec<String> = Vec::new();
    for paragraph in value.split('\n') {
        if paragraph.is_empty() {
            rows.push(String::new());
            continue;
        }
        rows.extend(
            textwrap::wrap(paragraph, text_width)
                .into_iter()
                .map(|l| l.into_owned()),
        );
    }
    let cursor_row = rows.len() - 1;
    if kind == QuestionKind::LongText && rows.len() < 2 {
        rows.push(String::new());
    }

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let mut spans = vec![gutter(), Span::styled(row, fg(StyleRole::AnswerText))];
            if focused && i == cursor_row {
                spans.push(Span::styled(cursor, fg(StyleRole::AnswerText)));
            }
            Line::from(spans)
        })
        .collect()
}

fn nav_line(wizard: &WizardController, width: usize) -> Line<'static> {
    let back_style = if wizard.can_go_back() {
        fg(StyleRole::AnswerText)
    } else {
        fg(StyleRole::Muted)
    };
    let (forward, forward_style) = if wizard.is_last_section() {
        ("Submit Assessment (Ctrl-S)", fg(StyleRole::Success))
    } else if wizard.can_go_next() {
        ("Next (Ctrl-N) \u{2192}", fg(StyleRole::ProgressCurrent))
    } else {
        ("Next (Ctrl-N) \u{2192}", fg(StyleRole::Muted))
    };
    let back = "\u{2190} Back (Ctrl-B)";
    let gap = width.saturating_sub(back.chars().count() + forward.chars().count());
    Line::from(vec![
        Span::styled(back, back_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(forward, forward_style),
    ])
}

fn dot_line(wizard: &WizardController) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, status) in wizard.section_statuses().into_iter().enumerate() {
        let (glyph, role) = match status {
            SectionStatus::Done => ("\u{25CF}", StyleRole::ProgressDone),
            SectionStatus::Current => ("\u{25C9}", StyleRole::ProgressCurrent),
            SectionStatus::Upcoming => ("\u{25CB}", StyleRole::ProgressUpcoming),
        };
        spans.push(Span::styled(format!("F{} {glyph}  ", i + 1), fg(role)));
    }
    Line::from(spans)
}

fn status_line(app: &App, help: &'static str) -> Line<'static> {
    match app.notice() {
        Some(notice) => {
            let role = match notice.kind {
                NoticeKind::Info => StyleRole::Muted,
                NoticeKind::Success => StyleRole::Success,
                NoticeKind::Error => StyleRole::Error,
            };
            Line::from(Span::styled(notice.text.clone(), fg(role)))
        }
        None => Line::from(Span::styled(help, fg(StyleRole::Muted))),
    }
}

// ── Completion screen ────────────────────────────────────────────────

fn draw_completion(frame: &mut Frame, app: &App) {
    let wizard = app.wizard();
    let [header, preview, actions, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let name = wizard.respondent_name().trim().to_string();
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled("\u{2713} Assessment Complete!", fg(StyleRole::Success))),
            Line::from(Span::styled(
                format!("Thanks, {name}. Here's your submission."),
                fg(StyleRole::AnswerText),
            )),
        ]),
        header,
    );

    let digest = Paragraph::new(app.digest())
        .block(Block::bordered().title(" Submission "))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll(), 0));
    frame.render_widget(digest, preview);

    let download = if app.is_exporting() {
        let spin = SPINNER[(app.tick_count() as usize / 2) % SPINNER.len()];
        Span::styled(format!("[d] Generating PDF {spin}"), fg(StyleRole::Muted))
    } else {
        Span::styled("[d] Download PDF", fg(StyleRole::ProgressCurrent))
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[c] Copy to Clipboard  ", fg(StyleRole::ProgressCurrent)),
            download,
            Span::styled("  [e] Go back and edit  [q] Quit", fg(StyleRole::Muted)),
        ])),
        actions,
    );
    frame.render_widget(Paragraph::new(status_line(app, COMPLETION_HELP)), status);
}

const COMPLETION_HELP: &str = "Up/Down scroll";

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn empty_input_shows_placeholder() {
        let lines = input_lines("", "Type here", QuestionKind::LongText, false, 0, 40);
        assert_eq!(text(&lines), vec!["\u{2502}  Type here"]);
    }

    #[test]
    fn long_input_keeps_paragraphs() {
        let lines = input_lines("Line1\nLine2", "", QuestionKind::LongText, false, 0, 40);
        assert_eq!(text(&lines), vec!["\u{2502} Line1", "\u{2502} Line2"]);
    }

    #[test]
    fn long_input_wraps_to_width() {
        let lines = input_lines(
            "one two three four five six",
            "",
            QuestionKind::LongText,
            false,
            0,
            13,
        );
        assert!(lines.len() >= 3);
    }

    #[test]
    fn cursor_follows_trailing_newline() {
        let lines = input_lines("Line1\n", "", QuestionKind::LongText, true, 0, 40);
        let rows = text(&lines);
        assert_eq!(rows.len(), 2);
        assert!(rows[1].ends_with('\u{2588}'));
    }

    #[test]
    fn nav_line_marks_last_section_as_submit() {
        let mut wizard = WizardController::default();
        wizard.jump_to(5).unwrap();
        let rendered: String = nav_line(&wizard, 60)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(rendered.contains("Submit Assessment"));
    }

    #[test]
    fn dot_line_has_one_dot_per_section() {
        let wizard = WizardController::default();
        let rendered: String = dot_line(&wizard)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(rendered.matches("\u{25C9}").count(), 1);
        assert_eq!(rendered.matches("\u{25CB}").count(), 5);
    }
}
