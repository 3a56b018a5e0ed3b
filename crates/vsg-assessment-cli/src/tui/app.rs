//! Interactive session state and action dispatch.
//!
//! Key handling is split from dispatch so the session can be driven
//! without a terminal: [`action_for`] maps a key to an [`Action`], and
//! [`App::dispatch`] applies it to the wizard.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use vsg_assessment_core::{
    export_document, render_digest, CoreError, DocumentRenderer, ExportRequest, Question,
    QuestionKind, WizardController, WizardError, WizardEvent,
};

pub const COPY_CONFIRMATION: &str = "Copied! Paste this into an email to Daniel.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Questions,
    Completion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Input(char),
    Newline,
    Backspace,
    FocusNext,
    FocusPrev,
    Next,
    Back,
    Submit,
    Jump(usize),
    Copy,
    Download,
    EditAgain,
    ScrollUp,
    ScrollDown,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Map a key press to an action for the current screen.
pub fn action_for(key: KeyEvent, screen: Screen) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match screen {
        Screen::Questions => match key.code {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Enter => Some(Action::Newline),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::PageDown => Some(Action::Next),
            KeyCode::PageUp => Some(Action::Back),
            KeyCode::F(n) if n >= 1 => Some(Action::Jump(n as usize - 1)),
            KeyCode::Char('n') if ctrl => Some(Action::Next),
            KeyCode::Char('b') if ctrl => Some(Action::Back),
            KeyCode::Char('s') if ctrl => Some(Action::Submit),
            KeyCode::Char(c) if !ctrl => Some(Action::Input(c)),
            _ => None,
        },
        Screen::Completion => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('c') => Some(Action::Copy),
            KeyCode::Char('d') => Some(Action::Download),
            KeyCode::Char('e') => Some(Action::EditAgain),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
            _ => None,
        },
    }
}

fn log_event(event: &WizardEvent) {
    tracing::info!(event = event.name(), detail = ?event, "wizard event");
}

type ExportJob = JoinHandle<Result<PathBuf, CoreError>>;

pub struct App {
    wizard: WizardController,
    renderer: DocumentRenderer,
    export_dir: PathBuf,
    runtime: Handle,
    export_job: Option<ExportJob>,
    focus: usize,
    scroll: u16,
    notice: Option<Notice>,
    clipboard: Option<String>,
    tick: u64,
    quit: bool,
}

impl App {
    pub fn new(
        wizard: WizardController,
        renderer: DocumentRenderer,
        export_dir: PathBuf,
        runtime: Handle,
    ) -> Self {
        Self {
            wizard,
            renderer,
            export_dir,
            runtime,
            export_job: None,
            focus: 0,
            scroll: 0,
            notice: None,
            clipboard: None,
            tick: 0,
            quit: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn wizard(&self) -> &WizardController {
        &self.wizard
    }

    pub fn screen(&self) -> Screen {
        if self.wizard.is_submitted() {
            Screen::Completion
        } else {
            Screen::Questions
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Digest for the completion screen and the clipboard.
    pub fn digest(&self) -> String {
        let at = self
            .wizard
            .submitted_at()
            .unwrap_or_else(|| Local::now().naive_local());
        render_digest(
            self.wizard.respondent_name(),
            at,
            &self.wizard.catalog(),
            self.wizard.answers(),
        )
    }

    /// Number of editable fields on the current section.
    fn field_count(&self) -> usize {
        match self.wizard.section_index() {
            0 => 1,
            _ => self
                .wizard
                .current_section()
                .map(|s| s.questions.len())
                .unwrap_or(0),
        }
    }

    /// The focused question, `None` on the welcome step.
    pub fn focused_question(&self) -> Option<&'static Question> {
        if self.wizard.section_index() == 0 {
            return None;
        }
        self.wizard
            .current_section()
            .and_then(|s| s.questions.get(self.focus))
    }

    // ── Side-effect handoff ──────────────────────────────────────────

    /// Text waiting to be written to the system clipboard.
    pub fn take_clipboard(&mut self) -> Option<String> {
        self.clipboard.take()
    }

    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit = true,
            Action::Input(c) => self.edit(|buf, _| buf.push(c)),
            Action::Backspace => self.edit(|buf, _| {
                buf.pop();
            }),
            Action::Newline => self.newline(),
            Action::FocusNext => self.move_focus(1),
            Action::FocusPrev => self.move_focus(-1),
            Action::Next => {
                let result = self.wizard.go_next();
                self.navigated(result);
            }
            Action::Back => {
                let result = self.wizard.go_back();
                self.navigated(result);
            }
            Action::Jump(index) => {
                let result = self.wizard.jump_to(index);
                self.navigated(result);
            }
            Action::Submit => self.submit(),
            Action::Copy => self.copy(),
            Action::Download => self.download(),
            Action::EditAgain => {
                if let Some(event) = self.wizard.edit_again() {
                    log_event(&event);
                    self.notice = None;
                    self.scroll = 0;
                }
            }
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
        }
    }

    fn edit(&mut self, apply: impl FnOnce(&mut String, QuestionKind)) {
        if self.screen() != Screen::Questions {
            return;
        }
        match self.focused_question() {
            Some(question) => {
                if let Ok(buf) = self.wizard.answer_mut(question.id) {
                    apply(buf, question.kind);
                }
            }
            None if self.wizard.section_index() == 0 => {
                apply(self.wizard.name_mut(), QuestionKind::ShortText)
            }
            None => {}
        }
    }

    fn newline(&mut self) {
        match self.focused_question() {
            Some(q) if q.kind == QuestionKind::LongText => self.edit(|buf, _| buf.push('\n')),
            Some(_) => self.move_focus(1),
            None => self.dispatch(Action::Next),
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        self.focus = (self.focus as isize + delta).rem_euclid(count as isize) as usize;
    }

    fn navigated(&mut self, result: Result<Option<WizardEvent>, WizardError>) {
        match result {
            Ok(Some(event)) => {
                log_event(&event);
                self.focus = 0;
                self.notice = None;
            }
            Ok(None) => {}
            Err(e) => self.notice = Some(Notice::new(NoticeKind::Error, e.to_string())),
        }
    }

    fn submit(&mut self) {
        match self.wizard.submit() {
            Ok(event) => {
                log_event(&event);
                self.notice = None;
                self.scroll = 0;
            }
            Err(WizardError::NameRequired) => {
                self.notice = Some(Notice::new(
                    NoticeKind::Error,
                    "Please enter your name before submitting.",
                ));
            }
            Err(e) => self.notice = Some(Notice::new(NoticeKind::Info, e.to_string())),
        }
    }

    fn copy(&mut self) {
        if self.screen() != Screen::Completion {
            return;
        }
        self.clipboard = Some(self.digest());
        self.notice = Some(Notice::new(NoticeKind::Success, COPY_CONFIRMATION));
    }

    fn download(&mut self) {
        match self.wizard.begin_export() {
            Ok(event) => {
                log_event(&event);
                let request = ExportRequest::from_wizard(&self.wizard);
                let renderer = self.renderer.clone();
                let dir = self.export_dir.clone();
                self.export_job = Some(
                    self.runtime
                        .spawn(async move { export_document(renderer, request, &dir).await }),
                );
                self.notice = Some(Notice::new(NoticeKind::Info, "Generating PDF..."));
            }
            // Busy: the request is dropped, not queued.
            Err(WizardError::ExportInProgress) => {}
            Err(e) => self.notice = Some(Notice::new(NoticeKind::Error, e.to_string())),
        }
    }

    /// Settle a finished export job. Clears the busy flag on every outcome.
    pub fn poll_export(&mut self) {
        let finished = self
            .export_job
            .as_ref()
            .is_some_and(|job| job.is_finished());
        if !finished {
            return;
        }
        let Some(job) = self.export_job.take() else {
            return;
        };

        let outcome = self.runtime.block_on(job);
        self.wizard.finish_export();
        let event = match outcome {
            Ok(Ok(path)) => {
                self.notice = Some(Notice::new(
                    NoticeKind::Success,
                    format!("Saved {}", path.display()),
                ));
                WizardEvent::ExportFinished {
                    path,
                    at: chrono::Utc::now(),
                }
            }
            Ok(Err(e)) => self.export_failed(e.to_string()),
            Err(e) => self.export_failed(e.to_string()),
        };
        log_event(&event);
    }

    fn export_failed(&mut self, message: String) -> WizardEvent {
        tracing::warn!(error = %message, "export failed");
        self.notice = Some(Notice::new(
            NoticeKind::Error,
            format!("Export failed: {message}"),
        ));
        WizardEvent::ExportFailed {
            message,
            at: chrono::Utc::now(),
        }
    }

    /// Whether an export job is still running.
    pub fn is_exporting(&self) -> bool {
        self.wizard.is_exporting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use std::time::{Duration, Instant};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app(runtime: &tokio::runtime::Runtime, dir: PathBuf) -> App {
        App::new(
            WizardController::default(),
            DocumentRenderer::default(),
            dir,
            runtime.handle().clone(),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                app.dispatch(Action::Newline);
            } else {
                app.dispatch(Action::Input(c));
            }
        }
    }

    fn wait_for_export(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while app.is_exporting() && Instant::now() < deadline {
            app.poll_export();
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    fn submitted(app: &mut App) {
        type_text(app, "Ada Lovelace");
        app.dispatch(Action::Jump(5));
        app.dispatch(Action::Submit);
        assert_eq!(app.screen(), Screen::Completion);
    }

    #[test]
    fn maps_keys_per_screen() {
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        assert_eq!(action_for(key(KeyCode::Char('n'), ctrl), Screen::Questions), Some(Action::Next));
        assert_eq!(action_for(key(KeyCode::Char('n'), none), Screen::Questions), Some(Action::Input('n')));
        assert_eq!(action_for(key(KeyCode::F(3), none), Screen::Questions), Some(Action::Jump(2)));
        assert_eq!(action_for(key(KeyCode::Char('c'), none), Screen::Completion), Some(Action::Copy));
        assert_eq!(action_for(key(KeyCode::Char('c'), ctrl), Screen::Completion), Some(Action::Quit));
        assert_eq!(action_for(key(KeyCode::Enter, none), Screen::Completion), None);
    }

    #[test]
    fn next_is_blocked_until_name_entered() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, PathBuf::from("."));

        app.dispatch(Action::Next);
        assert_eq!(app.wizard().section_index(), 0);
        assert_eq!(app.notice().unwrap().kind, NoticeKind::Error);

        type_text(&mut app, "Ada Lovelace");
        app.dispatch(Action::Next);
        assert_eq!(app.wizard().section_index(), 1);
        assert!(app.notice().is_none());
    }

    #[test]
    fn typing_fills_focused_question() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, PathBuf::from("."));
        type_text(&mut app, "Ada Lovelace");
        app.dispatch(Action::Next);

        // core4_list is long text; Enter inserts a newline.
        type_text(&mut app, "Line1\nLine2");
        assert_eq!(app.wizard().answer("core4_list"), Some("Line1\nLine2"));

        // core4_generate is short text; Enter moves focus on.
        app.dispatch(Action::FocusNext);
        type_text(&mut app, "Solar\n");
        assert_eq!(app.wizard().answer("core4_generate"), Some("Solar"));
        assert_eq!(app.focus(), 2);

        app.dispatch(Action::Backspace);
        assert_eq!(app.wizard().answer("core4_store"), Some(""));
    }

    #[test]
    fn focus_wraps_around_section() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, PathBuf::from("."));
        app.dispatch(Action::Jump(4));
        app.dispatch(Action::FocusPrev);
        assert_eq!(app.focus(), 2);
        app.dispatch(Action::FocusNext);
        assert_eq!(app.focus(), 0);
    }

    #[test]
    fn submit_without_name_shows_notice() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, PathBuf::from("."));
        app.dispatch(Action::Jump(5));
        app.dispatch(Action::Submit);
        assert_eq!(app.screen(), Screen::Questions);
        assert_eq!(
            app.notice().unwrap().text,
            "Please enter your name before submitting."
        );
    }

    #[test]
    fn copy_hands_digest_to_clipboard() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, PathBuf::from("."));
        type_text(&mut app, "Ada Lovelace");
        app.dispatch(Action::Next);
        type_text(&mut app, "Line1\nLine2");
        app.dispatch(Action::Jump(5));
        app.dispatch(Action::Submit);

        app.dispatch(Action::Copy);
        let text = app.take_clipboard().unwrap();
        assert!(text.starts_with("VSG Week 1 Assessment - Ada Lovelace\n"));
        assert!(text.contains("Answer: Line1\nLine2"));
        assert_eq!(app.notice().unwrap().text, COPY_CONFIRMATION);
        assert!(app.take_clipboard().is_none());

        app.dispatch(Action::Copy);
        assert_eq!(app.take_clipboard().unwrap(), text);
    }

    #[test]
    fn edit_again_returns_to_last_section() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt, PathBuf::from("."));
        submitted(&mut app);
        app.dispatch(Action::EditAgain);
        assert_eq!(app.screen(), Screen::Questions);
        assert_eq!(app.wizard().section_index(), 5);
        assert_eq!(app.wizard().respondent_name(), "Ada Lovelace");
    }

    #[test]
    fn download_writes_pdf_and_clears_busy_flag() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&rt, dir.path().to_path_buf());
        submitted(&mut app);

        app.dispatch(Action::Download);
        assert!(app.is_exporting());
        // Re-entrant request while busy is ignored.
        app.dispatch(Action::Download);
        wait_for_export(&mut app);

        assert!(!app.is_exporting());
        assert_eq!(app.notice().unwrap().kind, NoticeKind::Success);
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn failed_download_clears_busy_flag() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&rt, dir.path().join("missing"));
        submitted(&mut app);

        app.dispatch(Action::Download);
        wait_for_export(&mut app);

        assert!(!app.is_exporting());
        let notice = app.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.starts_with("Export failed"));

        app.dispatch(Action::Download);
        assert!(app.is_exporting());
        wait_for_export(&mut app);
    }
}
