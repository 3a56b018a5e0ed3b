//! Wizard controller implementation.
//!
//! The controller is a plain state machine over the section index and the
//! submitted flag. It never blocks and holds no handles; the front end calls
//! a command, gets back an event or a [`WizardError`], and re-renders.
//!
//! ## State Transitions
//!
//! ```text
//! Section(0) -> Section(1) -> ... -> Section(N-1) -> Submitted
//!                                         ^               |
//!                                         +-- edit_again -+
//! ```

use chrono::{Local, NaiveDateTime, Utc};
use serde::Serialize;

use crate::answers::AnswerMap;
use crate::catalog::{Catalog, Section};
use crate::error::WizardError;
use crate::events::WizardEvent;

/// Navigator dot state for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Done,
    Current,
    Upcoming,
}

/// Everything the wizard knows about one respondent session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WizardState {
    pub section_index: usize,
    pub respondent_name: String,
    pub answers: AnswerMap,
    pub submitted: bool,
    pub exporting: bool,
    /// Local wall-clock time of the last successful submit.
    pub submitted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct WizardController {
    catalog: Catalog,
    state: WizardState,
}

impl WizardController {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            state: WizardState::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn section_index(&self) -> usize {
        self.state.section_index
    }

    pub fn current_section(&self) -> Option<&'static Section> {
        self.catalog.section(self.state.section_index)
    }

    pub fn respondent_name(&self) -> &str {
        &self.state.respondent_name
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.state.answers
    }

    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.state.answers.get(question_id)
    }

    pub fn is_submitted(&self) -> bool {
        self.state.submitted
    }

    pub fn is_exporting(&self) -> bool {
        self.state.exporting
    }

    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        self.state.submitted_at
    }

    pub fn has_name(&self) -> bool {
        !self.state.respondent_name.trim().is_empty()
    }

    fn last_index(&self) -> usize {
        self.catalog.len().saturating_sub(1)
    }

    pub fn is_last_section(&self) -> bool {
        self.state.section_index == self.last_index()
    }

    pub fn can_go_back(&self) -> bool {
        !self.state.submitted && self.state.section_index > 0
    }

    /// Whether Next would move forward right now.
    pub fn can_go_next(&self) -> bool {
        if self.state.submitted || self.is_last_section() {
            return false;
        }
        self.state.section_index != 0 || self.has_name()
    }

    /// 0.0 .. 100.0, measured in completed steps.
    pub fn progress_pct(&self) -> f64 {
        let last = self.last_index();
        if last == 0 {
            return 100.0;
        }
        self.state.section_index as f64 / last as f64 * 100.0
    }

    pub fn section_status(&self, index: usize) -> SectionStatus {
        use std::cmp::Ordering;
        match index.cmp(&self.state.section_index) {
            Ordering::Less => SectionStatus::Done,
            Ordering::Equal => SectionStatus::Current,
            Ordering::Greater => SectionStatus::Upcoming,
        }
    }

    pub fn section_statuses(&self) -> Vec<SectionStatus> {
        (0..self.catalog.len()).map(|i| self.section_status(i)).collect()
    }

    // ── Mutation ─────────────────────────────────────────────────────

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.respondent_name = name.into();
    }

    pub fn name_mut(&mut self) -> &mut String {
        &mut self.state.respondent_name
    }

    /// Overwrite an answer. The id must belong to the catalog.
    pub fn set_answer(&mut self, question_id: &str, value: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_known(question_id)?;
        self.state.answers.set(question_id, value);
        Ok(())
    }

    /// In-place editing buffer for an answer, created on first touch.
    pub fn answer_mut(&mut self, question_id: &str) -> Result<&mut String, WizardError> {
        self.ensure_known(question_id)?;
        Ok(self.state.answers.entry_mut(question_id))
    }

    fn ensure_known(&self, question_id: &str) -> Result<(), WizardError> {
        match self.catalog.question(question_id) {
            Some(_) => Ok(()),
            None => Err(WizardError::UnknownQuestion(question_id.to_string())),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance one section. `Ok(None)` at the last section.
    pub fn go_next(&mut self) -> Result<Option<WizardEvent>, WizardError> {
        self.ensure_editing()?;
        if self.is_last_section() {
            return Ok(None);
        }
        if self.state.section_index == 0 && !self.has_name() {
            return Err(WizardError::NameRequired);
        }
        Ok(Some(self.move_to(self.state.section_index + 1)))
    }

    /// Step back one section. `Ok(None)` at section 0.
    pub fn go_back(&mut self) -> Result<Option<WizardEvent>, WizardError> {
        self.ensure_editing()?;
        if self.state.section_index == 0 {
            return Ok(None);
        }
        Ok(Some(self.move_to(self.state.section_index - 1)))
    }

    /// Direct navigation from the section picker. No name gating.
    pub fn jump_to(&mut self, index: usize) -> Result<Option<WizardEvent>, WizardError> {
        self.ensure_editing()?;
        if index >= self.catalog.len() {
            return Err(WizardError::InvalidSection {
                index,
                len: self.catalog.len(),
            });
        }
        if index == self.state.section_index {
            return Ok(None);
        }
        Ok(Some(self.move_to(index)))
    }

    pub fn submit(&mut self) -> Result<WizardEvent, WizardError> {
        self.submit_at(Local::now().naive_local())
    }

    /// Submit with an explicit local timestamp for the digest header.
    pub fn submit_at(&mut self, now: NaiveDateTime) -> Result<WizardEvent, WizardError> {
        self.ensure_editing()?;
        if !self.is_last_section() {
            return Err(WizardError::NotOnLastSection);
        }
        if !self.has_name() {
            return Err(WizardError::NameRequired);
        }
        self.state.submitted = true;
        self.state.submitted_at = Some(now);
        Ok(WizardEvent::Submitted {
            answered: self.state.answers.answered_count(),
            total: self.catalog.question_count(),
            at: Utc::now(),
        })
    }

    /// Leave the completion screen. Index, name and answers are kept.
    pub fn edit_again(&mut self) -> Option<WizardEvent> {
        if !self.state.submitted {
            return None;
        }
        self.state.submitted = false;
        Some(WizardEvent::EditResumed {
            section_index: self.state.section_index,
            at: Utc::now(),
        })
    }

    /// Claim the export slot.
    pub fn begin_export(&mut self) -> Result<WizardEvent, WizardError> {
        if !self.state.submitted {
            return Err(WizardError::NotSubmitted);
        }
        if self.state.exporting {
            return Err(WizardError::ExportInProgress);
        }
        self.state.exporting = true;
        Ok(WizardEvent::ExportStarted { at: Utc::now() })
    }

    /// Release the export slot. Called for every outcome.
    pub fn finish_export(&mut self) {
        self.state.exporting = false;
    }

    fn ensure_editing(&self) -> Result<(), WizardError> {
        if self.state.submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        Ok(())
    }

    fn move_to(&mut self, index: usize) -> WizardEvent {
        let from = self.state.section_index;
        self.state.section_index = index;
        WizardEvent::SectionChanged {
            from,
            to: index,
            at: Utc::now(),
        }
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(Catalog::week1())
    }
}
