use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Every successful wizard transition produces an Event.
/// The front end logs them; nothing else consumes them yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WizardEvent {
    SectionChanged {
        from: usize,
        to: usize,
        at: DateTime<Utc>,
    },
    Submitted {
        answered: usize,
        total: usize,
        at: DateTime<Utc>,
    },
    EditResumed {
        section_index: usize,
        at: DateTime<Utc>,
    },
    ExportStarted {
        at: DateTime<Utc>,
    },
    ExportFinished {
        path: PathBuf,
        at: DateTime<Utc>,
    },
    ExportFailed {
        message: String,
        at: DateTime<Utc>,
    },
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::SectionChanged { .. } => "section_changed",
            WizardEvent::Submitted { .. } => "submitted",
            WizardEvent::EditResumed { .. } => "edit_resumed",
            WizardEvent::ExportStarted { .. } => "export_started",
            WizardEvent::ExportFinished { .. } => "export_finished",
            WizardEvent::ExportFailed { .. } => "export_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = WizardEvent::SectionChanged {
            from: 0,
            to: 1,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SectionChanged");
        assert_eq!(json["to"], 1);
        assert_eq!(event.name(), "section_changed");
    }
}
