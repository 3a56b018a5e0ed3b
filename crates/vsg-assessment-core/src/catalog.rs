//! The fixed question catalog.
//!
//! Sections and questions are `const` data. Question ids are the keys of the
//! answer map and must stay stable across releases.

use serde::Serialize;

/// Input kind for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Single-line answer.
    ShortText,
    /// Multi-line answer.
    LongText,
}

/// A single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: QuestionKind,
}

/// A wizard step. An empty question list marks an informational step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub questions: &'static [Question],
}

impl Section {
    pub fn is_informational(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Ordered sections shown by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Catalog {
    sections: &'static [Section],
}

impl Catalog {
    pub const fn new(sections: &'static [Section]) -> Self {
        Self { sections }
    }

    /// The Week 1 catalog.
    pub const fn week1() -> Self {
        WEEK1
    }

    pub fn sections(&self) -> &'static [Section] {
        self.sections
    }

    pub fn section(&self, index: usize) -> Option<&'static Section> {
        self.sections.get(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// All questions in catalog order.
    pub fn questions(&self) -> impl Iterator<Item = &'static Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn question(&self, id: &str) -> Option<&'static Question> {
        self.questions().find(|q| q.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.questions().count()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::week1()
    }
}

const fn short(id: &'static str, label: &'static str) -> Question {
    Question {
        id,
        label,
        kind: QuestionKind::ShortText,
    }
}

const fn long(id: &'static str, label: &'static str) -> Question {
    Question {
        id,
        label,
        kind: QuestionKind::LongText,
    }
}

const WEEK1: Catalog = Catalog::new(&[
    Section {
        title: "Welcome",
        questions: &[],
    },
    Section {
        title: "Part A: The Core 4 Framework",
        questions: &[
            long("core4_list", "1. What are the four parts of VSG's Core 4 framework? List them."),
            short("core4_generate", "2a. For Generate Power, name one specific service VSG offers:"),
            short("core4_store", "2b. For Store Power, name one specific service VSG offers:"),
            short("core4_upgrade", "2c. For Upgrade Power, name one specific service VSG offers:"),
            short("core4_maintain", "2d. For Maintain Power, name one specific service VSG offers:"),
            long(
                "core4_scenario",
                "3. A homeowner wants to keep the lights on during power outages. Which Core 4 areas are most relevant and why?",
            ),
        ],
    },
    Section {
        title: "Part B: Understanding VSG",
        questions: &[
            long("vsg_different", "4. In your own words, what makes VSG different from other solar companies?"),
            long(
                "kyle_vision",
                "5. Who is Kyle (the founder)? What's one thing from your research or the interview that stood out about his vision?",
            ),
            long("vsg_services", "6. What services does VSG offer beyond solar panels? Name at least two."),
        ],
    },
    Section {
        title: "Part C: The Internship Program",
        questions: &[
            long("weeks1_4_skill", "7. What is the core skill we're building in Weeks 1-4? Why does it matter?"),
            long(
                "your_role",
                "8. What is YOUR assigned role on the team? What does that mean you're responsible for?",
            ),
            long(
                "week6_deliverable",
                "9. What's one concrete deliverable you'll create by Week 6 that will be live on VSG's website?",
            ),
        ],
    },
    Section {
        title: "Part D: Copywriting Fundamentals",
        questions: &[
            long(
                "harry_dry",
                "10. From the Harry Dry video, what's ONE principle of good copywriting that stuck with you? Explain it.",
            ),
            short("feature_example", "11a. What's a FEATURE of solar panels?"),
            short("benefit_example", "11b. What's the BENEFIT of that feature for the homeowner?"),
        ],
    },
    Section {
        title: "Bonus",
        questions: &[long(
            "confused",
            "What's one thing about VSG or the program you're still confused about? (No wrong answers here—this helps us.)",
        )],
    },
]);
