mod controller;

pub use controller::{SectionStatus, WizardController, WizardState};
