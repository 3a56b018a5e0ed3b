use vsg_assessment_core::Config;

use crate::tui;

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tui::run(config)
}
