//! Scripted fill for `digest` and `export`: set the name and answers, move
//! to the last section and submit, as the interactive session would.

use clap::Args;
use std::path::PathBuf;

use vsg_assessment_core::{
    export_document, render_digest, Config, DocumentRenderer, ExportRequest, WizardController,
    WizardError,
};

#[derive(Args)]
pub struct FillArgs {
    /// Respondent name
    #[arg(long)]
    pub name: String,
    /// Answer as question id and text, repeatable
    #[arg(long = "answer", value_name = "ID=VALUE", value_parser = parse_answer)]
    pub answers: Vec<(String, String)>,
}

fn parse_answer(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => {
            Ok((id.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected ID=VALUE, got `{raw}`")),
    }
}

/// Build a submitted wizard from the arguments.
pub fn submitted_wizard(args: &FillArgs) -> Result<WizardController, WizardError> {
    let mut wizard = WizardController::default();
    wizard.set_name(args.name.as_str());
    for (id, value) in &args.answers {
        wizard.set_answer(id, value.as_str())?;
    }
    let last = wizard.catalog().len().saturating_sub(1);
    wizard.jump_to(last)?;
    let event = wizard.submit()?;
    tracing::debug!(event = event.name(), detail = ?event, "wizard event");
    Ok(wizard)
}

pub fn digest(args: FillArgs) -> Result<(), Box<dyn std::error::Error>> {
    let wizard = submitted_wizard(&args)?;
    let submitted_at = wizard
        .submitted_at()
        .ok_or(WizardError::NotSubmitted)?;
    let text = render_digest(
        wizard.respondent_name(),
        submitted_at,
        &wizard.catalog(),
        wizard.answers(),
    );
    print!("{text}");
    Ok(())
}

pub fn export(
    args: FillArgs,
    out: Option<PathBuf>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wizard = submitted_wizard(&args)?;
    let directory = out.unwrap_or_else(|| config.export.directory.clone());
    let renderer = DocumentRenderer::new(config.document_options());

    wizard.begin_export()?;
    let request = ExportRequest::from_wizard(&wizard);
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(export_document(renderer, request, &directory));
    wizard.finish_export();

    let path = result?;
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str, answers: &[(&str, &str)]) -> FillArgs {
        FillArgs {
            name: name.to_string(),
            answers: answers
                .iter()
                .map(|(id, v)| (id.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn parses_answer_pairs() {
        assert_eq!(
            parse_answer("core4_list=a=b").unwrap(),
            ("core4_list".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_answer("confused=").unwrap(),
            ("confused".to_string(), String::new())
        );
        assert!(parse_answer("no-separator").is_err());
        assert!(parse_answer("=value").is_err());
    }

    #[test]
    fn fills_and_submits() {
        let wizard = submitted_wizard(&args("Ada Lovelace", &[("confused", "Nothing")])).unwrap();
        assert!(wizard.is_submitted());
        assert!(wizard.is_last_section());
        assert_eq!(wizard.answer("confused"), Some("Nothing"));
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            submitted_wizard(&args("   ", &[])),
            Err(WizardError::NameRequired)
        ));
    }

    #[test]
    fn unknown_question_is_rejected() {
        assert!(matches!(
            submitted_wizard(&args("Ada", &[("nope", "x")])),
            Err(WizardError::UnknownQuestion(id)) if id == "nope"
        ));
    }
}
