//! Asynchronous document export.
//!
//! Rendering runs on tokio's blocking pool and the file is written with
//! `tokio::fs`. The caller owns the busy flag: claim it with
//! [`WizardController::begin_export`](crate::WizardController::begin_export)
//! before spawning and release it with `finish_export` once the future
//! settles, whatever the outcome.

use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

use crate::answers::AnswerMap;
use crate::catalog::Catalog;
use crate::document::{export_filename, DocumentRenderer};
use crate::error::{ExportError, Result};
use crate::wizard::WizardController;

/// Owned snapshot of what the document needs.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub name: String,
    pub catalog: Catalog,
    pub answers: AnswerMap,
    pub generated_at: NaiveDateTime,
}

impl ExportRequest {
    pub fn from_wizard(wizard: &WizardController) -> Self {
        Self {
            name: wizard.respondent_name().to_string(),
            catalog: wizard.catalog(),
            answers: wizard.answers().clone(),
            generated_at: Local::now().naive_local(),
        }
    }

    pub fn filename(&self) -> String {
        export_filename(&self.name, self.generated_at.date())
    }
}

/// Render the request and write it into `directory`. Returns the file path.
pub async fn export_document(
    renderer: DocumentRenderer,
    request: ExportRequest,
    directory: &Path,
) -> Result<PathBuf> {
    let path = directory.join(request.filename());
    tracing::info!(path = %path.display(), "rendering document");

    let bytes = tokio::task::spawn_blocking(move || {
        renderer.render(
            &request.name,
            request.generated_at,
            &request.catalog,
            &request.answers,
        )
    })
    .await
    .map_err(ExportError::from)?;

    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|source| ExportError::WriteFailed {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "document written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::NaiveDate;

    fn request(name: &str) -> ExportRequest {
        let mut answers = AnswerMap::new();
        answers.set("core4_list", "Line1\nLine2");
        ExportRequest {
            name: name.to_string(),
            catalog: Catalog::week1(),
            answers,
            generated_at: NaiveDate::from_ymd_opt(2026, 10, 14)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn request_snapshots_wizard() {
        let mut wizard = WizardController::default();
        wizard.set_name("Ada Lovelace");
        wizard.set_answer("confused", "Nothing").unwrap();
        let req = ExportRequest::from_wizard(&wizard);
        assert_eq!(req.name, "Ada Lovelace");
        assert_eq!(req.answers.get("confused"), Some("Nothing"));
        assert!(req.filename().starts_with("VSG_Assessment_Ada_Lovelace_"));
    }

    #[tokio::test]
    async fn writes_pdf_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_document(DocumentRenderer::default(), request("Ada Lovelace"), dir.path())
            .await
            .unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "VSG_Assessment_Ada_Lovelace_2026-10-14.pdf"
        );
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }

    #[tokio::test]
    async fn blank_name_exports_as_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_document(DocumentRenderer::default(), request(""), dir.path())
            .await
            .unwrap();
        assert!(path.ends_with("VSG_Assessment_Unknown_2026-10-14.pdf"));
    }

    #[tokio::test]
    async fn missing_directory_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = export_document(DocumentRenderer::default(), request("Ada"), &missing)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Export(ExportError::WriteFailed { .. })));
    }

    #[tokio::test]
    async fn failed_export_still_releases_flag() {
        let mut wizard = WizardController::default();
        wizard.set_name("Ada");
        wizard.jump_to(5).unwrap();
        wizard.submit().unwrap();
        wizard.begin_export().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let result = export_document(
            DocumentRenderer::default(),
            ExportRequest::from_wizard(&wizard),
            &dir.path().join("missing"),
        )
        .await;
        wizard.finish_export();

        assert!(result.is_err());
        assert!(!wizard.is_exporting());
        assert!(wizard.begin_export().is_ok());
    }
}
