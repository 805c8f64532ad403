use std::path::{Path, PathBuf};

use crossing_bedrock::narrate::{NarrativeService, or_warning};
use crossing_core::models::attachment::{NewAttachment, media_type_for_filename};
use crossing_core::models::document::{AssessmentDocument, sanitize_file_stem};
use crossing_core::models::value::FieldValue;
use crossing_core::projection::{self, condition_score, narrative, report_images, tabular};
use crossing_export::docx::{ReportInput, generate_report_docx};
use crossing_export::render::{SummaryPromptContext, render_summary_instruction};
use crossing_export::styles::DocumentStyles;
use crossing_schema::{CROSSING_ID, FINAL_SUMMARY, FormSchema};
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::Session;

/// Outcome of reading one selected file.
#[derive(Debug)]
pub struct AttachOutcome {
    pub path: PathBuf,
    pub result: Result<(), AppError>,
}

/// Read files from disk and attach every readable one to `field_id`, in the
/// order given. A file that cannot be read is reported and skipped; the
/// rest of the batch is still attached.
pub async fn attach_paths(
    session: &Session,
    field_id: &str,
    paths: &[PathBuf],
) -> Result<Vec<AttachOutcome>, AppError> {
    FormSchema::bridge_crossing().require_file_field(field_id)?;

    let mut files = Vec::new();
    let mut outcomes = Vec::with_capacity(paths.len());

    for path in paths {
        match read_attachment(path).await {
            Ok(file) => {
                files.push(file);
                outcomes.push(AttachOutcome {
                    path: path.clone(),
                    result: Ok(()),
                });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read attachment");
                outcomes.push(AttachOutcome {
                    path: path.clone(),
                    result: Err(e),
                });
            }
        }
    }

    if !files.is_empty() {
        session.store.lock().await.attach_files(field_id, files);
    }
    Ok(outcomes)
}

async fn read_attachment(path: &Path) -> Result<NewAttachment, AppError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::io(path, e))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());
    let media_type = media_type_for_filename(&filename).to_string();
    Ok(NewAttachment {
        filename,
        content,
        media_type,
    })
}

/// Write a document as pretty JSON via a temp file and rename.
pub async fn write_document(path: &Path, document: &AssessmentDocument) -> Result<(), AppError> {
    let bytes = document.to_json_pretty()?;
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &bytes)
        .await
        .map_err(|e| AppError::io(&tmp_path, e))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| AppError::io(path, e))?;
    Ok(())
}

/// Save the session under `dir` as `<crossing-id>_<date>.json`.
pub async fn save(
    session: &Session,
    dir: &Path,
    today: jiff::civil::Date,
) -> Result<PathBuf, AppError> {
    let document = session.store.lock().await.snapshot();
    let path = dir.join(document.save_file_name(today));
    write_document(&path, &document).await?;
    info!(path = %path.display(), "assessment saved");
    Ok(path)
}

/// Load a saved document into the session. Nothing is applied unless the
/// whole file reads and parses.
pub async fn open(session: &Session, path: &Path) -> Result<(), AppError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::io(path, e))?;
    let document = AssessmentDocument::from_slice(&bytes)?;
    session.store.lock().await.restore(document);
    info!(path = %path.display(), "assessment opened");
    Ok(())
}

/// Knobs for [`generate_report`].
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Copy the generated summary back into the live store so a later save
    /// keeps it. Warning text is never written back.
    pub write_back_summary: bool,
    pub styles: DocumentStyles,
    pub today: Option<jiff::civil::Date>,
}

#[derive(Debug)]
pub struct GeneratedReport {
    pub bytes: Vec<u8>,
    pub file_name: String,
    /// Prose that replaced the final-summary row, or the warning that stood in for it.
    pub summary: String,
    pub summary_generated: bool,
}

/// Produce the DOCX report for the current session.
///
/// Only one generation may be outstanding per session; a second call while
/// one is running returns [`AppError::ReportInFlight`]. The store is read
/// once up front and not locked while the model is called.
pub async fn generate_report<N: NarrativeService>(
    session: &Session,
    narrator: &N,
    options: &ReportOptions,
) -> Result<GeneratedReport, AppError> {
    let _gate = session
        .report_gate
        .try_lock()
        .map_err(|_| AppError::ReportInFlight)?;

    let schema = FormSchema::bridge_crossing();
    let document = session.store.lock().await.snapshot();
    let today = options.today.unwrap_or_else(|| jiff::Zoned::now().date());

    let text = narrative(schema, &document);
    let score = condition_score(schema, &document);
    let instruction = render_summary_instruction(&SummaryPromptContext {
        crossing_id: text_value(&document, CROSSING_ID)
            .unwrap_or_else(|| "(unidentified)".to_string()),
        town: text_value(&document, "town"),
        condition_score: score,
        existing_summary: text_value(&document, FINAL_SUMMARY),
    })?;

    let result = narrator.generate(&instruction, &text).await;
    let summary_generated = result.is_ok();
    let summary = or_warning(result, "Final summary");

    let mut report_document = document.clone();
    report_document
        .values
        .insert(FINAL_SUMMARY.to_string(), FieldValue::Text(summary.clone()));

    let input = ReportInput {
        title: report_title(&document),
        subtitle: report_subtitle(&document, score, today),
        rows: tabular(schema, &report_document),
        images: report_images(schema, &document),
    };
    let bytes = generate_report_docx(&input, &options.styles)?;

    if options.write_back_summary && summary_generated {
        session.store.lock().await.set(FINAL_SUMMARY, summary.clone());
    }

    let file_name = report_file_name(&document, today);
    info!(
        file_name = %file_name,
        rows = input.rows.len(),
        images = input.images.len(),
        summary_generated,
        "report generated"
    );

    Ok(GeneratedReport {
        bytes,
        file_name,
        summary,
        summary_generated,
    })
}

/// Alternative phrasings for a piece of inspector text. On failure the
/// only entry is a warning.
pub async fn improve_text<N: NarrativeService>(narrator: &N, text: &str) -> Vec<String> {
    match narrator.improve(text).await {
        Ok(alternatives) => alternatives,
        Err(e) => vec![or_warning(Err(e), "Suggested wording")],
    }
}

/// Display text of a declared field, if it holds a non-empty value.
fn text_value(document: &AssessmentDocument, key: &str) -> Option<String> {
    let field = FormSchema::bridge_crossing().field(key)?;
    document
        .get(key)
        .and_then(|v| projection::display_value(field, v))
}

fn report_title(document: &AssessmentDocument) -> String {
    match text_value(document, CROSSING_ID) {
        Some(id) => format!("Bridge Crossing Inspection Report: {id}"),
        None => "Bridge Crossing Inspection Report".to_string(),
    }
}

fn report_subtitle(
    document: &AssessmentDocument,
    score: u32,
    today: jiff::civil::Date,
) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(bridge) = text_value(document, "bridge-name") {
        lines.push(bridge);
    }
    if let Some(date) = text_value(document, "inspection-date") {
        lines.push(format!("Inspected {date}"));
    }
    if let Some(inspector) = text_value(document, "inspector") {
        lines.push(format!("Inspector: {inspector}"));
    }
    lines.push(format!("Condition Score: {score}"));
    lines.push(format!("Generated {}", today.strftime("%Y-%m-%d")));
    lines
}

/// `<crossing-id>_<date>_report.docx`.
pub fn report_file_name(document: &AssessmentDocument, today: jiff::civil::Date) -> String {
    let crossing = text_value(document, CROSSING_ID)
        .map(|s| sanitize_file_stem(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "crossing".to_string());
    format!("{crossing}_{}_report.docx", today.strftime("%Y-%m-%d"))
}
