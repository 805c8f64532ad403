use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;

/// Instruction given to the narrative model for the report's final summary.
pub const SUMMARY_INSTRUCTION: &str = "\
Write a concise final summary (one to three paragraphs) for the inspection of \
crossing {{ crossing_id }}{% if town %} in {{ town }}{% endif %}. \
Describe how the pipe is supported, its observed condition, and the recommended action. \
{% if condition_score > 0 %}The computed condition score is {{ condition_score }}; higher scores indicate more concern. {% endif %}\
{% if existing_summary %}The inspector's own draft summary is: \"{{ existing_summary }}\". Preserve its conclusions.{% endif %}";

/// Variables available to [`SUMMARY_INSTRUCTION`].
#[derive(Debug, Clone, Serialize)]
pub struct SummaryPromptContext {
    pub crossing_id: String,
    pub town: Option<String>,
    pub condition_score: u32,
    pub existing_summary: Option<String>,
}

/// Render a Tera template with any serializable context.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
/// The context's fields become the template variables.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    context: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(context)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

pub fn render_summary_instruction(context: &SummaryPromptContext) -> Result<String, ExportError> {
    render_template("summary_instruction", SUMMARY_INSTRUCTION, context)
}
