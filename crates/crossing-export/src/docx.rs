use std::io::Cursor;

use crossing_core::projection::{ReportImage, TableRow};
use docx_rs::{
    AlignmentType, BreakType, Docx, Paragraph, Pic, Run, RunFonts, Shading, Style, StyleType,
    Table, TableCell, TableRow as DocxRow, WidthType,
};
use tracing::{info, warn};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// English Metric Units per inch and per (96 dpi) pixel.
const EMU_PER_INCH: f64 = 914_400.0;
const EMU_PER_PIXEL: f64 = 9_525.0;

/// Table column widths in twentieths of a point (2.5" / 4").
const LABEL_COLUMN: usize = 3_600;
const VALUE_COLUMN: usize = 5_760;

/// Everything the renderer needs for one report.
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub title: String,
    /// Lines printed under the title (date, inspector, score).
    pub subtitle: Vec<String>,
    pub rows: Vec<TableRow>,
    pub images: Vec<ReportImage>,
}

/// Render the inspection report as DOCX bytes.
///
/// Layout: title and subtitle lines, the two-column field table with each
/// section heading spanning both columns, then a photographs section with
/// one captioned image per paragraph. Images that cannot be decoded are
/// left out with a warning rather than failing the report.
pub fn generate_report_docx(
    input: &ReportInput,
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .size(styles.title_size * 2) // OOXML uses half-points
                .bold(),
        )
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("heading 1")
                .size(styles.heading_size * 2)
                .bold(),
        );

    docx = docx.add_paragraph(
        Paragraph::new()
            .style("Title")
            .align(AlignmentType::Center)
            .add_run(
                Run::new()
                    .add_text(&input.title)
                    .fonts(RunFonts::new().ascii(&styles.heading_font)),
            ),
    );
    for line in &input.subtitle {
        docx = docx.add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(body_run(line, styles)),
        );
    }
    docx = docx.add_paragraph(Paragraph::new());

    if !input.rows.is_empty() {
        docx = docx.add_table(field_table(&input.rows, styles));
    }

    let mut embedded = 0usize;
    if !input.images.is_empty() {
        docx = docx
            .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
            .add_paragraph(
                Paragraph::new()
                    .style("Heading1")
                    .add_run(Run::new().add_text("Photographs")),
            );

        for image in &input.images {
            match picture(image, styles) {
                Ok(pic) => {
                    docx = docx
                        .add_paragraph(
                            Paragraph::new()
                                .align(AlignmentType::Center)
                                .add_run(Run::new().add_image(pic)),
                        )
                        .add_paragraph(
                            Paragraph::new()
                                .align(AlignmentType::Center)
                                .add_run(body_run(&image.caption, styles).italic()),
                        );
                    embedded += 1;
                }
                Err(e) => {
                    warn!(field_id = %image.field_id, caption = %image.caption, error = %e, "skipping image");
                }
            }
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    info!(
        rows = input.rows.len(),
        images = embedded,
        "report document generated"
    );
    Ok(buf.into_inner())
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Value paragraph; embedded newlines become line breaks.
fn value_paragraph(value: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new();
    for (i, line) in value.lines().enumerate() {
        if i > 0 {
            para = para.add_run(Run::new().add_break(BreakType::TextWrapping));
        }
        para = para.add_run(body_run(line, styles));
    }
    para
}

fn field_table(rows: &[TableRow], styles: &DocumentStyles) -> Table {
    let docx_rows: Vec<DocxRow> = rows
        .iter()
        .map(|row| match row {
            TableRow::Heading { title } => DocxRow::new(vec![
                TableCell::new()
                    .grid_span(2)
                    .shading(Shading::new().fill(&styles.heading_fill))
                    .add_paragraph(
                        Paragraph::new().add_run(
                            Run::new()
                                .add_text(title)
                                .bold()
                                .color("FFFFFF")
                                .size(styles.heading_size * 2)
                                .fonts(RunFonts::new().ascii(&styles.heading_font)),
                        ),
                    ),
            ]),
            TableRow::Field { label, value } => DocxRow::new(vec![
                TableCell::new()
                    .width(LABEL_COLUMN, WidthType::Dxa)
                    .add_paragraph(Paragraph::new().add_run(body_run(label, styles).bold())),
                TableCell::new()
                    .width(VALUE_COLUMN, WidthType::Dxa)
                    .add_paragraph(value_paragraph(value, styles)),
            ]),
        })
        .collect();

    Table::new(docx_rows).set_grid(vec![LABEL_COLUMN, VALUE_COLUMN])
}

/// Decode, re-encode as PNG, and size a photograph to fit the page box.
fn picture(image: &ReportImage, styles: &DocumentStyles) -> Result<Pic, ExportError> {
    let decoded = image::load_from_memory(&image.content)?;
    let (width_px, height_px) = (decoded.width(), decoded.height());
    if width_px == 0 || height_px == 0 {
        return Err(ExportError::Image("empty image".to_string()));
    }

    let mut png = Vec::new();
    decoded.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;

    let (width_emu, height_emu) = fit_emu(width_px, height_px, styles);
    Ok(Pic::new_with_dimensions(png, width_px, height_px).size(width_emu, height_emu))
}

/// Scale pixel dimensions into the configured maximum box, preserving
/// aspect ratio and never enlarging.
pub fn fit_emu(width_px: u32, height_px: u32, styles: &DocumentStyles) -> (u32, u32) {
    let natural_w = width_px as f64 * EMU_PER_PIXEL;
    let natural_h = height_px as f64 * EMU_PER_PIXEL;
    let max_w = styles.max_image_width_inches * EMU_PER_INCH;
    let max_h = styles.max_image_height_inches * EMU_PER_INCH;

    let scale = (max_w / natural_w).min(max_h / natural_h).min(1.0);
    (
        (natural_w * scale).round() as u32,
        (natural_h * scale).round() as u32,
    )
}
