use std::io::Cursor;

use crossing_core::projection::{ReportImage, TableRow};
use crossing_export::docx::{ReportInput, fit_emu, generate_report_docx};
use crossing_export::render::{SummaryPromptContext, render_summary_instruction, render_template};
use crossing_export::styles::DocumentStyles;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([120, 90, 60]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    buf
}

fn sample_input(images: Vec<ReportImage>) -> ReportInput {
    ReportInput {
        title: "Bridge Crossing Inspection: BR-104".to_string(),
        subtitle: vec!["Inspection Date: 2026-05-02".to_string()],
        rows: vec![
            TableRow::Heading {
                title: "General Information".to_string(),
            },
            TableRow::Field {
                label: "Crossing ID".to_string(),
                value: "BR-104".to_string(),
            },
            TableRow::Field {
                label: "Final Summary".to_string(),
                value: "Line one.\nLine two.".to_string(),
            },
        ],
        images,
    }
}

#[test]
fn report_is_a_zip_package() {
    let bytes = generate_report_docx(&sample_input(Vec::new()), &DocumentStyles::default())
        .expect("renders");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn undecodable_images_are_skipped() {
    let images = vec![
        ReportImage {
            field_id: "overview-photos".to_string(),
            caption: "Crossing Overview: good.png".to_string(),
            media_type: "image/png".to_string(),
            content: png_bytes(8, 6),
        },
        ReportImage {
            field_id: "defect-photos".to_string(),
            caption: "Defects: broken.jpg".to_string(),
            media_type: "image/jpeg".to_string(),
            content: vec![0xff, 0xd8, 0x00],
        },
    ];
    let bytes = generate_report_docx(&sample_input(images), &DocumentStyles::default())
        .expect("a bad image does not fail the report");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn small_images_keep_natural_size() {
    let styles = DocumentStyles::default();
    assert_eq!(fit_emu(100, 50, &styles), (952_500, 476_250));
}

#[test]
fn large_images_fit_the_box() {
    let styles = DocumentStyles::default();
    let (w, h) = fit_emu(4000, 3000, &styles);
    assert!(w <= 5_486_400);
    assert!(h <= 4_114_800);
    // 4:3 preserved within rounding
    assert!((w as f64 / h as f64 - 4.0 / 3.0).abs() < 1e-3);
}

#[test]
fn summary_instruction_includes_context() {
    let text = render_summary_instruction(&SummaryPromptContext {
        crossing_id: "BR-104".to_string(),
        town: Some("Lee".to_string()),
        condition_score: 7,
        existing_summary: None,
    })
    .expect("renders");
    assert!(text.contains("crossing BR-104 in Lee."));
    assert!(text.contains("condition score is 7"));
    assert!(!text.contains("draft summary"));
}

#[test]
fn summary_instruction_omits_absent_parts() {
    let text = render_summary_instruction(&SummaryPromptContext {
        crossing_id: "BR-1".to_string(),
        town: None,
        condition_score: 0,
        existing_summary: Some("Supports are sound.".to_string()),
    })
    .expect("renders");
    assert!(text.contains("crossing BR-1."));
    assert!(!text.contains("condition score"));
    assert!(text.contains("\"Supports are sound.\""));
}

#[test]
fn bad_template_is_a_parse_error() {
    let err = render_template("t", "{% if %}", &serde_json::json!({})).expect_err("invalid");
    assert!(matches!(err, crossing_export::error::ExportError::TemplateParse(_)));
}
