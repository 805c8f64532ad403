use serde::{Deserialize, Serialize};

/// Document styling configuration for exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Calibri").
    pub body_font: String,

    /// Font for the title (e.g. "Arial").
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Title font size in points.
    pub title_size: usize,

    /// Section heading font size in points.
    pub heading_size: usize,

    /// Fill colour of section heading rows, as RGB hex.
    pub heading_fill: String,

    /// Widest an embedded photograph may be, in inches.
    pub max_image_width_inches: f64,

    /// Tallest an embedded photograph may be, in inches.
    pub max_image_height_inches: f64,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Arial".to_string(),
            body_size: 10,
            title_size: 16,
            heading_size: 11,
            heading_fill: "1F4E79".to_string(),
            max_image_width_inches: 6.0,
            max_image_height_inches: 4.5,
        }
    }
}
