use std::sync::LazyLock;

use crate::field::{FieldDescriptor, FieldKind};
use crate::FormSection;

/// Field observations of the pipe and its surroundings.
pub struct Condition;

impl FormSection for Condition {
    fn id(&self) -> &str {
        "condition"
    }

    fn title(&self) -> &str {
        "Condition Assessment"
    }

    fn fields(&self) -> &[FieldDescriptor] {
        static FIELDS: LazyLock<Vec<FieldDescriptor>> = LazyLock::new(|| {
            vec![
                FieldDescriptor::new("coating-condition", "Coating Condition", FieldKind::SingleGroup)
                    .with_scored_options(&[
                        ("good", "Good", 0),
                        ("fair", "Fair", 1),
                        ("poor", "Poor", 2),
                        ("none", "No Coating", 3),
                    ]),
                FieldDescriptor::new("corrosion", "Atmospheric Corrosion", FieldKind::SingleGroup)
                    .with_scored_options(&[
                        ("none", "None", 0),
                        ("light", "Light Surface Rust", 1),
                        ("moderate", "Moderate Scaling", 2),
                        ("severe", "Severe / Pitting", 4),
                    ]),
                FieldDescriptor::new("isolation", "Electrical Isolation Present", FieldKind::SingleGroup)
                    .with_options(&[("yes", "Yes"), ("no", "No"), ("unknown", "Unknown")]),
                FieldDescriptor::new("observed-damage", "Observed Damage", FieldKind::MultiGroup)
                    .with_scored_options(&[
                        ("dents", "Dents", 2),
                        ("gouges", "Gouges", 3),
                        ("missing-hardware", "Missing Support Hardware", 2),
                        ("debris", "Debris Accumulation", 1),
                        ("displacement", "Pipe Displacement", 3),
                    ]),
                FieldDescriptor::new(
                    "clearance",
                    "Clearance Above Water (In Feet)",
                    FieldKind::Numeric,
                )
                .with_source(),
                FieldDescriptor::new("field-notes", "Field Notes", FieldKind::LongText),
            ]
        });
        &FIELDS
    }
}
