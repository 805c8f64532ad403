use std::sync::LazyLock;

use crate::field::{FieldDescriptor, FieldKind};
use crate::{FormSection, DOC_SELECTOR};

/// Identification of the crossing and the operating company that owns it.
pub struct General;

const PRESSURE_SYSTEMS: &[(&str, &str, u32)] = &[
    ("lp", "Low Pressure (Under 1 psig)", 0),
    ("ip", "Intermediate Pressure (1-60 psig)", 1),
    ("hp", "High Pressure (Over 60 psig)", 2),
    ("transmission", "Transmission", 3),
];

impl FormSection for General {
    fn id(&self) -> &str {
        "general"
    }

    fn title(&self) -> &str {
        "General Information"
    }

    fn fields(&self) -> &[FieldDescriptor] {
        static FIELDS: LazyLock<Vec<FieldDescriptor>> = LazyLock::new(|| {
            vec![
                FieldDescriptor::new("crossing-id", "Crossing ID", FieldKind::ShortText),
                FieldDescriptor::new("inspection-date", "Inspection Date", FieldKind::Date),
                FieldDescriptor::new("inspector", "Inspector", FieldKind::ShortText),
                FieldDescriptor::new("town", "Town", FieldKind::ShortText),
                FieldDescriptor::new("bridge-name", "Bridge Name", FieldKind::ShortText),
                FieldDescriptor::new("feature-crossed", "Feature Crossed", FieldKind::ShortText),
                FieldDescriptor::new(DOC_SELECTOR, "Operating Company (DOC)", FieldKind::Select)
                    .with_options(&[
                        ("bng", "BNG"),
                        ("fge", "FGE"),
                        ("nu-nh", "NU/NH"),
                    ]),
                FieldDescriptor::new("bng", "BNG System", FieldKind::Select)
                    .with_scored_options(PRESSURE_SYSTEMS)
                    .gated(DOC_SELECTOR, "bng"),
                FieldDescriptor::new("fge", "FGE System", FieldKind::Select)
                    .with_scored_options(PRESSURE_SYSTEMS)
                    .gated(DOC_SELECTOR, "fge"),
                FieldDescriptor::new("nu-nh", "NU/NH System", FieldKind::Select)
                    .with_scored_options(PRESSURE_SYSTEMS)
                    .gated(DOC_SELECTOR, "nu-nh"),
            ]
        });
        &FIELDS
    }
}
