use std::sync::LazyLock;

use crate::field::{FieldDescriptor, FieldKind};
use crate::FormSection;

/// How the pipe is carried across the bridge and how it accommodates movement.
pub struct Support;

impl FormSection for Support {
    fn id(&self) -> &str {
        "support"
    }

    fn title(&self) -> &str {
        "Support & Attachment"
    }

    fn fields(&self) -> &[FieldDescriptor] {
        static FIELDS: LazyLock<Vec<FieldDescriptor>> = LazyLock::new(|| {
            vec![
                FieldDescriptor::new("support-method", "Primary Support Method", FieldKind::Select)
                    .with_options(&[
                        ("hangers", "Hangers from Bridge Structure"),
                        ("brackets", "Brackets on Bridge Fascia"),
                        ("rollers", "Rollers on Bridge Deck"),
                        ("in-deck", "Conduit Within Bridge Deck"),
                        ("independent", "Independent Pipe Bridge"),
                    ]),
                FieldDescriptor::new("support-spacing", "Support Spacing (In Feet)", FieldKind::Numeric)
                    .with_source(),
                FieldDescriptor::new("support-condition", "Support Condition", FieldKind::SingleGroup)
                    .with_scored_options(&[
                        ("good", "Good", 0),
                        ("fair", "Fair", 1),
                        ("poor", "Poor", 3),
                    ]),
                FieldDescriptor::new("bend-locations", "Bend Locations", FieldKind::MultiGroup)
                    .with_options(&[
                        ("vertical-water", "Vertical Bend Over Water"),
                        ("vertical-abutment", "Vertical Bend at Abutment"),
                        ("horizontal-water", "Horizontal Bend Over Water"),
                        ("horizontal-abutment", "Horizontal Bend at Abutment"),
                    ]),
                FieldDescriptor::new("expansion", "Expansion Provisions", FieldKind::MultiGroup)
                    .with_options(&[
                        ("loop", "Expansion Loop"),
                        ("joint", "Expansion Joint"),
                        ("offset", "Offset"),
                        ("none", "None Observed"),
                    ]),
            ]
        });
        &FIELDS
    }
}
