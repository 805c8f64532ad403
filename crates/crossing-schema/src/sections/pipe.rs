use std::sync::LazyLock;

use crate::field::{FieldDescriptor, FieldKind};
use crate::FormSection;

/// Physical description of the carrier pipe.
pub struct Pipe;

impl FormSection for Pipe {
    fn id(&self) -> &str {
        "pipe"
    }

    fn title(&self) -> &str {
        "Pipe Information"
    }

    fn fields(&self) -> &[FieldDescriptor] {
        static FIELDS: LazyLock<Vec<FieldDescriptor>> = LazyLock::new(|| {
            vec![
                FieldDescriptor::new("pipe-material", "Pipe Material", FieldKind::Select)
                    .with_scored_options(&[
                        ("steel", "Coated Steel", 0),
                        ("bare-steel", "Bare Steel", 2),
                        ("cast-iron", "Cast Iron", 3),
                        ("plastic", "Plastic (PE) in Casing", 1),
                    ]),
                FieldDescriptor::new("pipe-diameter", "Pipe Diameter (In Inches)", FieldKind::Numeric)
                    .with_source(),
                FieldDescriptor::new("wall-thickness", "Wall Thickness (In Inches)", FieldKind::Numeric)
                    .with_source(),
                FieldDescriptor::new("installation-year", "Installation Year", FieldKind::Numeric)
                    .with_source(),
                FieldDescriptor::new(
                    "installation-temp",
                    "Installation Temperature (In Deg F.)",
                    FieldKind::Numeric,
                )
                .with_source(),
                FieldDescriptor::new("maop", "MAOP (psig)", FieldKind::Numeric).with_source(),
                FieldDescriptor::new("casing", "Casing", FieldKind::SingleGroup).with_options(&[
                    ("cased", "Cased"),
                    ("uncased", "Uncased"),
                ]),
            ]
        });
        &FIELDS
    }
}
