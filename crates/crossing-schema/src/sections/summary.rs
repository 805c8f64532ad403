use std::sync::LazyLock;

use crate::field::{FieldDescriptor, FieldKind};
use crate::{FormSection, FINAL_SUMMARY};

pub struct Summary;

impl FormSection for Summary {
    fn id(&self) -> &str {
        "summary"
    }

    fn title(&self) -> &str {
        "Summary"
    }

    fn fields(&self) -> &[FieldDescriptor] {
        static FIELDS: LazyLock<Vec<FieldDescriptor>> = LazyLock::new(|| {
            vec![
                FieldDescriptor::new("recommendation", "Recommendation", FieldKind::Select)
                    .with_scored_options(&[
                        ("no-action", "No Action Required", 0),
                        ("monitor", "Monitor at Next Inspection", 1),
                        ("repair", "Repair Within 12 Months", 3),
                        ("replace", "Replace / Relocate", 5),
                    ]),
                FieldDescriptor::new(FINAL_SUMMARY, "Final Summary", FieldKind::LongText),
            ]
        });
        &FIELDS
    }
}
