use std::sync::LazyLock;

use crate::field::{FieldDescriptor, FieldKind};
use crate::FormSection;

pub struct Photos;

impl FormSection for Photos {
    fn id(&self) -> &str {
        "photos"
    }

    fn title(&self) -> &str {
        "Photographs"
    }

    fn fields(&self) -> &[FieldDescriptor] {
        static FIELDS: LazyLock<Vec<FieldDescriptor>> = LazyLock::new(|| {
            vec![
                FieldDescriptor::new("overview-photos", "Crossing Overview", FieldKind::Files),
                FieldDescriptor::new("support-photos", "Supports", FieldKind::Files),
                FieldDescriptor::new("defect-photos", "Defects", FieldKind::Files),
            ]
        });
        &FIELDS
    }
}
