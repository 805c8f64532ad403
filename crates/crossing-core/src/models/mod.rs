pub mod attachment;
pub mod document;
pub mod value;
