pub mod condition;
pub mod general;
pub mod photos;
pub mod pipe;
pub mod summary;
pub mod support;
