pub mod document;
pub mod project;

pub use document::{DocType, Document};
pub use project::Project;
