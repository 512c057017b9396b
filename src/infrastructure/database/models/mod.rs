pub mod document_model;
pub mod project_model;

pub use document_model::DocumentModel;
pub use project_model::ProjectModel;
