pub mod document_repository;
pub mod project_repository;

pub use document_repository::DocumentRepository;
pub use project_repository::ProjectRepository;
