pub mod change_queue;
pub mod document_extractor;
pub mod file_storage;
pub mod summarizer;

pub use change_queue::ChangeQueue;
pub use document_extractor::DocumentExtractor;
pub use file_storage::FileStorage;
pub use summarizer::Summarizer;
