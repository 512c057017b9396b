use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row snapshot carried by a change notification from the hosted datastore.
/// Shape mirrors the webhook's `record` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub filename: String,
    pub project_id: Option<Uuid>,
    pub doc_type: Option<String>,
    pub processed: Option<bool>,
    pub summary: Option<String>,
}

impl DocumentRecord {
    /// Duplicate-notification guard: anything already processed or already
    /// summarized is a no-op for the consumer.
    pub fn already_handled(&self) -> bool {
        self.processed.unwrap_or(false) || self.summary.is_some()
    }
}

/// Table-change notification, decoupled from its transport. The webhook route
/// and any future push subscription both reduce to these events.
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    DocumentCreated(DocumentRecord),
}

#[derive(Debug)]
pub enum ChangeQueueError {
    QueueClosed,
}

impl std::fmt::Display for ChangeQueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeQueueError::QueueClosed => write!(f, "Change queue is closed"),
        }
    }
}

impl std::error::Error for ChangeQueueError {}

#[async_trait]
pub trait ChangeQueue: Send + Sync {
    async fn enqueue(&self, event: ChangeEvent) -> Result<(), ChangeQueueError>;
}
