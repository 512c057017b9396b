use std::sync::Arc;

use crate::application::ports::change_queue::ChangeEvent;
use crate::application::use_cases::HandleDocumentCreatedUseCase;
use crate::infrastructure::messaging::MpscChangeQueueReceiver;

/// Background drain of the change queue. Each document-created event runs the
/// same single-document use case the webhook route does, so the transport a
/// notification arrived over makes no difference to processing.
pub struct ChangeEventListener {
    receiver: Arc<MpscChangeQueueReceiver>,
    handle_document_created: Arc<HandleDocumentCreatedUseCase>,
}

impl ChangeEventListener {
    pub fn new(
        receiver: Arc<MpscChangeQueueReceiver>,
        handle_document_created: Arc<HandleDocumentCreatedUseCase>,
    ) -> Self {
        Self {
            receiver,
            handle_document_created,
        }
    }

    pub async fn start(&self) {
        tracing::info!("Change-event listener started");

        while let Some(event) = self.receiver.recv().await {
            match event {
                ChangeEvent::DocumentCreated(record) => {
                    let document_id = record.id;
                    match self.handle_document_created.execute(record).await {
                        Ok(response) => {
                            tracing::info!(%document_id, "{}", response.message);
                        }
                        Err(e) => {
                            // A bad event never takes the listener down.
                            tracing::error!(%document_id, "Change event failed: {}", e);
                        }
                    }
                }
            }
        }

        tracing::info!("Change-event listener stopped, queue closed");
    }
}
