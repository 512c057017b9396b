use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

use crate::application::ports::change_queue::{ChangeEvent, ChangeQueue, ChangeQueueError};

/// In-process change-notification transport. Producers push `ChangeEvent`s
/// through the `ChangeQueue` port; the listener drains the paired receiver.
pub struct MpscChangeQueue {
    sender: mpsc::UnboundedSender<ChangeEvent>,
}

pub struct MpscChangeQueueReceiver {
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<ChangeEvent>>>,
}

impl MpscChangeQueue {
    pub fn create_pair() -> (Self, MpscChangeQueueReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();

        (
            Self { sender },
            MpscChangeQueueReceiver {
                receiver: Arc::new(Mutex::new(receiver)),
            },
        )
    }
}

impl MpscChangeQueueReceiver {
    pub async fn recv(&self) -> Option<ChangeEvent> {
        self.receiver.lock().await.recv().await
    }
}

#[async_trait]
impl ChangeQueue for MpscChangeQueue {
    async fn enqueue(&self, event: ChangeEvent) -> Result<(), ChangeQueueError> {
        self.sender
            .send(event)
            .map_err(|_| ChangeQueueError::QueueClosed)
    }
}
