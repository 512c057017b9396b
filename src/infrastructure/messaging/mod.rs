pub mod change_listener;
pub mod mpsc_change_queue;

pub use change_listener::ChangeEventListener;
pub use mpsc_change_queue::{MpscChangeQueue, MpscChangeQueueReceiver};
