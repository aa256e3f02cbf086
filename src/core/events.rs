use tokio::sync::mpsc;

use crate::models::update::{UpdateInfo, UpdateProgress};

/// Update lifecycle events pushed by the distribution collaborator. This
/// core never polls for them.
#[derive(Debug, Clone)]
pub enum UpdateEvent {
    Checking,
    Available(UpdateInfo),
    NotAvailable,
    Progress(UpdateProgress),
    Downloaded { version: String },
    Error(String),
}

pub type UpdateEventSender = mpsc::UnboundedSender<UpdateEvent>;
pub type UpdateEventReceiver = mpsc::UnboundedReceiver<UpdateEvent>;

pub fn create_update_channel() -> (UpdateEventSender, UpdateEventReceiver) {
    mpsc::unbounded_channel()
}

/// Handle identifying one observer registration. Surrendering it to
/// [`UpdateBus::unsubscribe`] deregisters the observer.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription(u64);

/// Observer registry fanning update events out to any number of
/// subscribers. Closed receivers are pruned on publish.
#[derive(Default)]
pub struct UpdateBus {
    next_id: u64,
    subscribers: Vec<(u64, UpdateEventSender)>,
}

impl UpdateBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> (Subscription, UpdateEventReceiver) {
        let (tx, rx) = create_update_channel();
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, tx));
        (Subscription(id), rx)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscribers.retain(|(id, _)| *id != subscription.0);
    }

    pub fn publish(&mut self, event: &UpdateEvent) {
        self.subscribers
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
