//! Producer - envelope を JSON にして配送キューへ積む
//!
//! 受付の時点で ID を振る。この ID は配送の追跡用で、
//! 重複判定は store 側の (channel, messageNumber) で行う。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::MessageEnvelope;
use crate::error::QueueError;
use crate::ports::{DeliveredMessage, DeliveryQueue, IdGenerator, MessagePublisher};

pub struct Producer {
    queue: Arc<dyn DeliveryQueue>,
    ids: Arc<dyn IdGenerator>,
}

impl Producer {
    pub fn new(queue: Arc<dyn DeliveryQueue>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { queue, ids }
    }
}

#[async_trait]
impl MessagePublisher for Producer {
    async fn publish(&self, topic: &str, envelope: &MessageEnvelope) -> Result<(), QueueError> {
        let payload = serde_json::to_vec(envelope)?;
        let message = DeliveredMessage {
            id: self.ids.generate_delivery_id(),
            payload,
        };
        self.queue.push(topic, message).await
    }
}
