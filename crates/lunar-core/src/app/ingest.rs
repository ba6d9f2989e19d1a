//! IngestService - 受付: 検証してから publish する
//!
//! 検証に通らない envelope はキューに載らない。
//! publish が成功した時点で「受理」であり、store への反映は非同期。

use std::sync::Arc;

use tracing::info;

use crate::domain::MessageEnvelope;
use crate::error::IngestError;
use crate::ports::MessagePublisher;
use crate::validator::Validator;

pub struct IngestService {
    validator: Arc<dyn Validator>,
    publisher: Arc<dyn MessagePublisher>,
    topic: String,
}

impl IngestService {
    pub fn new(
        validator: Arc<dyn Validator>,
        publisher: Arc<dyn MessagePublisher>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            validator,
            publisher,
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub async fn submit(&self, envelope: &MessageEnvelope) -> Result<(), IngestError> {
        self.validator.validate_envelope(envelope)?;
        let event = self
            .validator
            .validate_payload(&envelope.metadata.message_type, &envelope.message)?;

        self.publisher.publish(&self.topic, envelope).await?;
        info!(
            channel = envelope.channel(),
            number = envelope.message_number(),
            kind = %event.kind(),
            "message accepted"
        );
        Ok(())
    }
}
