//! DeliveryQueue port - producer と consumer の間の配送キュー
//!
//! # 設計原則
//! - at-least-once、channel をまたいでも channel 内でも順序保証なし
//! - メッセージ本体は JSON にエンコードした envelope（bytes）
//! - topic ごとにキューを分ける
//! - 失敗しても ack する（リトライ・dead letter なし）

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{DeliveryId, MessageEnvelope};
use crate::error::QueueError;
use crate::observability::DeliveryCounts;

/// DeliveredMessage はキューを流れるメッセージ 1 件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredMessage {
    pub id: DeliveryId,
    pub payload: Vec<u8>,
}

/// MessagePublisher は配送境界の producer 側（fire-and-forget）
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    async fn publish(&self, topic: &str, envelope: &MessageEnvelope) -> Result<(), QueueError>;
}

#[async_trait]
pub trait DeliveryQueue: Send + Sync {
    async fn push(&self, topic: &str, message: DeliveredMessage) -> Result<(), QueueError>;

    /// 最大 `timeout` まで次のメッセージを待つ。ack されるまで in-flight に残る
    async fn pop(
        &self,
        topic: &str,
        timeout: Duration,
    ) -> Result<Option<DeliveredMessage>, QueueError>;

    async fn ack(&self, topic: &str, id: DeliveryId) -> Result<(), QueueError>;

    async fn counts(&self, topic: &str) -> Result<DeliveryCounts, QueueError>;
}
