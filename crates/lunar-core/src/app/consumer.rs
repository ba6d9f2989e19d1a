//! ConsumerGroup - 配送キューから取り出して store に反映するワーカー群
//!
//! 1 メッセージの流れ: pop → decode → apply → ack
//!
//! - 結果に関係なく ack する（壊れたメッセージを何度も受け取らないため）
//! - pop は `poll_interval` で必ず戻るので、その合間に shutdown フラグを見る
//! - 取り出したメッセージは処理し終えてからループを抜ける

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::MessageEnvelope;
use crate::ports::{ApplyOutcome, DeliveredMessage, DeliveryQueue, MessageWriter};

/// Consumed は配送メッセージ 1 件の処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consumed {
    Applied,
    Duplicate,
    Stale,
    /// store に触れずに捨てた
    Failed(String),
}

/// ConsumerGroup はワーカー群のハンドル
/// - `request_shutdown()` で新しい pop をやめる
/// - `shutdown_and_join()` で全ワーカーの終了を待てる
pub struct ConsumerGroup {
    shutdown_tx: watch::Sender<bool>,
    joins: Vec<JoinHandle<()>>,
}

impl ConsumerGroup {
    /// `topic` に `n` 個の consumer を起動する
    pub fn spawn(
        n: usize,
        queue: Arc<dyn DeliveryQueue>,
        store: Arc<dyn MessageWriter>,
        topic: impl Into<String>,
        poll_interval: Duration,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let topic: Arc<str> = Arc::from(topic.into());

        let mut joins = Vec::with_capacity(n);
        for consumer_id in 0..n {
            let q = Arc::clone(&queue);
            let s = Arc::clone(&store);
            let t = Arc::clone(&topic);
            let rx = shutdown_rx.clone();

            let join = tokio::spawn(async move {
                consumer_loop(consumer_id, q, s, t, poll_interval, rx).await;
            });
            joins.push(join);
        }

        Self { shutdown_tx, joins }
    }

    pub fn len(&self) -> usize {
        self.joins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }

    pub fn request_shutdown(&self) {
        // receivers may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        for j in self.joins {
            let _ = j.await;
        }
    }
}

async fn consumer_loop(
    consumer_id: usize,
    queue: Arc<dyn DeliveryQueue>,
    store: Arc<dyn MessageWriter>,
    topic: Arc<str>,
    poll_interval: Duration,
    shutdown_rx: watch::Receiver<bool>,
) {
    debug!(consumer_id, topic = &*topic, "consumer started");
    while !*shutdown_rx.borrow() {
        let message = match queue.pop(&topic, poll_interval).await {
            Ok(Some(message)) => message,
            Ok(None) => continue,
            Err(e) => {
                warn!(consumer_id, error = %e, "pop failed");
                tokio::time::sleep(poll_interval).await;
                continue;
            }
        };

        let id = message.id;
        process_one(store.as_ref(), &message).await;

        if let Err(e) = queue.ack(&topic, id).await {
            warn!(consumer_id, delivery = %id, error = %e, "ack failed");
        }
    }
    debug!(consumer_id, "consumer stopped");
}

/// 配送メッセージ 1 件をデコードして反映し、結果をログに出す
pub async fn process_one(store: &dyn MessageWriter, message: &DeliveredMessage) -> Consumed {
    let envelope: MessageEnvelope = match serde_json::from_slice(&message.payload) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(delivery = %message.id, error = %e, "undecodable message dropped");
            return Consumed::Failed(e.to_string());
        }
    };

    let channel = envelope.channel();
    let number = envelope.message_number();
    let kind = envelope.metadata.message_type.as_str();

    match store.apply(&envelope).await {
        Ok(ApplyOutcome::Applied) => {
            info!(channel, number, kind, "message applied");
            Consumed::Applied
        }
        Ok(ApplyOutcome::Duplicate) => {
            debug!(channel, number, kind, "duplicate message skipped");
            Consumed::Duplicate
        }
        Ok(ApplyOutcome::Stale) => {
            warn!(channel, number, kind, "stale message ignored");
            Consumed::Stale
        }
        Err(e) => {
            warn!(channel, number, kind, error = %e, "message dropped");
            Consumed::Failed(e.to_string())
        }
    }
}
