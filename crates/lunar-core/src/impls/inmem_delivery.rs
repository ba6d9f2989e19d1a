//! InMemoryDeliveryQueue - プロセス内の配送キュー
//!
//! # 実装メモ
//! - Mutex + Condvar による blocking pop（spawn_blocking で async から呼ぶ）
//! - topic ごとに ready キューと in-flight を管理
//! - ack は in-flight から外してカウンタを進めるだけ（再配送しない）
//! - 上限なし: consumer が遅くても producer 側に背圧はかからない

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::DeliveryId;
use crate::error::QueueError;
use crate::observability::DeliveryCounts;
use crate::ports::{DeliveredMessage, DeliveryQueue};

#[derive(Debug, Default)]
struct Topic {
    ready: VecDeque<DeliveredMessage>,
    in_flight: HashMap<DeliveryId, DeliveredMessage>,
    acked: u64,
}

type Topics = HashMap<String, Topic>;

pub struct InMemoryDeliveryQueue {
    topics: Arc<Mutex<Topics>>,
    /// push 時の通知用
    condvar: Arc<Condvar>,
}

impl InMemoryDeliveryQueue {
    pub fn new() -> Self {
        Self {
            topics: Arc::new(Mutex::new(HashMap::new())),
            condvar: Arc::new(Condvar::new()),
        }
    }
}

impl Default for InMemoryDeliveryQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliveryQueue for InMemoryDeliveryQueue {
    async fn push(&self, topic: &str, message: DeliveredMessage) -> Result<(), QueueError> {
        let mut topics = self.topics.lock().map_err(|_| QueueError::Poisoned)?;
        topics
            .entry(topic.to_string())
            .or_default()
            .ready
            .push_back(message);
        // 別 topic の待機者もいるので全員起こす
        self.condvar.notify_all();
        Ok(())
    }

    async fn pop(
        &self,
        topic: &str,
        timeout: Duration,
    ) -> Result<Option<DeliveredMessage>, QueueError> {
        let topics = self.topics.clone();
        let condvar = self.condvar.clone();
        let topic = topic.to_string();

        tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let mut guard = topics.lock().map_err(|_| QueueError::Poisoned)?;
            loop {
                if let Some(entry) = guard.get_mut(&topic) {
                    if let Some(message) = entry.ready.pop_front() {
                        entry.in_flight.insert(message.id, message.clone());
                        return Ok(Some(message));
                    }
                }
                let elapsed = start.elapsed();
                if elapsed >= timeout {
                    return Ok(None);
                }
                let (new_guard, _) = condvar
                    .wait_timeout(guard, timeout - elapsed)
                    .map_err(|_| QueueError::Poisoned)?;
                guard = new_guard;
            }
        })
        .await
        .map_err(|e| QueueError::OperationFailed(format!("pop failed: {e}")))?
    }

    async fn ack(&self, topic: &str, id: DeliveryId) -> Result<(), QueueError> {
        let mut topics = self.topics.lock().map_err(|_| QueueError::Poisoned)?;
        let entry = topics
            .get_mut(topic)
            .ok_or_else(|| QueueError::UnknownDelivery(id.to_string()))?;
        if entry.in_flight.remove(&id).is_none() {
            return Err(QueueError::UnknownDelivery(id.to_string()));
        }
        entry.acked += 1;
        Ok(())
    }

    async fn counts(&self, topic: &str) -> Result<DeliveryCounts, QueueError> {
        let topics = self.topics.lock().map_err(|_| QueueError::Poisoned)?;
        Ok(topics
            .get(topic)
            .map(|t| DeliveryCounts {
                queued: t.ready.len(),
                in_flight: t.in_flight.len(),
                acked: t.acked,
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    fn message(body: &str) -> DeliveredMessage {
        DeliveredMessage {
            id: DeliveryId::from_ulid(Ulid::new()),
            payload: body.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn push_pop_ack() {
        let queue = InMemoryDeliveryQueue::new();
        let msg = message("hello");
        queue.push("rockets", msg.clone()).await.unwrap();

        let popped = queue.pop("rockets", Duration::from_secs(1)).await.unwrap();
        assert_eq!(popped, Some(msg.clone()));
        assert_eq!(
            queue.counts("rockets").await.unwrap(),
            DeliveryCounts { queued: 0, in_flight: 1, acked: 0 }
        );

        queue.ack("rockets", msg.id).await.unwrap();
        assert_eq!(
            queue.counts("rockets").await.unwrap(),
            DeliveryCounts { queued: 0, in_flight: 0, acked: 1 }
        );
    }

    #[tokio::test]
    async fn pop_times_out_when_empty() {
        let queue = InMemoryDeliveryQueue::new();
        let start = tokio::time::Instant::now();
        let popped = queue
            .pop("rockets", Duration::from_millis(200))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(200));
        assert_eq!(popped, None);
    }

    #[tokio::test]
    async fn topics_are_separate() {
        let queue = InMemoryDeliveryQueue::new();
        let a = message("a");
        let b = message("b");
        queue.push("t1", a.clone()).await.unwrap();
        queue.push("t2", b.clone()).await.unwrap();

        assert_eq!(queue.pop("t2", Duration::from_secs(1)).await.unwrap(), Some(b));
        assert_eq!(queue.pop("t1", Duration::from_secs(1)).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn push_wakes_waiting_pop() {
        let queue = Arc::new(InMemoryDeliveryQueue::new());
        let msg = message("late");

        let pop_future = tokio::spawn({
            let queue = queue.clone();
            async move { queue.pop("rockets", Duration::from_secs(5)).await.unwrap() }
        });

        tokio::time::sleep(Duration::from_millis(200)).await;
        queue.push("rockets", msg.clone()).await.unwrap();

        assert_eq!(pop_future.await.unwrap(), Some(msg));
    }

    #[tokio::test]
    async fn double_ack_is_an_error() {
        let queue = InMemoryDeliveryQueue::new();
        let msg = message("once");
        queue.push("rockets", msg.clone()).await.unwrap();
        queue.pop("rockets", Duration::from_secs(1)).await.unwrap();

        queue.ack("rockets", msg.id).await.unwrap();
        assert!(matches!(
            queue.ack("rockets", msg.id).await,
            Err(QueueError::UnknownDelivery(_))
        ));
    }

    #[tokio::test]
    async fn counts_for_unknown_topic_are_zero() {
        let queue = InMemoryDeliveryQueue::new();
        assert_eq!(queue.counts("nope").await.unwrap(), DeliveryCounts::default());
    }
}
