//! InMemoryRocketStore - channel ごとの集約状態と重複排除記録
//!
//! # マージ方針
//! - (channel, messageNumber) は一度だけ適用する（種別に関係なく）
//! - 非可換イベント（Launched / MissionChanged / Exploded）は messageNumber による
//!   last-write-wins。最後に適用した番号より古いものは「見た」だけ記録して捨てる
//! - 可換イベント（SpeedIncreased / SpeedDecreased）は到着順に関係なく常に加減算する
//!
//! # ロック
//! - 全 channel で 1 つの RwLock を共有する
//! - apply は write ロックを取って read-modify-write 全体を 1 つのクリティカルセクションにする
//! - get / list は read ロック（apply 中はブロックされる）

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{MessageEnvelope, MessageType, Rocket, RocketEvent, SortKey, SortOrder};
use crate::error::ApplyError;
use crate::ports::{ApplyOutcome, Clock, MessageWriter, RocketReader, SystemClock};

#[derive(Debug, Default)]
struct StoreState {
    /// BTreeMap なので snapshot はソート前から channel 順
    rockets: BTreeMap<String, Rocket>,

    /// channel ごとの見た messageNumber
    seen: HashMap<String, HashSet<i64>>,
}

pub struct InMemoryRocketStore {
    state: RwLock<StoreState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRocketStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            clock,
        }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rockets.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.rockets.is_empty()
    }
}

impl Default for InMemoryRocketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageWriter for InMemoryRocketStore {
    async fn apply(&self, envelope: &MessageEnvelope) -> Result<ApplyOutcome, ApplyError> {
        let kind: MessageType = envelope.metadata.message_type.parse()?;
        let channel = envelope.channel();
        let number = envelope.message_number();

        let mut guard = self.state.write().await;
        let StoreState { rockets, seen } = &mut *guard;

        if seen.get(channel).is_some_and(|numbers| numbers.contains(&number)) {
            debug!(channel, number, %kind, "duplicate message ignored");
            return Ok(ApplyOutcome::Duplicate);
        }

        // decode before touching anything: a bad payload leaves no trace
        let event = RocketEvent::decode(kind, &envelope.message)
            .map_err(|source| ApplyError::Decode { kind, source })?;

        let now = self.clock.now();
        let current = rockets.get(channel);
        let last = current.map_or(0, |r| r.last_message_number);

        if !kind.is_commutative() && number < last {
            seen.entry(channel.to_string()).or_default().insert(number);
            rockets
                .entry(channel.to_string())
                .or_insert_with(|| Rocket::new(channel, now));
            debug!(channel, number, last, %kind, "stale message skipped");
            return Ok(ApplyOutcome::Stale);
        }

        // mutate a copy: an overflow must leave both maps untouched
        let mut next = current
            .cloned()
            .unwrap_or_else(|| Rocket::new(channel, now));
        next.mutate(&event)
            .map_err(|_| ApplyError::SpeedOverflow {
                channel: channel.to_string(),
                number,
            })?;
        next.record_applied(number, now);

        seen.entry(channel.to_string()).or_default().insert(number);
        rockets.insert(channel.to_string(), next);
        Ok(ApplyOutcome::Applied)
    }
}

#[async_trait]
impl RocketReader for InMemoryRocketStore {
    async fn get(&self, channel: &str) -> Option<Rocket> {
        self.state.read().await.rockets.get(channel).cloned()
    }

    async fn list(&self, sort: SortKey, order: SortOrder) -> Vec<Rocket> {
        let mut items: Vec<Rocket> = {
            let state = self.state.read().await;
            state.rockets.values().cloned().collect()
        };
        // sort_by is stable: equal keys keep channel order
        items.sort_by(|a, b| order.apply(sort.compare(a, b)));
        items
    }
}
