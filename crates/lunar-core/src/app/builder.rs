//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # 方針
//! - Builder パターン（Clock / Validator は差し替え可能）
//! - 起動時検証（Fail-fast）: consumer 0 や空の topic は build() で弾く
//! - store と queue は App が 1 つずつ持ち、HTTP 側と consumer 側で共有する

use std::sync::Arc;

use crate::app::{ConsumerGroup, IngestService, Producer};
use crate::config::Config;
use crate::impls::{InMemoryDeliveryQueue, InMemoryRocketStore};
use crate::ports::{Clock, RocketReader, SystemClock, UlidGenerator};
use crate::validator::{DefaultValidator, Validator};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new().config(Config::from_env()?).build()?;
/// let consumers = app.start();
/// ```
pub struct AppBuilder {
    config: Config,
    clock: Arc<dyn Clock>,
    validator: Arc<dyn Validator>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("at least one consumer is required")]
    NoConsumers,

    #[error("topic must not be empty")]
    EmptyTopic,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            clock: Arc::new(SystemClock),
            validator: Arc::new(DefaultValidator),
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// store の updatedAt と配送 ID の時刻に使う
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        if self.config.consumers == 0 {
            return Err(BuildError::NoConsumers);
        }
        if self.config.topic.trim().is_empty() {
            return Err(BuildError::EmptyTopic);
        }

        let store = Arc::new(InMemoryRocketStore::with_clock(self.clock.clone()));
        let queue = Arc::new(InMemoryDeliveryQueue::new());
        let producer = Producer::new(queue.clone(), Arc::new(UlidGenerator::new(self.clock)));
        let ingest = Arc::new(IngestService::new(
            self.validator,
            Arc::new(producer),
            self.config.topic.clone(),
        ));

        Ok(App {
            config: self.config,
            store,
            queue,
            ingest,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// App は組み立て済みの部品を保持する
///
/// HTTP 層は `ingest` と `reader()` だけを使う。
pub struct App {
    pub config: Config,
    pub store: Arc<InMemoryRocketStore>,
    pub queue: Arc<InMemoryDeliveryQueue>,
    pub ingest: Arc<IngestService>,
}

impl App {
    pub fn reader(&self) -> Arc<dyn RocketReader> {
        self.store.clone()
    }

    /// consumer を `config.consumers` 個起動する
    pub fn start(&self) -> ConsumerGroup {
        ConsumerGroup::spawn(
            self.config.consumers,
            self.queue.clone(),
            self.store.clone(),
            self.config.topic.clone(),
            self.config.poll_interval,
        )
    }
}
