//! lunar-core
//!
//! Core building blocks for the Lunar telemetry reconciler.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（envelope, message_type, event, rocket, query, ids）
//! - **validator**: envelope / payload の検証ゲート（store に届く前に弾く）
//! - **ports**: 抽象化レイヤー（MessageWriter, RocketReader, DeliveryQueue, MessagePublisher, Clock, IdGenerator）
//! - **impls**: 実装（InMemoryRocketStore, InMemoryDeliveryQueue）
//! - **app**: アプリケーションロジック（builder, ingest, producer, consumer）
//! - **config**: 環境変数からの設定読み込み
//! - **observability**: tracing の初期化と配送キューのカウンタ

pub mod domain;
pub mod validator;
pub mod ports;
pub mod impls;
pub mod app;
pub mod config;
pub mod error;
pub mod observability;

pub use config::Config;
pub use error::{
    ApplyError, ConfigError, IngestError, QueryError, QueueError, SpeedOverflow, ValidationError,
};
