//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義する。
//! 実装（in-memory store / queue）は `impls` にあり、差し替え可能。
//!
//! # 設計原則
//! - store はプロセス内メモリのみ（永続化しない）
//! - 配送キューは at-least-once、順序保証なし
//! - 時刻と ID 生成は trait にしてテストで固定できるようにする

pub mod store;
pub mod delivery_queue;
pub mod clock;
pub mod id_generator;

// 主要な trait を再エクスポート
pub use self::store::{ApplyOutcome, MessageWriter, RocketReader};
pub use self::delivery_queue::{DeliveredMessage, DeliveryQueue, MessagePublisher};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
