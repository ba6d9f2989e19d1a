//! App - アプリケーション層
//!
//! ports を組み合わせて受付から反映までの流れを組み立てる。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: 起動時検証つきのワイヤリング
//! - **IngestService**: 検証 → publish（受付側）
//! - **Producer**: envelope を配送キューに載せる MessagePublisher
//! - **ConsumerGroup**: pop → decode → apply → ack を回すワーカー群

pub mod builder;
pub mod ingest;
pub mod producer;
pub mod consumer;

// 主要な型を再エクスポート
pub use self::builder::{App, AppBuilder, BuildError};
pub use self::consumer::{Consumed, ConsumerGroup};
pub use self::ingest::IngestService;
pub use self::producer::Producer;
