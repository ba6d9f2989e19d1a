//! Store ports - channel ごとの集約状態の正本
//!
//! write 側（apply）と read 側（get / list）を分けて定義する。
//! consumer は `MessageWriter` だけ、HTTP の query 側は `RocketReader` だけに依存する。

use async_trait::async_trait;

use crate::domain::{MessageEnvelope, Rocket, SortKey, SortOrder};
use crate::error::ApplyError;

/// ApplyOutcome は envelope 1 件を反映した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// 状態が変わった
    Applied,
    /// (channel, messageNumber) は既に見ている。何も変えない
    Duplicate,
    /// 最後に適用した番号より古い非可換イベント。「見た」記録だけ残す
    Stale,
}

#[async_trait]
pub trait MessageWriter: Send + Sync {
    /// envelope 1 件を channel の状態に反映する
    ///
    /// read-modify-write 全体が他の `apply` / `get` / `list` に対してアトミック。
    /// エラー時は store を一切変更しない。
    async fn apply(&self, envelope: &MessageEnvelope) -> Result<ApplyOutcome, ApplyError>;
}

#[async_trait]
pub trait RocketReader: Send + Sync {
    /// 1 channel の snapshot。一度も観測していなければ `None`
    async fn get(&self, channel: &str) -> Option<Rocket>;

    /// 全 channel の snapshot を `sort` / `order` で並べて返す
    async fn list(&self, sort: SortKey, order: SortOrder) -> Vec<Rocket>;
}
