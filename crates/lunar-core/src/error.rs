use thiserror::Error;

use crate::domain::MessageType;

/// ValidationError は store に届く前に validator が返す拒否理由
///
/// どれも送信側で直して再送できる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid metadata: {0}")]
    InvalidMetadata(&'static str),

    #[error("invalid messageTime (RFC3339/RFC3339Nano): {0:?}")]
    InvalidTimestamp(String),

    #[error("unknown messageType: {0:?}")]
    UnknownType(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// ApplyError は検証済み envelope を反映するときの失敗
///
/// どの場合も store は変更されない。consumer はログを出して ack し、捨てる。
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("decode {kind} payload: {source}")]
    Decode {
        kind: MessageType,
        #[source]
        source: serde_json::Error,
    },

    #[error("speed out of range on channel {channel:?} at message {number}")]
    SpeedOverflow { channel: String, number: i64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// SpeedOverflow は速度の加減算が i64 に収まらないこと
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("speed out of range")]
pub struct SpeedOverflow;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("queue lock poisoned")]
    Poisoned,

    #[error("unknown delivery {0}")]
    UnknownDelivery(String),

    #[error("queue operation failed: {0}")]
    OperationFailed(String),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("publish failed: {0}")]
    Publish(#[from] QueueError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("sort by should be channel or speed or updated_at, got {0:?}")]
    InvalidSort(String),

    #[error("order should be asc or desc, got {0:?}")]
    InvalidOrder(String),

    #[error("channel not found")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
