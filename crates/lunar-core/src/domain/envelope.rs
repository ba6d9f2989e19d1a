//! MessageEnvelope - 入力の単位
//!
//! # wire 形式
//! ```json
//! {
//!   "metadata": {
//!     "channel": "193270a9-...",
//!     "messageNumber": 1,
//!     "messageTime": "2022-02-02T19:39:05.86337+01:00",
//!     "messageType": "RocketLaunched"
//!   },
//!   "message": { "type": "Falcon-9", "launchSpeed": 500, "mission": "ARTEMIS" }
//! }
//! ```
//!
//! metadata の各フィールドは欠けていても deserialize は成功する（空文字 / 0）。
//! 欠落は validator が `InvalidMetadata` として返す。

use serde::{Deserialize, Serialize};

use super::MessageType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub channel: String,

    /// producer が振る channel ごとの論理時計
    #[serde(default)]
    pub message_number: i64,

    /// イベント時刻（形式だけ検証する）
    #[serde(default)]
    pub message_time: String,

    /// 未知の種別を validator まで届けるため生の文字列のまま持つ
    #[serde(default)]
    pub message_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    #[serde(default)]
    pub metadata: Metadata,

    /// 種別ごとの payload（デコードは後で）
    #[serde(default)]
    pub message: serde_json::Value,
}

impl MessageEnvelope {
    pub fn new(
        channel: impl Into<String>,
        message_number: i64,
        message_time: impl Into<String>,
        kind: MessageType,
        message: serde_json::Value,
    ) -> Self {
        Self {
            metadata: Metadata {
                channel: channel.into(),
                message_number,
                message_time: message_time.into(),
                message_type: kind.as_str().to_string(),
            },
            message,
        }
    }

    pub fn channel(&self) -> &str {
        &self.metadata.channel
    }

    pub fn message_number(&self) -> i64 {
        self.metadata.message_number
    }
}
