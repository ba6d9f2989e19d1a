//! MessageType - イベント種別
//!
//! 文字列比較ではなく閉じた enum で扱い、match の網羅性で
//! 種別追加時の漏れをコンパイル時に検出する。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// MessageType はロケットテレメトリの 5 種類のイベント
///
/// wire 上の名前（`RocketLaunched` など）で直列化する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "RocketLaunched")]
    Launched,
    #[serde(rename = "RocketSpeedIncreased")]
    SpeedIncreased,
    #[serde(rename = "RocketSpeedDecreased")]
    SpeedDecreased,
    #[serde(rename = "RocketMissionChanged")]
    MissionChanged,
    #[serde(rename = "RocketExploded")]
    Exploded,
}

impl MessageType {
    pub const ALL: [MessageType; 5] = [
        MessageType::Launched,
        MessageType::SpeedIncreased,
        MessageType::SpeedDecreased,
        MessageType::MissionChanged,
        MessageType::Exploded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Launched => "RocketLaunched",
            MessageType::SpeedIncreased => "RocketSpeedIncreased",
            MessageType::SpeedDecreased => "RocketSpeedDecreased",
            MessageType::MissionChanged => "RocketMissionChanged",
            MessageType::Exploded => "RocketExploded",
        }
    }

    /// 速度の加減算だけが可換。それ以外は messageNumber による last-write-wins
    pub fn is_commutative(self) -> bool {
        matches!(self, MessageType::SpeedIncreased | MessageType::SpeedDecreased)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownType(s.to_string()))
    }
}
