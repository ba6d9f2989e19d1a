//! RocketEvent - payload を型付きにデコードしたイベント
//!
//! validator と store は同じ `RocketEvent::decode` を通すので、
//! payload のスキーマはここ一箇所にだけ定義される。

use serde::{Deserialize, Serialize};

use super::MessageType;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LaunchedPayload {
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub launch_speed: i64,
    pub mission: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedDeltaPayload {
    pub by: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MissionChangedPayload {
    pub new_mission: String,
}

/// RocketEvent はデコード済みのイベント（[`MessageType`] ごとに 1 variant）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RocketEvent {
    Launched(LaunchedPayload),
    SpeedIncreased(SpeedDeltaPayload),
    SpeedDecreased(SpeedDeltaPayload),
    MissionChanged(MissionChangedPayload),
    /// payload は見ない
    Exploded,
}

impl RocketEvent {
    pub fn decode(kind: MessageType, payload: &serde_json::Value) -> Result<Self, serde_json::Error> {
        let event = match kind {
            MessageType::Launched => RocketEvent::Launched(LaunchedPayload::deserialize(payload)?),
            MessageType::SpeedIncreased => {
                RocketEvent::SpeedIncreased(SpeedDeltaPayload::deserialize(payload)?)
            }
            MessageType::SpeedDecreased => {
                RocketEvent::SpeedDecreased(SpeedDeltaPayload::deserialize(payload)?)
            }
            MessageType::MissionChanged => {
                RocketEvent::MissionChanged(MissionChangedPayload::deserialize(payload)?)
            }
            MessageType::Exploded => RocketEvent::Exploded,
        };
        Ok(event)
    }

    pub fn kind(&self) -> MessageType {
        match self {
            RocketEvent::Launched(_) => MessageType::Launched,
            RocketEvent::SpeedIncreased(_) => MessageType::SpeedIncreased,
            RocketEvent::SpeedDecreased(_) => MessageType::SpeedDecreased,
            RocketEvent::MissionChanged(_) => MessageType::MissionChanged,
            RocketEvent::Exploded => MessageType::Exploded,
        }
    }
}
