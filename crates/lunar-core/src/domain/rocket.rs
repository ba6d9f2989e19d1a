//! Rocket aggregate: the reconciled state of one channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RocketEvent;
use crate::error::SpeedOverflow;

/// RocketStatus はロケットの状態
///
/// 遷移は Active -> Exploded のみ。ACTIVE / EXPLODED として直列化する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RocketStatus {
    #[default]
    Active,
    Exploded,
}

/// Rocket は 1 channel の集約状態
///
/// - 最初に受理したイベントで store が作る
/// - フィールドの変更は `mutate` だけ。順序の判定（重複・stale・
///   `last_message_number`）は store の責務
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rocket {
    pub channel: String,

    #[serde(rename = "type")]
    pub vehicle_type: String,

    pub mission: String,

    /// 下限なし（減速で負になりうる）
    pub speed: i64,

    pub status: RocketStatus,

    /// 適用済みの最大 messageNumber（減らない）
    pub last_message_number: i64,

    pub updated_at: DateTime<Utc>,
}

impl Rocket {
    pub fn new(channel: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            channel: channel.into(),
            vehicle_type: String::new(),
            mission: String::new(),
            speed: 0,
            status: RocketStatus::Active,
            last_message_number: 0,
            updated_at: now,
        }
    }

    /// イベント種別ごとのフィールド変更を適用する
    ///
    /// 速度が i64 に収まらない場合は何も変えずに `SpeedOverflow` を返す。
    pub fn mutate(&mut self, event: &RocketEvent) -> Result<(), SpeedOverflow> {
        match event {
            RocketEvent::Launched(p) => {
                self.vehicle_type.clone_from(&p.vehicle_type);
                self.mission.clone_from(&p.mission);
                // re-launch never lowers the recorded speed
                self.speed = self.speed.max(p.launch_speed);
            }
            RocketEvent::SpeedIncreased(p) => {
                self.speed = self.speed.checked_add(p.by).ok_or(SpeedOverflow)?;
            }
            RocketEvent::SpeedDecreased(p) => {
                self.speed = self.speed.checked_sub(p.by).ok_or(SpeedOverflow)?;
            }
            RocketEvent::MissionChanged(p) => self.mission.clone_from(&p.new_mission),
            RocketEvent::Exploded => self.status = RocketStatus::Exploded,
        }
        Ok(())
    }

    /// 論理時計を進めて `updated_at` を更新する
    pub fn record_applied(&mut self, message_number: i64, now: DateTime<Utc>) {
        self.last_message_number = self.last_message_number.max(message_number);
        self.updated_at = now;
    }
}
