//! Validator - store に届く前の検証ゲート
//!
//! # 設計原則
//! - 純粋関数（副作用なし、入力だけで結果が決まる）
//! - envelope の検証と payload の検証を分ける
//!   （payload は種別ごとのスキーマ）

use chrono::{DateTime, FixedOffset};

use crate::domain::{MessageEnvelope, MessageType, RocketEvent};
use crate::error::ValidationError;

/// Validator は envelope と payload を検証
///
/// `Send + Sync` なので HTTP ハンドラ間で `Arc<dyn Validator>` として共有できる。
pub trait Validator: Send + Sync {
    fn validate_envelope(&self, envelope: &MessageEnvelope) -> Result<(), ValidationError>;

    fn validate_payload(
        &self,
        kind: &str,
        payload: &serde_json::Value,
    ) -> Result<RocketEvent, ValidationError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidator;

impl DefaultValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for DefaultValidator {
    fn validate_envelope(&self, envelope: &MessageEnvelope) -> Result<(), ValidationError> {
        let meta = &envelope.metadata;
        if meta.channel.is_empty() {
            return Err(ValidationError::InvalidMetadata("channel is empty"));
        }
        if meta.message_number <= 0 {
            return Err(ValidationError::InvalidMetadata("messageNumber must be positive"));
        }
        if meta.message_type.is_empty() {
            return Err(ValidationError::InvalidMetadata("messageType is empty"));
        }
        if parse_message_time(&meta.message_time).is_none() {
            return Err(ValidationError::InvalidTimestamp(meta.message_time.clone()));
        }
        meta.message_type.parse::<MessageType>()?;
        Ok(())
    }

    fn validate_payload(
        &self,
        kind: &str,
        payload: &serde_json::Value,
    ) -> Result<RocketEvent, ValidationError> {
        let kind: MessageType = kind.parse()?;
        let event = RocketEvent::decode(kind, payload)
            .map_err(|e| ValidationError::InvalidPayload(e.to_string()))?;
        check_event(&event)?;
        Ok(event)
    }
}

/// RFC3339 / RFC3339Nano のみ受け付ける
///
/// 区切りは大文字 `T`、タイムゾーンは大文字 `Z` か `±hh:mm`。小数秒は任意。
/// chrono の `parse_from_rfc3339` は空白区切りや小文字 `t` / `z` も通すので使わない。
fn parse_message_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    if raw.as_bytes().get(10) != Some(&b'T') {
        return None;
    }
    let normalized = match raw.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => raw.to_string(),
    };
    DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f%:z").ok()
}

fn check_event(event: &RocketEvent) -> Result<(), ValidationError> {
    let invalid = |reason: &str| -> Result<(), ValidationError> {
        Err(ValidationError::InvalidPayload(reason.to_string()))
    };
    match event {
        RocketEvent::Launched(p) => {
            if p.vehicle_type.is_empty() {
                return invalid("type is empty");
            }
            if p.mission.is_empty() {
                return invalid("mission is empty");
            }
            if p.launch_speed < 0 {
                return invalid("launchSpeed must not be negative");
            }
            Ok(())
        }
        RocketEvent::SpeedIncreased(p) | RocketEvent::SpeedDecreased(p) => {
            if p.by <= 0 {
                return invalid("by must be positive");
            }
            Ok(())
        }
        RocketEvent::MissionChanged(p) => {
            if p.new_mission.is_empty() {
                return invalid("newMission is empty");
            }
            Ok(())
        }
        RocketEvent::Exploded => Ok(()),
    }
}
