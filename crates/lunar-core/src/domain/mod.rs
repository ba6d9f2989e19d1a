//! Domain model (envelopes, message types, decoded events, rocket state, queries).
//!
//! - envelope: wire 形式の MessageEnvelope（metadata + 生の payload）
//! - message_type: 5 種類のイベント種別（閉じた enum）
//! - event: payload を型付きにデコードした RocketEvent
//! - rocket: channel ごとの集約状態
//! - query: 一覧取得のソートキーと順序
//! - ids: 配送メッセージの ID

pub mod envelope;
pub mod message_type;
pub mod event;
pub mod rocket;
pub mod query;
pub mod ids;

pub use envelope::{MessageEnvelope, Metadata};
pub use message_type::MessageType;
pub use event::{LaunchedPayload, MissionChangedPayload, RocketEvent, SpeedDeltaPayload};
pub use rocket::{Rocket, RocketStatus};
pub use query::{SortKey, SortOrder};
pub use ids::{DeliveryId, Id, IdMarker};
