//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: Clock の時刻 + 乱数で ULID を生成

use crate::domain::DeliveryId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は配送メッセージの ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数の producer から使える）
pub trait IdGenerator: Send + Sync {
    fn generate_delivery_id(&self) -> DeliveryId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// FixedClock を渡せば timestamp 部分を固定できる。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_delivery_id(&self) -> DeliveryId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        DeliveryId::from(ulid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);
        let id1 = id_gen.generate_delivery_id();
        let id2 = id_gen.generate_delivery_id();
        assert_ne!(id1, id2);
        assert!(id1.to_string().starts_with("msg-"));
    }

    #[test]
    fn fixed_clock_pins_the_timestamp() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let id1 = id_gen.generate_delivery_id();
        let id2 = id_gen.generate_delivery_id();

        // ランダム部分があるので ID は異なるが timestamp は同じ
        assert_ne!(id1, id2);
        assert_eq!(id1.as_ulid().timestamp_ms(), fixed_time.timestamp_millis() as u64);
        assert_eq!(id2.as_ulid().timestamp_ms(), fixed_time.timestamp_millis() as u64);
    }
}
