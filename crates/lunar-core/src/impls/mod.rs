//! Impls - ports のプロセス内実装
//!
//! # 含まれる実装
//! - **InMemoryRocketStore**: channel ごとの状態の正本（RwLock で直列化）
//! - **InMemoryDeliveryQueue**: producer / consumer 間の配送キュー
//!
//! どちらも再起動で消える。外部ブローカーや DB に差し替える場合は
//! 同じ trait を実装した別クレートを用意する。

pub mod memory_store;
pub mod inmem_delivery;

pub use self::inmem_delivery::InMemoryDeliveryQueue;
pub use self::memory_store::InMemoryRocketStore;
