//! Strongly-typed identifiers.
//!
//! ULID ベースの ID を Phantom type パターンで型付けする。
//! 配送キューに載るメッセージ 1 件ごとに `DeliveryId` を振る
//! （channel の messageNumber とは無関係。重複配送の判定には使わない）。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
pub trait IdMarker: Send + Sync + 'static {
    /// Display で使うプレフィックス（例: "msg-"）
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// `T` は実行時にはメモリを消費しないマーカー。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// 配送メッセージのマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Delivery {}

impl IdMarker for Delivery {
    fn prefix() -> &'static str {
        "msg-"
    }
}

/// 配送境界でのメッセージ 1 件の ID
pub type DeliveryId = Id<Delivery>;
