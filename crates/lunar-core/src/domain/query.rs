//! List query parameters.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Rocket;
use crate::error::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Channel,
    Speed,
    UpdatedAt,
}

impl SortKey {
    /// このキーが選ぶフィールドの自然順序
    pub fn compare(self, a: &Rocket, b: &Rocket) -> Ordering {
        match self {
            SortKey::Channel => a.channel.cmp(&b.channel),
            SortKey::Speed => a.speed.cmp(&b.speed),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "channel" => Ok(SortKey::Channel),
            "speed" => Ok(SortKey::Speed),
            "updated_at" => Ok(SortKey::UpdatedAt),
            other => Err(QueryError::InvalidSort(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(QueryError::InvalidOrder(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("channel", SortKey::Channel)]
    #[case("speed", SortKey::Speed)]
    #[case("updated_at", SortKey::UpdatedAt)]
    fn parses_sort_keys(#[case] raw: &str, #[case] expected: SortKey) {
        assert_eq!(raw.parse::<SortKey>().unwrap(), expected);
    }

    #[rstest]
    #[case("updatedAt")]
    #[case("SPEED")]
    #[case("")]
    fn rejects_unknown_sort_keys(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<SortKey>(),
            Err(QueryError::InvalidSort(raw.to_string()))
        );
    }

    #[test]
    fn parses_orders() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert_eq!(
            "down".parse::<SortOrder>(),
            Err(QueryError::InvalidOrder("down".to_string()))
        );
    }

    #[test]
    fn defaults_are_channel_ascending() {
        assert_eq!(SortKey::default(), SortKey::Channel);
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }

    #[test]
    fn desc_reverses_ordering() {
        assert_eq!(SortOrder::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Asc.apply(Ordering::Less), Ordering::Less);
    }
}
