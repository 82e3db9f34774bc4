// ── Row identity ──
//
// Every managed row carries a backend-assigned integer id. `EntityId`
// can only hold values >= 1, so an id that reached a controller method
// as an `EntityId` is already known to be usable in a request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Zero or negative identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid identifier {0}: must be a positive integer")]
pub struct InvalidEntityId(pub i64);

/// Positive integer identifier of a stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct EntityId(i64);

impl EntityId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for EntityId {
    type Error = InvalidEntityId;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(InvalidEntityId(raw))
        }
    }
}

impl From<EntityId> for i64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = InvalidEntityId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Unparseable input is reported like the zero id.
        let raw = s.trim().parse::<i64>().unwrap_or(0);
        Self::try_from(raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_and_negative() {
        assert_eq!(EntityId::try_from(0), Err(InvalidEntityId(0)));
        assert_eq!(EntityId::try_from(-4), Err(InvalidEntityId(-4)));
        assert_eq!(EntityId::try_from(7).unwrap().get(), 7);
    }

    #[test]
    fn parses_from_text() {
        assert_eq!("12".parse::<EntityId>().unwrap().get(), 12);
        assert!("abc".parse::<EntityId>().is_err());
        assert!("".parse::<EntityId>().is_err());
    }

    #[test]
    fn serde_is_transparent_and_validated() {
        let id: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert!(serde_json::from_str::<EntityId>("0").is_err());
    }
}
