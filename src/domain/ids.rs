//! Type-safe ledger identifiers.
//!
//! [`UserId`] and [`RoundId`] are newtype wrappers around [`uuid::Uuid`]
//! so a user can never be passed where a round is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Identifier of the player who placed a wager or received a payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(uuid::Uuid);

impl UserId {
    /// Creates a new random `UserId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `UserId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| AnalyticsError::InvalidArgument(format!("invalid user id: {s}")))
    }
}

/// Identifier shared by the wager and payout of a single game round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(uuid::Uuid);

impl RoundId {
    /// Creates a new random `RoundId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(UserId::new(), UserId::new());
        assert_ne!(RoundId::new(), RoundId::new());
    }

    #[test]
    fn user_id_parses_from_display() {
        let id = UserId::new();
        let Ok(parsed) = id.to_string().parse::<UserId>() else {
            panic!("display output should parse");
        };
        assert_eq!(parsed, id);
    }

    #[test]
    fn malformed_user_id_is_invalid_argument() {
        let result = "65a1f0c2e4b0a1b2c3d4e5f6".parse::<UserId>();
        assert!(matches!(result, Err(AnalyticsError::InvalidArgument(_))));
    }

    #[test]
    fn user_id_is_transparent_in_json() {
        let uuid = uuid::Uuid::new_v4();
        let json = serde_json::to_string(&UserId::from_uuid(uuid)).ok();
        assert_eq!(json, Some(format!("\"{uuid}\"")));
    }
}
