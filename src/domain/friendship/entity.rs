//! Profile and friend edge types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::user::{User, UserId};

/// Profile identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(i64);

impl ProfileId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-user record holding the friend relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: ProfileId,
    user_id: UserId,
}

impl Profile {
    pub fn new(id: ProfileId, user_id: UserId) -> Self {
        Self { id, user_id }
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Errors raised when building a friend edge
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FriendEdgeError {
    #[error("You cannot add yourself as a friend")]
    SelfLoop,
}

/// Undirected edge between two distinct profiles
///
/// The pair is normalized so that `low < high`; `(a, b)` and `(b, a)` build
/// the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FriendEdge {
    low: ProfileId,
    high: ProfileId,
}

impl FriendEdge {
    pub fn new(a: ProfileId, b: ProfileId) -> Result<Self, FriendEdgeError> {
        if a == b {
            return Err(FriendEdgeError::SelfLoop);
        }

        let (low, high) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { low, high })
    }

    pub fn low(&self) -> ProfileId {
        self.low
    }

    pub fn high(&self) -> ProfileId {
        self.high
    }

    /// The endpoint opposite to `profile`, if the edge touches it
    pub fn other(&self, profile: ProfileId) -> Option<ProfileId> {
        if self.low == profile {
            Some(self.high)
        } else if self.high == profile {
            Some(self.low)
        } else {
            None
        }
    }
}

/// A friend as exposed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: UserId,
    pub username: String,
}

impl From<&User> for Friend {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
        }
    }
}

/// A caller's profile together with its resolved friends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendList {
    pub profile_id: ProfileId,
    pub user_id: UserId,
    pub username: String,
    pub friends: Vec<Friend>,
}
