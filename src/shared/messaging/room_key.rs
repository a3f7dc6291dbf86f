//! Canonical Room Keys
//!
//! A direct chat belongs to an unordered pair of identities. `RoomKey` turns
//! any ordering of that pair into the same value, so a sender-initiated and a
//! receiver-initiated request land in the same room without coordinating.
//!
//! The string form sorts both identifiers by byte order and joins them with
//! [`KEY_SEPARATOR`]: `("bob", "alice")` becomes `alice-bob`.
//!
//! Identifiers may themselves contain the separator, so the string form is
//! for display only. Two keys are equal when their sorted pairs are equal:
//! `("a-b", "c")` and `("a", "b-c")` both print as `a-b-c` but name
//! different rooms.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::error::ChatError;

/// Separator between the two identifiers of a canonical key
pub const KEY_SEPARATOR: char = '-';

/// Order-independent identity of a two-party room
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct RoomKey {
    participants: [String; 2],
}

impl RoomKey {
    /// Build a key from two identifiers in any order
    ///
    /// # Errors
    ///
    /// `InvalidParticipants` when either identifier is blank or both are equal.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Result<Self, ChatError> {
        let a = a.into();
        let b = b.into();
        validate_identifier(&a)?;
        validate_identifier(&b)?;

        if a == b {
            return Err(ChatError::invalid_participants(format!(
                "participants must be distinct, got '{}' twice",
                a
            )));
        }

        let participants = if a < b { [a, b] } else { [b, a] };
        Ok(Self { participants })
    }

    /// Build a key from a participant list, which must hold exactly two entries
    pub fn from_participants(participants: &[String]) -> Result<Self, ChatError> {
        match participants {
            [a, b] => Self::new(a.as_str(), b.as_str()),
            other => Err(ChatError::invalid_participants(format!(
                "expected exactly 2 participants, got {}",
                other.len()
            ))),
        }
    }

    /// Every key whose string form is `key`, splitting at each separator
    ///
    /// Only splits where the left side sorts first are kept, since `Display`
    /// always prints the smaller identifier first.
    pub fn candidates(key: &str) -> Vec<Self> {
        key.match_indices(KEY_SEPARATOR)
            .filter_map(|(at, sep)| {
                let (a, b) = (&key[..at], &key[at + sep.len()..]);
                if a < b {
                    Self::new(a, b).ok()
                } else {
                    None
                }
            })
            .collect()
    }

    /// Parse a string form that splits into exactly one key
    ///
    /// # Errors
    ///
    /// `InvalidParticipants` when no split is valid or several are.
    pub fn parse(key: &str) -> Result<Self, ChatError> {
        let mut candidates = Self::candidates(key);
        match candidates.len() {
            1 => Ok(candidates.remove(0)),
            0 => Err(ChatError::invalid_participants(format!(
                "'{}' is not a canonical room key",
                key
            ))),
            n => Err(ChatError::invalid_participants(format!(
                "'{}' is ambiguous between {} rooms",
                key, n
            ))),
        }
    }

    /// Both participants, sorted
    pub fn participants(&self) -> &[String; 2] {
        &self.participants
    }

    /// Whether `identity` is one of the two participants
    pub fn contains(&self, identity: &str) -> bool {
        self.participants.iter().any(|p| p == identity)
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.participants[0], KEY_SEPARATOR, self.participants[1]
        )
    }
}

impl TryFrom<Vec<String>> for RoomKey {
    type Error = ChatError;

    fn try_from(participants: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_participants(&participants)
    }
}

impl From<RoomKey> for Vec<String> {
    fn from(key: RoomKey) -> Self {
        key.participants.into()
    }
}

/// Canonical key string for an unordered pair of identifiers
///
/// ```rust
/// use pairchat::shared::messaging::canonical_key;
///
/// assert_eq!(canonical_key("bob", "alice").unwrap(), "alice-bob");
/// assert_eq!(canonical_key("alice", "bob").unwrap(), "alice-bob");
/// assert!(canonical_key("alice", "alice").is_err());
/// ```
pub fn canonical_key(a: &str, b: &str) -> Result<String, ChatError> {
    RoomKey::new(a, b).map(|key| key.to_string())
}

fn validate_identifier(identity: &str) -> Result<(), ChatError> {
    if identity.trim().is_empty() {
        return Err(ChatError::invalid_participants(
            "participant identifiers must not be empty",
        ));
    }
    Ok(())
}
