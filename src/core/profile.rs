//! User profile records and their historical achievement flags.
//!
//! The flags are append-only: once a flag is true it stays true. Nothing in
//! this module can clear one. `mark` is a compare-and-set that only moves a
//! flag from false to true, and `merge` ORs two records together.

use serde::{Deserialize, Serialize};

use crate::core::UserId;

/// One of the durable "has ever" flags on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoricalFlag {
    /// The user has uploaded a meme at some point.
    Uploaded,
    /// Some meme by the user has received a like at some point.
    ReceivedLike,
    /// The user has commented at some point.
    Commented,
}

impl HistoricalFlag {
    /// All flags in declaration order.
    pub const ALL: [HistoricalFlag; 3] = [
        HistoricalFlag::Uploaded,
        HistoricalFlag::ReceivedLike,
        HistoricalFlag::Commented,
    ];

    /// Field name of the flag in the profile document.
    pub fn field_name(&self) -> &'static str {
        match self {
            HistoricalFlag::Uploaded => "hasEverUploaded",
            HistoricalFlag::ReceivedLike => "hasEverReceivedLike",
            HistoricalFlag::Commented => "hasEverCommented",
        }
    }
}

/// Persisted user profile as far as the engine cares about it.
///
/// Missing flags deserialize as `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileRecord {
    /// The profile owner.
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default)]
    has_ever_uploaded: bool,
    #[serde(default)]
    has_ever_received_like: bool,
    #[serde(default)]
    has_ever_commented: bool,
}

impl UserProfileRecord {
    /// Create a profile with every flag unset.
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`mark`](Self::mark).
    pub fn with_flag(mut self, flag: HistoricalFlag) -> Self {
        self.mark(flag);
        self
    }

    /// Read a flag.
    pub fn has(&self, flag: HistoricalFlag) -> bool {
        match flag {
            HistoricalFlag::Uploaded => self.has_ever_uploaded,
            HistoricalFlag::ReceivedLike => self.has_ever_received_like,
            HistoricalFlag::Commented => self.has_ever_commented,
        }
    }

    /// Set a flag if it is not already set.
    ///
    /// Returns `true` when the flag transitioned from false to true.
    pub fn mark(&mut self, flag: HistoricalFlag) -> bool {
        let slot = match flag {
            HistoricalFlag::Uploaded => &mut self.has_ever_uploaded,
            HistoricalFlag::ReceivedLike => &mut self.has_ever_received_like,
            HistoricalFlag::Commented => &mut self.has_ever_commented,
        };
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    /// Fold another snapshot of the same profile into this one.
    ///
    /// A flag set in either snapshot is set in the result, so a stale
    /// snapshot can never un-earn an achievement.
    pub fn merge(&mut self, other: &UserProfileRecord) {
        for flag in HistoricalFlag::ALL {
            if other.has(flag) {
                self.mark(flag);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_has_no_flags() {
        let profile = UserProfileRecord::new("A");
        for flag in HistoricalFlag::ALL {
            assert!(!profile.has(flag));
        }
    }

    #[test]
    fn test_mark_transitions_once() {
        let mut profile = UserProfileRecord::new("A");
        assert!(profile.mark(HistoricalFlag::Uploaded));
        assert!(!profile.mark(HistoricalFlag::Uploaded));
        assert!(profile.has(HistoricalFlag::Uploaded));
        assert!(!profile.has(HistoricalFlag::Commented));
    }

    #[test]
    fn test_merge_never_clears() {
        let mut current = UserProfileRecord::new("A").with_flag(HistoricalFlag::ReceivedLike);
        let stale = UserProfileRecord::new("A");

        current.merge(&stale);
        assert!(current.has(HistoricalFlag::ReceivedLike));

        let newer = UserProfileRecord::new("A").with_flag(HistoricalFlag::Commented);
        current.merge(&newer);
        assert!(current.has(HistoricalFlag::ReceivedLike));
        assert!(current.has(HistoricalFlag::Commented));
    }

    #[test]
    fn test_deserialize_document_shape() {
        let json = r#"{"userId": "A", "hasEverUploaded": true, "displayName": "ignored"}"#;
        let profile: UserProfileRecord = serde_json::from_str(json).unwrap();

        assert_eq!(profile.user_id, "A");
        assert!(profile.has(HistoricalFlag::Uploaded));
        assert!(!profile.has(HistoricalFlag::ReceivedLike));
        assert!(!profile.has(HistoricalFlag::Commented));
    }

    #[test]
    fn test_serialized_field_names_match_flag_names() {
        let mut profile = UserProfileRecord::new("A");
        for flag in HistoricalFlag::ALL {
            profile.mark(flag);
        }
        let value = serde_json::to_value(&profile).unwrap();
        for flag in HistoricalFlag::ALL {
            assert_eq!(value[flag.field_name()], serde_json::Value::Bool(true));
        }
    }
}
