//! Content record types.
//!
//! A content record is one meme with its embedded likes and comments, shaped
//! the way the document store returns it (camelCase field names). The engine
//! only ever reads these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a user as stored in content and profile documents.
pub type UserId = String;

/// One like on a content record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    /// The user who liked the content.
    #[serde(default, deserialize_with = "nullable_string")]
    pub user_id: UserId,
}

/// One comment on a content record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// The user who wrote the comment.
    #[serde(default, deserialize_with = "nullable_string")]
    pub user_id: UserId,
    /// Comment body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// When the comment was posted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A piece of user-generated content (a meme).
///
/// Records with missing or `null` `likes` / `comments` deserialize with empty
/// sequences, and a `null` id deserializes as `""`, which matches no user. A
/// malformed record is an empty record, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Document id.
    #[serde(default, deserialize_with = "nullable_string")]
    pub id: String,
    /// The user who uploaded the content.
    #[serde(default, deserialize_with = "nullable_string")]
    pub author_id: UserId,
    /// Likes in the order they were given.
    #[serde(default, deserialize_with = "nullable_seq")]
    pub likes: Vec<Like>,
    /// Comments in the order they were posted.
    #[serde(default, deserialize_with = "nullable_seq")]
    pub comments: Vec<Comment>,
}

impl ContentRecord {
    /// Create an empty record authored by `author_id`.
    pub fn new(id: impl Into<String>, author_id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            likes: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Add a like from `user_id`.
    pub fn with_like(mut self, user_id: impl Into<UserId>) -> Self {
        self.likes.push(Like {
            user_id: user_id.into(),
        });
        self
    }

    /// Add a comment from `user_id`.
    pub fn with_comment(mut self, user_id: impl Into<UserId>) -> Self {
        self.comments.push(Comment {
            user_id: user_id.into(),
            ..Comment::default()
        });
        self
    }

    /// Whether `user_id` authored this record.
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }

    /// Number of comments on this record written by `user_id`.
    pub fn comments_by(&self, user_id: &str) -> usize {
        self.comments.iter().filter(|c| c.user_id == user_id).count()
    }
}

/// Treat an explicit `null` the same as a missing field.
fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Sequence form of `nullable_string`.
fn nullable_seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
