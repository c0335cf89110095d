use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A comment as it travels over the wire and through the service layer.
///
/// `id` is zero until storage assigns one. Text attributes are opaque and
/// omitted from the JSON form when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Comment {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Default::default()
        }
    }

    /// Overwrite every attribute the patch carries; attributes missing from
    /// the patch keep their current value. `id` is never touched.
    pub fn apply(&mut self, patch: Comment) {
        if patch.slug.is_some() {
            self.slug = patch.slug;
        }
        if patch.body.is_some() {
            self.body = patch.body;
        }
        if patch.author.is_some() {
            self.author = patch.author;
        }
    }
}

// `"id": null` decodes like a missing id
fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifier of a stored comment. Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CommentId(u64);

impl CommentId {
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidCommentId {
    #[error("id is empty")]
    Empty,
    #[error("id '{0}' is not a base-10 unsigned integer")]
    NotANumber(String),
    #[error("id must be greater than zero")]
    Zero,
}

impl FromStr for CommentId {
    type Err = InvalidCommentId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(InvalidCommentId::Empty);
        }
        // u64::from_str accepts a leading '+', the wire format does not
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidCommentId::NotANumber(raw.to_string()));
        }
        let value: u64 = raw
            .parse()
            .map_err(|_| InvalidCommentId::NotANumber(raw.to_string()))?;
        CommentId::new(value).ok_or(InvalidCommentId::Zero)
    }
}

/// Row shape of the `comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = std::num::TryFromIntError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: u64::try_from(row.id)?,
            slug: row.slug,
            body: row.body,
            author: row.author,
        })
    }
}
