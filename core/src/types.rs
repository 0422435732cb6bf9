//! Domain DTOs for the posts API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the mock-server crate; integration tests catch schema drift.
//! Identifiers are opaque: the server may send numbers or strings. A string
//! of digits is read as a number, the same way `PostId::from(&str)` reads a
//! route segment, so ids from payloads and from routes compare equal.
//! `createdAt` is optional; a post without one is still shown.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Server-assigned post identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PostId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => PostId::Number(n),
            Raw::Text(s) => PostId::from(s.as_str()),
        })
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(n) => write!(f, "{n}"),
            PostId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for PostId {
    fn from(n: u64) -> Self {
        PostId::Number(n)
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(n) => PostId::Number(n),
            Err(_) => PostId::Text(s.to_string()),
        }
    }
}

/// A single post returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    /// Missing or `null` on the wire means the server did not say.
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Title and content as typed by the user, before or after validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Returns the trimmed draft that may be submitted, or the reason it
    /// may not.
    pub fn validate(&self) -> Result<PostDraft, ValidationError> {
        let title = self.title.trim();
        let content = self.content.trim();
        match (title.is_empty(), content.is_empty()) {
            (true, true) => Err(ValidationError::BlankTitleAndContent),
            (true, false) => Err(ValidationError::BlankTitle),
            (false, true) => Err(ValidationError::BlankContent),
            (false, false) => Ok(PostDraft::new(title, content)),
        }
    }
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        PostDraft::new(post.title.clone(), post.content.clone())
    }
}

/// Acknowledgement of a create or update.
///
/// The server contract is loose: it may echo the post, return a bare id, or
/// send something else entirely. Only success is guaranteed.
#[derive(Debug, Clone, PartialEq)]
pub enum Saved {
    Post(Post),
    Id(PostId),
    Other(serde_json::Value),
}

impl Saved {
    pub(crate) fn from_body(body: &str) -> Saved {
        if body.trim().is_empty() {
            return Saved::Other(serde_json::Value::Null);
        }
        if let Ok(post) = serde_json::from_str::<Post>(body) {
            return Saved::Post(post);
        }
        if let Ok(id) = serde_json::from_str::<PostId>(body) {
            return Saved::Id(id);
        }
        Saved::Other(serde_json::from_str(body).unwrap_or_else(|_| body.into()))
    }

    /// The id of the saved post, when the server told us.
    pub fn id(&self) -> Option<&PostId> {
        match self {
            Saved::Post(post) => Some(&post.id),
            Saved::Id(id) => Some(id),
            Saved::Other(_) => None,
        }
    }
}

/// Accepts RFC 3339 as well as offset-less ISO-8601, which is read as UTC.
/// `null` gives `None`; any other string that is not a timestamp is an error.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_timestamp(&raw).map(Some).map_err(serde::de::Error::custom)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
}
