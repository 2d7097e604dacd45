use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Post identifier - a 12-byte ObjectId, written as 24 hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(ObjectId);

impl PostId {
    /// Generate a fresh id.
    ///
    /// The leading 4 bytes are the creation second, so a later id never sorts
    /// below one from an earlier second. Within one second ordering follows a
    /// 3-byte counter, which can wrap.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Raw bytes in storage order.
    pub fn bytes(&self) -> [u8; 12] {
        self.0.bytes()
    }

    /// Whether `raw` has the shape of an id. Does not check existence.
    pub fn is_valid(raw: &str) -> bool {
        ObjectId::parse_str(raw).is_ok()
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for PostId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for PostId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// A validated create/replace payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    /// Only set when the payload carried one.
    pub published_date: Option<DateTime<Utc>>,
}

/// Post entity - a blog post.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub published_date: DateTime<Utc>,
}

impl Post {
    /// Create a new post from a validated draft.
    pub fn new(draft: PostDraft) -> Self {
        Self {
            id: PostId::new(),
            title: draft.title,
            body: draft.body,
            tags: draft.tags,
            published_date: draft.published_date.unwrap_or_else(Utc::now),
        }
    }

    /// Replace the mutable fields. The publish date is kept unless the draft has one.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.body = draft.body;
        self.tags = draft.tags;
        if let Some(published_date) = draft.published_date {
            self.published_date = published_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            title: "Hello".to_string(),
            body: "World".to_string(),
            tags: vec!["intro".to_string()],
            published_date: None,
        }
    }

    #[test]
    fn test_new_post_defaults_published_date_to_now() {
        let before = Utc::now();
        let post = Post::new(draft());
        assert!(post.published_date >= before);
        assert_eq!(post.tags, vec!["intro".to_string()]);
    }

    #[test]
    fn test_apply_keeps_id_and_date_when_not_supplied() {
        let mut post = Post::new(draft());
        let (id, date) = (post.id, post.published_date);

        post.apply(PostDraft {
            title: "New".to_string(),
            body: "Body".to_string(),
            tags: vec![],
            published_date: None,
        });

        assert_eq!(post.id, id);
        assert_eq!(post.published_date, date);
        assert_eq!(post.title, "New");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_post_id_parsing() {
        assert!(PostId::is_valid("507f1f77bcf86cd799439011"));
        assert!(!PostId::is_valid("507f1f77bcf86cd79943901"));
        assert!(!PostId::is_valid("zzzzzzzzzzzzzzzzzzzzzzzz"));

        let id: PostId = "507f1f77bcf86cd799439011".parse().unwrap();
        assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
        assert!(matches!(
            "nope".parse::<PostId>(),
            Err(DomainError::InvalidId(_))
        ));
    }

    #[test]
    fn test_later_ids_never_carry_an_older_timestamp() {
        let first = PostId::new();
        let second = PostId::new();
        assert_ne!(first, second);
        assert!(second.bytes()[..4] >= first.bytes()[..4]);
    }
}
