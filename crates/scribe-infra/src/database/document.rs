//! BSON mapping for the `posts` collection.

use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use scribe_core::domain::Post;

/// Name of the collection holding posts.
pub const POSTS_COLLECTION: &str = "posts";

/// A post as stored in MongoDB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "publishedDate")]
    pub published_date: bson::DateTime,
}

/// Conversion from stored document to domain Post.
impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Self {
            id: doc.id.into(),
            title: doc.title,
            body: doc.body,
            tags: doc.tags,
            published_date: doc.published_date.to_chrono(),
        }
    }
}

/// Conversion from domain Post to stored document.
impl From<Post> for PostDocument {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.as_object_id(),
            title: post.title,
            body: post.body,
            tags: post.tags,
            published_date: bson::DateTime::from_chrono(post.published_date),
        }
    }
}
