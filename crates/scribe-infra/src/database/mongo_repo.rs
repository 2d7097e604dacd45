//! MongoDB repository implementation.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::Collection;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};

use scribe_core::domain::{Post, PostDraft, PostId};
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, PostRepository};

use super::connection::DatabaseConnection;
use super::document::{POSTS_COLLECTION, PostDocument};

/// Post repository over the `posts` collection.
pub struct MongoPostRepository {
    collection: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(conn: &DatabaseConnection) -> Self {
        Self {
            collection: conn.db.collection(POSTS_COLLECTION),
        }
    }
}

fn map_err(e: MongoError) -> RepoError {
    match e.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => RepoError::Connection(e.to_string()),
        ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
            RepoError::Serialization(e.to_string())
        }
        _ => RepoError::Query(e.to_string()),
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for MongoPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let result = self
            .collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(map_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        tracing::debug!(post_id = %post.id, "Inserting post");

        let document = PostDocument::from(post.clone());
        self.collection.insert_one(document).await.map_err(map_err)?;

        Ok(post)
    }

    async fn delete_by_id(&self, id: PostId) -> Result<(), RepoError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(map_err)?;

        tracing::debug!(post_id = %id, deleted = result.deleted_count, "Deleted post");
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Post>, RepoError> {
        let cursor = self
            .collection
            .find(doc! {})
            .with_options(page_options(skip, limit))
            .await
            .map_err(map_err)?;

        let documents: Vec<PostDocument> = cursor.try_collect().await.map_err(map_err)?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(map_err)
    }

    async fn update_by_id(&self, id: PostId, draft: PostDraft) -> Result<Option<Post>, RepoError> {
        let result = self
            .collection
            .find_one_and_update(doc! { "_id": id.as_object_id() }, update_document(draft))
            .with_options(update_options())
            .await
            .map_err(map_err)?;

        Ok(result.map(Into::into))
    }
}

/// Newest first. The server stores skip and limit as signed 64-bit values;
/// a skip past `i64::MAX` still lands beyond the last post.
fn page_options(skip: u64, limit: u64) -> FindOptions {
    FindOptions::builder()
        .sort(doc! { "_id": -1 })
        .skip(skip.min(i64::MAX as u64))
        .limit(limit.min(i64::MAX as u64) as i64)
        .build()
}

/// Return the post as it is after the update.
fn update_options() -> FindOneAndUpdateOptions {
    FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build()
}

fn update_document(draft: PostDraft) -> bson::Document {
    doc! { "$set": replacement_fields(draft) }
}

/// The `$set` body for a replace: title, body and tags always, the date only when given.
fn replacement_fields(draft: PostDraft) -> bson::Document {
    let mut fields = doc! {
        "title": draft.title,
        "body": draft.body,
        "tags": draft.tags,
    };
    if let Some(published_date) = draft.published_date {
        fields.insert("publishedDate", bson::DateTime::from_chrono(published_date));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use scribe_core::domain::Page;

    #[test]
    fn test_page_options_sort_newest_first() {
        let options = page_options(20, 10);

        assert_eq!(options.sort, Some(doc! { "_id": -1 }));
        assert_eq!(options.skip, Some(20));
        assert_eq!(options.limit, Some(10));
    }

    #[test]
    fn test_page_options_for_huge_page_still_serialize() {
        let skip = Page::parse(Some("1000000000000000000")).unwrap().skip();
        assert!(skip > i64::MAX as u64);

        let options = page_options(skip, 10);
        assert_eq!(options.skip, Some(i64::MAX as u64));
        assert!(bson::to_document(&options).is_ok());
    }

    #[test]
    fn test_update_returns_document_after_change() {
        let options = update_options();
        assert!(matches!(options.return_document, Some(ReturnDocument::After)));

        let update = update_document(PostDraft {
            title: "t".to_string(),
            body: "b".to_string(),
            tags: vec![],
            published_date: None,
        });
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("body").unwrap(), "b");
        assert_eq!(update.len(), 1);
    }

    #[test]
    fn test_replacement_fields_without_date() {
        let fields = replacement_fields(PostDraft {
            title: "t".to_string(),
            body: "b".to_string(),
            tags: vec!["x".to_string()],
            published_date: None,
        });

        assert_eq!(fields.get_str("title").unwrap(), "t");
        assert_eq!(fields.get_array("tags").unwrap().len(), 1);
        assert!(!fields.contains_key("publishedDate"));
    }

    #[test]
    fn test_replacement_fields_with_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let fields = replacement_fields(PostDraft {
            title: "t".to_string(),
            body: "b".to_string(),
            tags: vec![],
            published_date: Some(date),
        });

        assert_eq!(
            fields.get_datetime("publishedDate").unwrap().to_chrono(),
            date
        );
    }
}
