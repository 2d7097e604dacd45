use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostId};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity and return it as stored.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Deleting a missing ID is not an error.
    async fn delete_by_id(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// Posts sorted by descending id, after skipping `skip` of them.
    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Total number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Replace the mutable fields of a post and return the updated post,
    /// or `None` when no post has that id.
    async fn update_by_id(&self, id: PostId, draft: PostDraft) -> Result<Option<Post>, RepoError>;
}
