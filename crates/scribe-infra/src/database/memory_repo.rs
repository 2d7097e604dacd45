//! In-memory post repository - used when MongoDB is not configured and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::domain::{Post, PostDraft, PostId};
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, PostRepository};

/// In-memory post store using a HashMap with async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&post.id) {
            return Err(RepoError::Query(format!("duplicate key: {}", post.id)));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete_by_id(&self, id: PostId) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<&Post> = store.values().collect();
        posts.sort_by(|a, b| b.id.bytes().cmp(&a.id.bytes()));

        Ok(posts
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.store.read().await.len() as u64)
    }

    async fn update_by_id(&self, id: PostId, draft: PostDraft) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.get_mut(&id).map(|post| {
            post.apply(draft);
            post.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            body: "body".to_string(),
            tags: vec!["tag".to_string()],
            published_date: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(Post::new(draft("one"))).await.unwrap();

        let found = repo.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(found, post);
        assert!(repo.find_by_id(PostId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_page_is_newest_first() {
        let repo = InMemoryPostRepository::new();
        for i in 0..15 {
            repo.insert(Post::new(draft(&format!("post {i}")))).await.unwrap();
        }

        let first = repo.find_page(0, 10).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].title, "post 14");
        assert_eq!(first[9].title, "post 5");

        let second = repo.find_page(10, 10).await.unwrap();
        assert_eq!(second.len(), 5);
        assert_eq!(second[4].title, "post 0");

        assert_eq!(repo.count().await.unwrap(), 15);
    }

    #[tokio::test]
    async fn test_update_by_id() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(Post::new(draft("old"))).await.unwrap();

        let updated = repo.update_by_id(post.id, draft("new")).await.unwrap().unwrap();
        assert_eq!(updated.id, post.id);
        assert_eq!(updated.title, "new");

        assert!(repo.update_by_id(PostId::new(), draft("x")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(Post::new(draft("gone"))).await.unwrap();

        repo.delete_by_id(post.id).await.unwrap();
        repo.delete_by_id(post.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
