//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::PostRepository;
use scribe_infra::database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "mongodb")]
use scribe_infra::database::{DatabaseConnection, MongoPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    /// Which backend `posts` talks to, for the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "mongodb")]
        {
            match db_config {
                Some(config) => match DatabaseConnection::init(config).await {
                    Ok(conn) => {
                        // Not fatal: requests answer 500 until the server is reachable.
                        match conn.ping().await {
                            Ok(()) => tracing::info!("Connected to MongoDB"),
                            Err(e) => tracing::error!("MongoDB is not reachable: {}", e),
                        }
                        let repo = Arc::new(MongoPostRepository::new(&conn));
                        return Self::with_repository(repo, "mongodb");
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to set up MongoDB client: {}. Using in-memory fallback.",
                            e
                        );
                    }
                },
                None => {
                    tracing::warn!("MONGO_URI not set. Running without database (in-memory mode).");
                }
            }
        }

        #[cfg(not(feature = "mongodb"))]
        {
            if db_config.is_some() {
                tracing::warn!("Built without mongodb feature - ignoring MONGO_URI");
            }
            tracing::info!("Using in-memory post repository");
        }

        Self::in_memory()
    }

    /// State backed by a fresh in-memory repository.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), "memory")
    }

    pub fn with_repository(posts: Arc<dyn PostRepository>, storage: &'static str) -> Self {
        tracing::info!(storage, "Application state initialized");
        Self { posts, storage }
    }
}
