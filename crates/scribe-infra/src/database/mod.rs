//! Database connection management and post repositories.

mod connection;
mod memory_repo;

#[cfg(feature = "mongodb")]
pub mod document;
#[cfg(feature = "mongodb")]
mod mongo_repo;

pub use connection::DatabaseConfig;
pub use memory_repo::InMemoryPostRepository;

#[cfg(feature = "mongodb")]
pub use connection::DatabaseConnection;
#[cfg(feature = "mongodb")]
pub use mongo_repo::MongoPostRepository;
