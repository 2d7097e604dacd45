use std::time::Duration;

#[cfg(feature = "mongodb")]
use mongodb::{Client, Database, bson::doc, options::ClientOptions};

/// Configuration for the MongoDB connection.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    /// Database used when the URI does not name one.
    pub database: String,
    pub max_pool_size: u32,
    pub connect_timeout: Duration,
}

/// Process-wide MongoDB handle. Cloning shares the underlying pool.
///
/// # Example
/// ```ignore
/// let conn = DatabaseConnection::init(&config).await?;
/// let repo = MongoPostRepository::new(&conn);
/// ```
#[cfg(feature = "mongodb")]
#[derive(Clone)]
pub struct DatabaseConnection {
    pub client: Client,
    pub db: Database,
}

#[cfg(feature = "mongodb")]
impl DatabaseConnection {
    /// Build the client from configuration.
    ///
    /// The driver connects lazily; this only fails on an unusable URI.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, mongodb::error::Error> {
        tracing::info!("Initializing MongoDB client...");

        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some("scribe".to_string());
        options.max_pool_size = Some(config.max_pool_size);
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);

        let client = Client::with_options(options)?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.database));

        tracing::info!(
            "MongoDB client ready (database: {}, pool: {})",
            db.name(),
            config.max_pool_size
        );

        Ok(Self { client, db })
    }

    /// Round-trip to the server to check it is reachable.
    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
