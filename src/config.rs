use crate::error::AppError;

/// Connection settings, read from the environment with local-dev defaults.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub database: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            mongodb_uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| "plume".to_string()),
        }
    }

    /// Connect to MongoDB and return a handle to the configured database.
    pub async fn connect(&self) -> Result<mongodb::Database, AppError> {
        let client = mongodb::Client::with_uri_str(&self.mongodb_uri)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!("Connected to MongoDB at {}", self.mongodb_uri);
        Ok(client.database(&self.database))
    }
}
