use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub mongodb_url: String,
    pub mongodb_database: String,
    pub mongodb_collection: String,

    // Server
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongodb_url = match lookup("MONGODB_URL") {
            Some(url) => url,
            None => {
                let user = lookup("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
                let pass = lookup("DB_PASS").ok_or(ConfigError::Missing("DB_PASS"))?;
                let host = lookup("MONGODB_HOST").ok_or(ConfigError::Missing("MONGODB_HOST"))?;
                let app_name = lookup("MONGODB_APP_NAME").unwrap_or_else(|| "Cluster0".to_string());

                format!(
                    "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName={}",
                    user, pass, host, app_name
                )
            }
        };

        Ok(Self {
            // Database
            mongodb_url,
            mongodb_database: lookup("MONGODB_DATABASE").unwrap_or_else(|| "potfolio".to_string()),
            mongodb_collection: lookup("MONGODB_COLLECTION")
                .unwrap_or_else(|| "projects".to_string()),

            // Server
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
        })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}
