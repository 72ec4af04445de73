use crate::utils::error::AppError;
use std::env;

pub const DEFAULT_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "https://bloodaid-272ba.web.app",
    "https://bloodaid-272ba.firebaseapp.com",
];

const DEFAULT_CLUSTER: &str = "cluster0.qrif73o.mongodb.net";

/// Runtime configuration, read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub db_user: Option<String>,
    pub db_pass: Option<String>,
    pub db_cluster: String,
    pub db_name: String,
    pub token_secret: String,
    pub environment: String,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match get("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::ConfigError(format!("PORT must be a port number, got '{}'", port)))?,
            None => 5000,
        };

        let token_secret = get("ACCESS_TOKEN_SECRET")
            .ok_or_else(|| AppError::ConfigError("ACCESS_TOKEN_SECRET must be set".to_string()))?;

        let database_url = get("DATABASE_URL");
        let db_user = get("DB_USER");
        let db_pass = get("DB_PASS");
        if database_url.is_none() && (db_user.is_none() || db_pass.is_none()) {
            return Err(AppError::ConfigError(
                "either DATABASE_URL or both DB_USER and DB_PASS must be set".to_string(),
            ));
        }

        let allowed_origins = match get("CORS_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            None => DEFAULT_ORIGINS.iter().map(|origin| origin.to_string()).collect(),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            db_user,
            db_pass,
            db_cluster: get("DB_CLUSTER").unwrap_or_else(|| DEFAULT_CLUSTER.to_string()),
            db_name: get("DB_NAME").unwrap_or_else(|| "bloodBank".to_string()),
            token_secret,
            environment: get("NODE_ENV").unwrap_or_else(|| "development".to_string()),
            allowed_origins,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn mongo_uri(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        format!(
            "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName=Cluster0",
            urlencoding::encode(self.db_user.as_deref().unwrap_or_default()),
            urlencoding::encode(self.db_pass.as_deref().unwrap_or_default()),
            self.db_cluster
        )
    }

    /// Cluster address without credentials, safe to log
    pub fn database_host(&self) -> String {
        match &self.database_url {
            Some(url) => url
                .rsplit_once('@')
                .map(|(_, host)| host.to_string())
                .unwrap_or_else(|| url.clone()),
            None => self.db_cluster.clone(),
        }
    }
}
