use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub store: StoreConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Behavior of the in-memory registry.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Artificial latency applied to every store operation, emulating a
    /// remote data source for console development. Zero disables it.
    pub latency: Duration,
    /// What happens to dependent records when a region or cooperative is
    /// deleted.
    pub delete_policy: DeletePolicy,
}

/// Delete policy for records that still have dependents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Refuse the delete while dependents exist.
    Restrict,
    /// Delete the record together with all of its descendants.
    Cascade,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            store: StoreConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StoreConfig {
    /// The latency the original console was developed against.
    const DEFAULT_LATENCY_MS: u64 = 500;

    pub fn from_env() -> Result<Self, String> {
        let latency_ms = env::var("STORE_LATENCY_MS")
            .unwrap_or_else(|_| Self::DEFAULT_LATENCY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "STORE_LATENCY_MS must be a valid number".to_string())?;

        let delete_policy = match env::var("REGION_DELETE_POLICY")
            .unwrap_or_else(|_| "restrict".to_string())
            .to_lowercase()
            .as_str()
        {
            "restrict" => DeletePolicy::Restrict,
            "cascade" => DeletePolicy::Cascade,
            other => {
                return Err(format!(
                    "REGION_DELETE_POLICY must be 'restrict' or 'cascade', got '{}'",
                    other
                ))
            }
        };

        Ok(Self {
            latency: Duration::from_millis(latency_ms),
            delete_policy,
        })
    }

    /// Config for tests and tools: no latency, restrict deletes.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            delete_policy: DeletePolicy::Restrict,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Koperasi API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the koperasi registry".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
