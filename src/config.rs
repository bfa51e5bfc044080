use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    /// Route bulk-imported bookings through the capacity check as well
    pub enforce_capacity_on_import: bool,
    pub log_requests: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/bookings.db".to_string());

        let database_max_connections: u32 = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .map_err(|_| "Invalid DATABASE_MAX_CONNECTIONS")?;
        if database_max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be at least 1".to_string());
        }

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let enforce_capacity_on_import = parse_flag(
            "ENFORCE_CAPACITY_ON_IMPORT",
            env::var("ENFORCE_CAPACITY_ON_IMPORT").ok(),
        )?;

        let log_requests = parse_flag("LOG_REQUESTS", env::var("LOG_REQUESTS").ok())?;

        Ok(Config {
            server_host,
            server_port,
            database_path,
            database_max_connections,
            allowed_origins,
            environment,
            enforce_capacity_on_import,
            log_requests,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Parse an optional boolean environment value; unset means false
fn parse_flag(name: &str, value: Option<String>) -> Result<bool, String> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "" | "0" | "false" | "no" | "off" => Ok(false),
            "1" | "true" | "yes" | "on" => Ok(true),
            _ => Err(format!("Invalid {name}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("X", None), Ok(false));
        assert_eq!(parse_flag("X", Some("TRUE".into())), Ok(true));
        assert_eq!(parse_flag("X", Some(" 1 ".into())), Ok(true));
        assert_eq!(parse_flag("X", Some("off".into())), Ok(false));
        assert_eq!(parse_flag("X", Some("maybe".into())), Err("Invalid X".to_string()));
    }

    #[test]
    fn test_server_address() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 9000,
            database_path: String::new(),
            database_max_connections: 1,
            allowed_origins: vec![],
            environment: "test".to_string(),
            enforce_capacity_on_import: false,
            log_requests: false,
        };
        assert_eq!(config.server_address(), "127.0.0.1:9000");
    }
}
