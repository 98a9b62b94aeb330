use std::env;

/// Signing secret used when `JWT_SECRET` is not set. Only suitable for local
/// development.
pub const DEV_JWT_SECRET: &str = "your_super_secret_key";

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_ttl_hours: i64,
    pub refresh_token_ttl_hours: i64,
    pub require_auth: bool,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let database_url = env
            ::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL is not defined in environment variables")?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET is not set, falling back to the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let access_token_ttl_hours = Self::parse_hours("ACCESS_TOKEN_TTL_HOURS", "1")?;
        let refresh_token_ttl_hours = Self::parse_hours("REFRESH_TOKEN_TTL_HOURS", "10")?;

        let require_auth = Self::parse_flag(
            &env::var("REQUIRE_AUTH").unwrap_or_else(|_| "false".to_string())
        )?;

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()?;

        Ok(Config {
            database_url,
            jwt_secret,
            access_token_ttl_hours,
            refresh_token_ttl_hours,
            require_auth,
            server_host,
            server_port,
        })
    }

    fn parse_hours(key: &str, default: &str) -> Result<i64, Box<dyn std::error::Error>> {
        Self::validate_hours(key, &env::var(key).unwrap_or_else(|_| default.to_string()))
    }

    fn validate_hours(key: &str, raw: &str) -> Result<i64, Box<dyn std::error::Error>> {
        let hours: i64 = raw
            .trim()
            .parse()
            .map_err(|_| format!("{} must be a whole number of hours", key))?;

        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
            return Err(
                format!("{} must be between 1 and {} hours", key, MAX_TOKEN_TTL_HOURS).into()
            );
        }

        Ok(hours)
    }

    fn parse_flag(value: &str) -> Result<bool, Box<dyn std::error::Error>> {
        match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(format!("Invalid boolean flag: {}", other).into()),
        }
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
