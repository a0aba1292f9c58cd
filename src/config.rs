use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub default_timezone: String,
    pub availability_cache_ttl_secs: u64, // 0 disables the cache
    pub lookup_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            default_timezone: env::var("DEFAULT_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
            availability_cache_ttl_secs: env::var("AVAILABILITY_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("AVAILABILITY_CACHE_TTL_SECS must be a number"),
            lookup_timeout_ms: env::var("LOOKUP_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("LOOKUP_TIMEOUT_MS must be a number"),
        }
    }
}
