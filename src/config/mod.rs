use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub redis: RedisConfig,
    pub recipe_api: RecipeApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub service_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub cache_ttl_seconds: u64,
    pub stale_ttl_seconds: u64,
    pub timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv::dotenv().ok();

        Ok(Config {
            service: ServiceConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("SERVER_PORT must be a valid u16"),
                service_name: env::var("SERVICE_NAME")
                    .unwrap_or_else(|_| "pantry-service".to_string()),
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            },
            recipe_api: RecipeApiConfig {
                base_url: env::var("RECIPE_API_BASE_URL")
                    .unwrap_or_else(|_| "https://api.spoonacular.com".to_string()),
                api_key: env::var("RECIPE_API_KEY").unwrap_or_default(),
                cache_ttl_seconds: env::var("RECIPE_CACHE_TTL_SECONDS")
                    .unwrap_or_else(|_| "21600".to_string())
                    .parse()
                    .expect("RECIPE_CACHE_TTL_SECONDS must be a valid u64"),
                stale_ttl_seconds: env::var("RECIPE_STALE_TTL_SECONDS")
                    .unwrap_or_else(|_| "604800".to_string())
                    .parse()
                    .expect("RECIPE_STALE_TTL_SECONDS must be a valid u64"),
                timeout_seconds: env::var("HTTP_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse()
                    .expect("HTTP_TIMEOUT_SECONDS must be a valid u64"),
            },
        })
    }
}
