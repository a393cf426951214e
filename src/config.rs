use std::env;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub store_base_url: String,
    pub store_timeout_secs: u64,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            store_base_url: env::var("STORE_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string())
                .trim_end_matches('/')
                .to_string(),
            store_timeout_secs: env::var("STORE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap(),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        }
    }
}
