use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::error::{AppError, Result};

/// Character budget requested from the model when `SUMMARY_MAX_CHARS` is unset.
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 50;

const DEFAULT_PROXY_BASE_URL: &str = "https://api.allorigins.win";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Absent key fails each summarize request with a 500, not server startup.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub proxy_base_url: String,
    pub summary_max_chars: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        // Load server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let summary_max_chars = match env::var("SUMMARY_MAX_CHARS") {
            Ok(v) => v
                .parse::<usize>()
                .map_err(|e| AppError::Config(format!("Invalid SUMMARY_MAX_CHARS: {}", e)))?,
            Err(_) => DEFAULT_SUMMARY_MAX_CHARS,
        };

        let proxy_base_url =
            env::var("PROXY_BASE_URL").unwrap_or_else(|_| DEFAULT_PROXY_BASE_URL.to_string());
        let gemini_base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            gemini_api_key,
            gemini_base_url,
            proxy_base_url,
            summary_max_chars,
        })
    }
}
