use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

const DEFAULT_COMPLETION_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_MAX_CONTEXT_CHARS: usize = 24_000;

// The school pages fed into every chat request. Fixed at startup; the env
// override takes a comma-separated list.
const DEFAULT_PAGES: &[&str] = &[
    "https://sjcsvns.org/",
    "https://sjcsvns.org/about.php",
    "https://sjcsvns.org/faculty.php?fac=Senior%20Wing",
];

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub openrouter_api_key: Option<String>,
    pub esp32_addr: Option<String>,
    pub deepgram_api_key: Option<String>,
    pub pages: Vec<String>,
    pub completion_url: String,
    pub max_context_chars: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        // The completion key is deliberately optional here: without it the
        // server still boots and serves /esp32 and /say, while every /chat
        // fails at the completion client.
        let openrouter_api_key = opt_env("OPENROUTER_API_KEY");
        let esp32_addr = opt_env("ESP32_IP");
        let deepgram_api_key = opt_env("DEEPGRAM_API_KEY");

        let completion_url =
            opt_env("OPENROUTER_URL").unwrap_or_else(|| DEFAULT_COMPLETION_URL.to_string());

        let pages = match opt_env("SCHOOL_PAGES") {
            Some(list) => parse_pages(&list),
            None => DEFAULT_PAGES.iter().map(|url| url.to_string()).collect(),
        };

        let max_context_chars = match opt_env("MAX_CONTEXT_CHARS") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| AppError::Config(format!("Invalid MAX_CONTEXT_CHARS: {}", e)))?,
            None => DEFAULT_MAX_CONTEXT_CHARS,
        };

        // Load server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        Ok(Config {
            server_addr,
            openrouter_api_key,
            esp32_addr,
            deepgram_api_key,
            pages,
            completion_url,
            max_context_chars,
        })
    }
}

// Blank values count as unset so an empty `ESP32_IP=` line behaves like a
// missing one.
fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_pages(list: &str) -> Vec<String> {
    list.split(',')
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(|url| url.to_string())
        .collect()
}
