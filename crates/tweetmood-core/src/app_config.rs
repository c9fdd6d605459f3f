use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Twitter app credentials, exchanged for an app-only bearer token on first search.
#[derive(Clone)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub base_url: String,
}

impl std::fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("consumer_key", &"[redacted]")
            .field("consumer_secret", &"[redacted]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Hosted NLU service endpoint and API key.
#[derive(Clone)]
pub struct NluCredentials {
    pub api_key: String,
    pub url: String,
    pub version: String,
}

impl std::fmt::Debug for NluCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NluCredentials")
            .field("api_key", &"[redacted]")
            .field("url", &self.url)
            .field("version", &self.version)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub static_dir: PathBuf,
    pub js_dir: PathBuf,
    pub twitter: TwitterCredentials,
    pub nlu: NluCredentials,
    pub search_terms: Vec<String>,
    pub tweet_count: usize,
    pub search_lang: String,
    pub request_timeout_secs: u64,
}
