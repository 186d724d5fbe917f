use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use recommend::LlmConfig;
use recommend::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use secrecy::SecretString;

#[derive(Debug)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = var("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("OPENAI_API_KEY is not set")?;

        let timeout = match var("LLM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("LLM_TIMEOUT_SECS must be a whole number, got {:?}", raw))?;
                if secs == 0 {
                    bail!("LLM_TIMEOUT_SECS must be greater than zero");
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let mut server = ServerConfig::default();
        if let Some(addr) = var("BIND_ADDR") {
            server.bind_addr = addr
                .parse()
                .with_context(|| format!("BIND_ADDR is not a socket address: {:?}", addr))?;
        }
        if let Some(format) = var("LOG_FORMAT") {
            server.log_format = match format.to_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                other => bail!("LOG_FORMAT must be 'text' or 'json', got {:?}", other),
            };
        }

        Ok(Self {
            llm: LlmConfig {
                base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_key: SecretString::new(api_key.trim().to_string()),
                timeout,
            },
            server,
        })
    }
}
