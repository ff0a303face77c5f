use std::env;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub socket_url: String,
    pub email: String,
    pub password: String,
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api".to_string()),
            socket_url: env::var("SOCKET_URL")
                .unwrap_or_else(|_| "ws://localhost:3000/ws".to_string()),
            email: required("AGENT_EMAIL")?,
            password: required("AGENT_PASSWORD")?,
            http_port: parse_or_default("HTTP_PORT", 9090)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
        })
    }
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::Config(format!("{key} must be set")))
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Config(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
