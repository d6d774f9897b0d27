use std::env;
use anyhow::{Context, Result, ensure};

#[derive(Debug, Clone)]
pub struct Config {
    pub service_port: u16,
    pub service_host: String,
    pub recent_window_days: i64,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let recent_window_days = lookup("RECENT_WINDOW_DAYS")
            .unwrap_or_else(|| "7".to_string())
            .parse::<i64>()
            .context("RECENT_WINDOW_DAYS must be a whole number of days")?;
        ensure!(
            recent_window_days >= 1,
            "RECENT_WINDOW_DAYS must be at least 1, got {}",
            recent_window_days
        );

        let max_body_bytes = lookup("MAX_BODY_BYTES")
            .unwrap_or_else(|| "1048576".to_string())
            .parse::<usize>()
            .context("MAX_BODY_BYTES must be a byte count")?;

        Ok(Config {
            service_port,
            service_host,
            recent_window_days,
            max_body_bytes,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Service listening on: {}", self.bind_address());
        tracing::info!("  Recent window: {} days", self.recent_window_days);
        tracing::info!("  Max request body: {} bytes", self.max_body_bytes);
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_port: 3000,
            service_host: "0.0.0.0".to_string(),
            recent_window_days: 7,
            max_body_bytes: 1_048_576,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_with_all_vars() {
        let config = config_from(&[
            ("SERVICE_PORT", "8080"),
            ("SERVICE_HOST", "127.0.0.1"),
            ("RECENT_WINDOW_DAYS", "30"),
            ("MAX_BODY_BYTES", "2048"),
        ])
        .unwrap();

        assert_eq!(config.service_port, 8080);
        assert_eq!(config.service_host, "127.0.0.1");
        assert_eq!(config.recent_window_days, 30);
        assert_eq!(config.max_body_bytes, 2048);
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_config_with_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.service_port, 3000);
        assert_eq!(config.service_host, "0.0.0.0");
        assert_eq!(config.recent_window_days, 7);
        assert_eq!(config.max_body_bytes, 1_048_576);
    }

    #[test]
    fn test_invalid_port() {
        let result = config_from(&[("SERVICE_PORT", "not-a-number")]);
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.to_string().contains("SERVICE_PORT"));
    }

    #[test]
    fn test_port_out_of_range() {
        let result = config_from(&[("SERVICE_PORT", "99999")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_recent_window_must_be_positive() {
        let error = config_from(&[("RECENT_WINDOW_DAYS", "0")]).unwrap_err();
        assert!(error.to_string().contains("RECENT_WINDOW_DAYS"));

        let error = config_from(&[("RECENT_WINDOW_DAYS", "soon")]).unwrap_err();
        assert!(error.to_string().contains("RECENT_WINDOW_DAYS"));
    }

    #[test]
    fn test_invalid_body_limit() {
        let error = config_from(&[("MAX_BODY_BYTES", "-1")]).unwrap_err();
        assert!(error.to_string().contains("MAX_BODY_BYTES"));
    }
}
