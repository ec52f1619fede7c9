use anyhow::{anyhow, Context, Result};

use crate::layout::PaperSize;

/// Application configuration loaded from environment variables.
/// Every variable has a default; a present but invalid value fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub paper_size: PaperSize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;
        let paper_size = match lookup("PAPER_SIZE") {
            Some(value) => value
                .parse::<PaperSize>()
                .map_err(|e| anyhow!(e))
                .context("PAPER_SIZE must be 'letter' or 'a4'")?,
            None => PaperSize::default(),
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            paper_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.paper_size, PaperSize::Letter);
    }

    #[test]
    fn test_a4_paper() {
        let config = load(&[("PAPER_SIZE", "A4"), ("PORT", "3000")]).unwrap();
        assert_eq!(config.paper_size, PaperSize::A4);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(load(&[("PORT", "eighty")]).is_err(), "non-numeric port must fail");
        let err = load(&[("PAPER_SIZE", "legal")]).unwrap_err();
        assert!(err.to_string().contains("PAPER_SIZE"), "{err}");
    }
}
