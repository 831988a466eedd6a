use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::export::PageGeometry;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Cosmetic "analyzing…" delay before a report is published.
    pub analysis_delay_ms: u64,
    /// How long a finished analysis is kept when the client never closes it.
    pub analysis_retention_ms: u64,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            analysis_delay_ms: parse_env("ANALYSIS_DELAY_MS", 1500)?,
            analysis_retention_ms: parse_env("ANALYSIS_RETENTION_MS", 600_000)?,
            page_width_mm: parse_env("PAGE_WIDTH_MM", 210.0)?,
            page_height_mm: parse_env("PAGE_HEIGHT_MM", 295.0)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("PAGE_WIDTH_MM", self.page_width_mm),
            ("PAGE_HEIGHT_MM", self.page_height_mm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                bail!("{key} must be a positive number of millimetres, got {value}");
            }
        }
        Ok(())
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn analysis_retention(&self) -> Duration {
        Duration::from_millis(self.analysis_retention_ms)
    }

    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry {
            page_width_mm: self.page_width_mm,
            page_height_mm: self.page_height_mm,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: f32, height: f32) -> Config {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            analysis_delay_ms: 1500,
            analysis_retention_ms: 600_000,
            page_width_mm: width,
            page_height_mm: height,
        }
    }

    #[test]
    fn test_page_geometry_and_delay() {
        let cfg = config(210.0, 295.0);
        assert_eq!(cfg.page_geometry(), PageGeometry::default());
        assert_eq!(cfg.analysis_delay(), Duration::from_millis(1500));
        assert_eq!(cfg.analysis_retention(), Duration::from_secs(600));
    }

    #[test]
    fn test_rejects_non_positive_page_size() {
        assert!(config(0.0, 295.0).validate().is_err());
        assert!(config(210.0, -1.0).validate().is_err());
        assert!(config(f32::NAN, 295.0).validate().is_err());
        assert!(config(216.0, 279.0).validate().is_ok());
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("FOLIO_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
