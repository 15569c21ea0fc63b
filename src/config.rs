//! Load configuration and provider selection.

use std::path::PathBuf;
use std::str::FromStr;

use seedbed_loader::{LoadError, LoadResult};

/// Supported database providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// PostgreSQL.
    Postgres,
    /// MySQL.
    Mysql,
}

impl Provider {
    /// Infer the provider from a connection URL's scheme.
    pub fn from_url(url: &str) -> Option<Self> {
        let parsed = url::Url::parse(url).ok()?;
        match parsed.scheme() {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "mysql" => Some(Self::Mysql),
            _ => None,
        }
    }
}

impl FromStr for Provider {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" => Ok(Self::Mysql),
            other => Err(LoadError::config(format!(
                "unsupported provider '{}' (supported: postgres, mysql)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Mysql => write!(f, "mysql"),
        }
    }
}

/// Configuration for one load operation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the fixture document.
    pub file_path: PathBuf,
    /// Database connection URL.
    pub database_url: String,
    /// Explicit provider; inferred from the URL scheme when absent.
    pub provider: Option<Provider>,
    /// Empty tables before inserting.
    pub truncate: bool,
    /// Reset sequences / auto-increment counters after inserting.
    pub reset_sequences: bool,
    /// Render statements instead of executing them.
    pub dry_run: bool,
    /// Schema used for unqualified table names.
    pub default_schema: String,
}

impl Config {
    /// Create a configuration with the defaults: truncate and sequence
    /// reset on, dry-run off, default schema `public`.
    pub fn new(file_path: impl Into<PathBuf>, database_url: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            database_url: database_url.into(),
            provider: None,
            truncate: true,
            reset_sequences: true,
            dry_run: false,
            default_schema: "public".to_string(),
        }
    }

    /// Set the provider explicitly instead of inferring it from the URL.
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Enable or disable truncation.
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Enable or disable sequence reset.
    pub fn reset_sequences(mut self, reset: bool) -> Self {
        self.reset_sequences = reset;
        self
    }

    /// Enable or disable dry-run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the schema used for unqualified table names.
    pub fn default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = schema.into();
        self
    }

    /// Fail fast on missing required settings, before any I/O.
    pub fn validate(&self) -> LoadResult<()> {
        if self.file_path.as_os_str().is_empty() {
            return Err(LoadError::config("fixture file path is required"));
        }
        if self.database_url.is_empty() {
            return Err(LoadError::config("database connection URL is required"));
        }
        if self.default_schema.is_empty() {
            return Err(LoadError::config("default schema must not be empty"));
        }
        self.resolved_provider()?;
        Ok(())
    }

    /// The provider to use: the explicit one, or the URL scheme's.
    pub fn resolved_provider(&self) -> LoadResult<Provider> {
        if let Some(provider) = self.provider {
            return Ok(provider);
        }
        Provider::from_url(&self.database_url).ok_or_else(|| {
            LoadError::config(format!(
                "cannot infer provider from URL '{}'; set one explicitly",
                self.database_url
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_url() {
        assert_eq!(
            Provider::from_url("postgres://localhost/db"),
            Some(Provider::Postgres)
        );
        assert_eq!(
            Provider::from_url("postgresql://localhost/db"),
            Some(Provider::Postgres)
        );
        assert_eq!(
            Provider::from_url("mysql://localhost/db"),
            Some(Provider::Mysql)
        );
        assert_eq!(Provider::from_url("sqlite://db"), None);
        assert_eq!(Provider::from_url("not a url"), None);
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("postgres".parse::<Provider>().unwrap(), Provider::Postgres);
        assert_eq!("MySQL".parse::<Provider>().unwrap(), Provider::Mysql);
        assert!("oracle".parse::<Provider>().is_err());
    }

    #[test]
    fn test_validate_requires_file_and_url() {
        let config = Config::new("", "postgres://localhost/db");
        assert!(config.validate().is_err());

        let config = Config::new("fixtures.yml", "");
        assert!(config.validate().is_err());

        let config = Config::new("fixtures.yml", "postgres://localhost/db");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolved_provider_prefers_explicit() {
        let config =
            Config::new("fixtures.yml", "postgres://localhost/db").provider(Provider::Mysql);
        assert_eq!(config.resolved_provider().unwrap(), Provider::Mysql);
    }

    #[test]
    fn test_resolved_provider_rejects_unknown_scheme() {
        let config = Config::new("fixtures.yml", "sqlite://db");
        assert!(matches!(
            config.resolved_provider(),
            Err(LoadError::Config(_))
        ));
    }
}
