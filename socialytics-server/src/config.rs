use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::db::PoolOptions;

#[derive(Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Database {
    pub path: String,
    pub pool_size: u32,
    /// Load the Alice/Bob/Charlie sample when the Users table is empty
    pub seed_sample_data: bool,
}

#[derive(Debug, Deserialize)]
pub struct Analytics {
    /// Rows returned by influencer and activity rankings when no limit is given
    pub default_limit: i64,
    pub trending_limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub database: Database,
    pub analytics: Analytics,
}

/// Environment variables that override file settings
const ENV_OVERRIDES: [(&str, &str); 4] = [
    ("DATABASE_PATH", "database.path"),
    ("SEED_SAMPLE_DATA", "database.seed_sample_data"),
    ("PORT", "server.port"),
    ("HOST", "server.host"),
];

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(Self::config_files(), |key| std::env::var(key).ok())
    }

    /// settings.toml in the working directory, or in the crate directory during development
    fn config_files() -> Vec<PathBuf> {
        let config_file_name = "settings.toml";
        [
            PathBuf::from(config_file_name),
            PathBuf::from("socialytics-server").join(config_file_name),
        ]
        .into_iter()
        .filter(|path| path.exists())
        .collect()
    }

    fn build<F>(files: Vec<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.path", "socialytics.db")?
            .set_default("database.pool_size", 8)?
            .set_default("database.seed_sample_data", true)?
            .set_default("analytics.default_limit", 10)?
            .set_default("analytics.trending_limit", 5)?;

        for file in files {
            builder = builder.add_source(File::from(file).required(false));
        }

        // Environment variables have the highest priority
        for (var, key) in ENV_OVERRIDES {
            if let Some(value) = env(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_size: self.database.pool_size,
            ..PoolOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::build(Vec::new(), |_| None).unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.database.path, "socialytics.db");
        assert!(settings.database.seed_sample_data);
        assert_eq!(settings.analytics.default_limit, 10);
        assert_eq!(settings.analytics.trending_limit, 5);
        assert_eq!(settings.pool_options().max_size, 8);
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            ("DATABASE_PATH", ":memory:"),
            ("PORT", "8080"),
            ("SEED_SAMPLE_DATA", "false"),
        ]
        .into_iter()
        .collect();

        let settings =
            Settings::build(Vec::new(), |key| env.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(settings.database.path, ":memory:");
        assert_eq!(settings.server.port, 8080);
        assert!(!settings.database.seed_sample_data);
        assert_eq!(settings.server.host, "0.0.0.0");
    }

    #[test]
    fn test_file_settings() {
        let path = std::env::temp_dir().join(format!("socialytics_settings_{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[database]\npath = \"analytics.db\"\npool_size = 2\n\n[analytics]\ndefault_limit = 3\n",
        )
        .unwrap();

        let settings = Settings::build(vec![path.clone()], |_| None).unwrap();
        assert_eq!(settings.database.path, "analytics.db");
        assert_eq!(settings.database.pool_size, 2);
        assert_eq!(settings.analytics.default_limit, 3);
        assert_eq!(settings.analytics.trending_limit, 5);

        let _ = std::fs::remove_file(&path);
    }
}
