use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the store when nothing else is configured
pub const DEFAULT_DB_FILE: &str = "shop.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShopConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default)]
    pub sample: SampleConfig,
}

/// How many rows `init-db` generates for each empty table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub cards: usize,
    pub employees: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            cards: 25,
            employees: 10,
            seed: None,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("cardshop.toml")
}

/// `shop.db` next to the running executable, or in the working directory
/// when the executable location is unknown.
pub fn default_database_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DB_FILE)
}

pub fn load_config(path: Option<&Path>) -> Result<Option<ShopConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ShopConfig = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &ShopConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    let contents = toml::to_string_pretty(config).map_err(|e| Error::Config(e.to_string()))?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Pick the store path: explicit flag, then config file, then the default.
pub fn resolve_database_path(flag: Option<&Path>, config: Option<&ShopConfig>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(default_database_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: ShopConfig = toml::from_str(
            r#"
            database = "data/shop.db"

            [sample]
            cards = 5
            employees = 2
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.database.as_deref(), Some("data/shop.db"));
        assert_eq!(config.sample, SampleConfig { cards: 5, employees: 2, seed: Some(42) });
    }

    #[test]
    fn test_sample_defaults_fill_gaps() {
        let config: ShopConfig = toml::from_str("[sample]\ncards = 3\n").unwrap();
        assert!(config.database.is_none());
        assert_eq!(config.sample.cards, 3);
        assert_eq!(config.sample.employees, 10);
        assert_eq!(config.sample.seed, None);
    }

    #[test]
    fn test_resolve_precedence() {
        let config = ShopConfig {
            database: Some("from-config.db".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_database_path(Some(Path::new("flag.db")), Some(&config)),
            PathBuf::from("flag.db")
        );
        assert_eq!(resolve_database_path(None, Some(&config)), PathBuf::from("from-config.db"));
        assert!(resolve_database_path(None, None).ends_with(DEFAULT_DB_FILE));
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardshop.toml");
        let config = ShopConfig {
            database: Some("shop.db".into()),
            sample: SampleConfig { cards: 7, employees: 1, seed: None },
        };

        write_config(&path, &config, false).unwrap();
        assert!(matches!(write_config(&path, &config, false), Err(Error::Config(_))));
        write_config(&path, &config, true).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("shop.db"));
        assert_eq!(loaded.sample, config.sample);
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "database = [").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(Error::Config(_))));
    }
}
