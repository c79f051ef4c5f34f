use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "data.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RecordkeepConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("recordkeep.toml")
}

/// `--database` wins, then the config file, then `data.db`
pub fn resolve_database_path(flag: Option<&Path>, config: Option<&RecordkeepConfig>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<RecordkeepConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: RecordkeepConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &RecordkeepConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_precedence() {
        let config = RecordkeepConfig { database: Some("from-config.db".to_string()) };

        assert_eq!(
            resolve_database_path(Some(Path::new("flag.db")), Some(&config)),
            PathBuf::from("flag.db")
        );
        assert_eq!(resolve_database_path(None, Some(&config)), PathBuf::from("from-config.db"));
        assert_eq!(
            resolve_database_path(None, Some(&RecordkeepConfig::default())),
            PathBuf::from(DEFAULT_DATABASE)
        );
        assert_eq!(resolve_database_path(None, None), PathBuf::from(DEFAULT_DATABASE));
    }

    #[test]
    fn test_config_write_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recordkeep.toml");
        let config = RecordkeepConfig { database: Some("records/data.db".to_string()) };

        assert!(load_config(Some(&path)).unwrap().is_none());

        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(config.clone()));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &RecordkeepConfig::default(), true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(RecordkeepConfig::default()));
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("deeper").join("data.db");

        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
        ensure_db_dir(Path::new("data.db")).unwrap();
    }
}
