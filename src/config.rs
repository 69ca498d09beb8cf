use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "rgrades.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage: StorageConfig,
    pub menu: MenuConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Roster file.
    pub file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("students.json"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Exact length of the ids typed at the prompt.
    pub id_length: usize,
    /// Subjects asked for when entering marks.
    pub subjects: Vec<String>,
}

pub const SUBJECTS: [&str; 5] = ["Mathematics", "English", "Science", "History", "Geography"];

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            id_length: 16,
            subjects: SUBJECTS.iter().map(|&s| s.to_owned()).collect(),
        }
    }
}

impl Config {
    /// Load the configuration from `path`. When no path has been given and the
    /// default file is absent, the default configuration is used.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let (path, explicit) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };
        if !explicit && !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read configuration file {}", path.display()))?;
        Config::parse(&contents)
            .wrap_err_with(|| format!("cannot parse configuration file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents)?;
        eyre::ensure!(config.menu.id_length > 0, "menu.id_length must be positive");
        eyre::ensure!(
            !config.menu.subjects.is_empty(),
            "menu.subjects cannot be empty"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.storage.file, PathBuf::from("students.json"));
        assert_eq!(config.menu.id_length, 16);
        assert_eq!(config.menu.subjects, SUBJECTS);
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse(
            r#"
            [storage]
            file = "data/class.json"

            [menu]
            id_length = 4
            subjects = ["Art", "Music"]
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.file, PathBuf::from("data/class.json"));
        assert_eq!(config.menu.id_length, 4);
        assert_eq!(config.menu.subjects, ["Art", "Music"]);
    }

    #[test]
    fn test_invalid() {
        assert!(Config::parse("[menu]\nid_length = 0").is_err());
        assert!(Config::parse("[menu]\nsubjects = []").is_err());
        assert!(Config::parse("[storage]\nfiel = \"x.json\"").is_err());
    }

    #[test]
    fn test_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(Config::load(Some(&missing)).is_err());
        let path = dir.path().join("rgrades.toml");
        fs::write(&path, "[menu]\nid_length = 8\n").unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().menu.id_length, 8);
    }
}
