use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "revisent";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3850;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub paths: ConfigPaths,
    pub created: bool,
}

pub fn load_or_create() -> Result<ConfigLoad, String> {
    load_or_create_in(&config_dir()?)
}

pub fn load_or_create_in(dir: &Path) -> Result<ConfigLoad, String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    let paths = ConfigPaths {
        file: dir.join(CONFIG_FILE_NAME),
    };

    if paths.file.exists() {
        let contents = fs::read_to_string(&paths.file)
            .map_err(|err| format!("read config {}: {}", paths.file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", paths.file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            paths,
            created: false,
        });
    }

    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&paths.file, contents)
        .map_err(|err| format!("write config {}: {}", paths.file.display(), err))?;

    Ok(ConfigLoad {
        config,
        paths,
        created: true,
    })
}

fn config_dir() -> Result<PathBuf, String> {
    if let Some(base) = std::env::var_os("XDG_CONFIG_HOME").filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(base).join(CONFIG_DIR_NAME));
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_default_config_once() {
        let dir = tempfile::tempdir().expect("temp dir");

        let first = load_or_create_in(dir.path()).expect("create");
        assert!(first.created);
        assert_eq!(first.config, CliConfig::default());
        assert_eq!(first.config.port, 3850);

        let second = load_or_create_in(dir.path()).expect("load");
        assert!(!second.created);
        assert_eq!(second.config, first.config);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "port = 4100\n").expect("write");

        let load = load_or_create_in(dir.path()).expect("load");
        assert_eq!(load.config.port, 4100);
        assert_eq!(load.config.host, DEFAULT_HOST);
        assert_eq!(load.config.log_level, DEFAULT_LOG_LEVEL);
    }
}
