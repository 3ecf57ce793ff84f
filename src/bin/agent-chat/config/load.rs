use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::paths::ConfigPaths;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
    /// False when defaults were used because no file exists yet.
    pub config_exists: bool,
}

impl LoadedConfig {
    fn read(paths: ConfigPaths) -> Result<Self, ConfigError> {
        let (config, config_exists) = match fs::read_to_string(&paths.config_file) {
            Ok(contents) => {
                let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: paths.config_file.clone(),
                    source,
                })?;
                (config, true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => (AppConfig::default(), false),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            config,
            paths,
            config_exists,
        })
    }
}

/// Reads `config.toml`, creating the config and log directories on the way.
pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
    let paths = ConfigPaths::resolve(path_override)?;
    paths.create_dirs()?;
    let loaded = LoadedConfig::read(paths)?;
    if loaded.config_exists {
        restrict_to_owner(&loaded.paths.config_file)?;
    }
    Ok(loaded)
}

/// Makes the file readable by its owner only.
fn restrict_to_owner(path: &Path) -> Result<(), ConfigError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(path)?.permissions();
        if perms.mode() & 0o077 != 0 {
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths_in(dir: &Path) -> ConfigPaths {
        ConfigPaths {
            config_file: dir.join("config.toml"),
            data_dir: dir.join("data"),
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = LoadedConfig::read(paths_in(dir.path())).unwrap();
        assert!(!loaded.config_exists);
        assert_eq!(loaded.config.agent.base_url, AppConfig::default().agent.base_url);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        fs::write(
            &paths.config_file,
            "[agent]\nbase_url = \"http://agent.local:8080/\"\n\n[speech]\nauto_speak = true\n",
        )
        .unwrap();

        let loaded = LoadedConfig::read(paths).unwrap();
        assert!(loaded.config_exists);
        assert_eq!(loaded.config.agent.base_url, "http://agent.local:8080/");
        assert_eq!(loaded.config.agent.chat_path, "api/agent/chat");
        assert!(loaded.config.speech.auto_speak);
        assert_eq!(loaded.config.logging.level, "info");
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.config_file, "[agent\nbase_url = 3").unwrap();
        match LoadedConfig::read(paths) {
            Err(err @ ConfigError::Parse { .. }) => {
                assert!(err.to_string().contains("config.toml"));
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn permissions_are_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        restrict_to_owner(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
