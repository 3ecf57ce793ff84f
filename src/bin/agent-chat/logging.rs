use std::path::PathBuf;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::{ConfigPaths, LoggingConfig};

const DEFAULT_BASENAME: &str = "agent-chat";

/// Starts file logging. The returned handle must stay alive for the whole run.
pub fn init_logging(config: &LoggingConfig, paths: &ConfigPaths) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(&config.level)?
        .log_to_file(log_file_spec(config, paths))
        .rotate(
            Criterion::Size(config.max_size_bytes()),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.keep_files),
        )
        .start()?;
    Ok(handle)
}

fn log_file_spec(config: &LoggingConfig, paths: &ConfigPaths) -> FileSpec {
    let Some(file) = config.file.as_ref().map(PathBuf::from) else {
        return FileSpec::default()
            .directory(paths.logs_dir())
            .basename(DEFAULT_BASENAME);
    };
    let mut spec = FileSpec::default().basename(
        file.file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(DEFAULT_BASENAME),
    );
    if let Some(dir) = file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        spec = spec.directory(dir);
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn paths() -> ConfigPaths {
        ConfigPaths {
            config_file: PathBuf::from("/tmp/agent-chat-test/config.toml"),
            data_dir: PathBuf::from("/tmp/agent-chat-test/data"),
        }
    }

    #[test]
    fn default_log_goes_to_data_dir() {
        let spec = log_file_spec(&LoggingConfig::default(), &paths());
        let file = spec.as_pathbuf(None);
        assert_eq!(file.parent(), Some(Path::new("/tmp/agent-chat-test/data/logs")));
        assert!(file
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("agent-chat")));
    }

    #[test]
    fn configured_file_sets_directory_and_basename() {
        let config = LoggingConfig {
            file: Some("/var/log/chat/client.log".into()),
            ..LoggingConfig::default()
        };
        let file = log_file_spec(&config, &paths()).as_pathbuf(None);
        assert_eq!(file.parent(), Some(Path::new("/var/log/chat")));
        assert!(file
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("client")));
    }

    #[test]
    fn size_limit_is_at_least_one_megabyte() {
        let config = LoggingConfig {
            max_size_mb: 0,
            ..LoggingConfig::default()
        };
        assert_eq!(config.max_size_bytes(), 1024 * 1024);
    }
}
