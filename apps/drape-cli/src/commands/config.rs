//! `config init` and `config show`.

use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Writes the default configuration and returns where it went.
pub fn init(config_path: Option<&Path>, force: bool) -> AppResult<PathBuf> {
    Ok(AppConfig::default().save(config_path, force)?)
}

/// The effective configuration as TOML.
pub fn show(config: &AppConfig) -> AppResult<String> {
    Ok(config.to_toml()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let written = init(Some(&path), false).unwrap();
        assert_eq!(written, path);

        let loaded = AppConfig::load(Some(&path)).unwrap();
        let text = show(&loaded).unwrap();
        assert!(text.contains("[company]"));
        assert!(text.contains("[quote]"));
        assert!(text.contains("tax_rate_bps = 500"));
    }

    #[test]
    fn test_init_twice_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        init(Some(&path), false).unwrap();

        let err = init(Some(&path), false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(init(Some(&path), true).is_ok());
    }
}
