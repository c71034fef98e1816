use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".vault";
const CONFIG_PATH_ENV: &str = "VAULT_CONFIG_PATH";

#[derive(Deserialize, Default, Debug, PartialEq)]
pub struct Config {
    /// Path to an external token helper. Empty means the built-in file helper.
    #[serde(default)]
    pub token_helper: String,
}

/// `--config` wins, then `$VAULT_CONFIG_PATH`, then `~/.vault`.
fn get_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(shellexpand::tilde(&path).into_owned()));
        }
    }

    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(CONFIG_FILE))
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = get_config_path(explicit)?;
    load_config_file(&path)
}

pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        o_debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_file(&dir.path().join("nope")).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.token_helper.is_empty());
    }

    #[test]
    fn test_reads_token_helper() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "token_helper = \"/usr/local/bin/helper\"").unwrap();
        let cfg = load_config_file(file.path()).unwrap();
        assert_eq!(cfg.token_helper, "/usr/local/bin/helper");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "address = \"https://127.0.0.1:8200\"").unwrap();
        let cfg = load_config_file(file.path()).unwrap();
        assert!(cfg.token_helper.is_empty());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "token_helper = ").unwrap();
        let err = load_config_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_path_used_and_tilde_expanded() {
        // the only test touching VAULT_CONFIG_PATH
        std::env::set_var(CONFIG_PATH_ENV, "/tmp/env-vault-config");
        let plain = get_config_path(None).unwrap();

        std::env::set_var(CONFIG_PATH_ENV, "~/env-vault-config");
        let expanded = get_config_path(None).unwrap();

        std::env::set_var(CONFIG_PATH_ENV, "/tmp/env-vault-config");
        let explicit = get_config_path(Some(Path::new("/tmp/flag-config"))).unwrap();
        std::env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(plain, PathBuf::from("/tmp/env-vault-config"));
        assert_eq!(expanded, dirs::home_dir().unwrap().join("env-vault-config"));
        assert_eq!(explicit, PathBuf::from("/tmp/flag-config"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("/tmp/custom-vault-config");
        assert_eq!(get_config_path(Some(path)).unwrap(), path);
    }
}
