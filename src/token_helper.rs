// src/token_helper.rs

use crate::config::{self, Config};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const TOKEN_FILE: &str = ".vault-token";

/// Persists the CLI's session token between invocations.
pub trait TokenHelper {
    /// Human-readable location of the helper.
    fn path(&self) -> String;
    fn get(&self) -> Result<Option<String>>;
    fn store(&self, token: &str) -> Result<()>;
    fn erase(&self) -> Result<()>;
}

/// Stores the token in `~/.vault-token`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InternalTokenHelper;

impl InternalTokenHelper {
    fn token_path() -> Result<PathBuf> {
        dirs::home_dir()
            .context("Could not find home directory")
            .map(|p| p.join(TOKEN_FILE))
    }
}

impl TokenHelper for InternalTokenHelper {
    fn path(&self) -> String {
        Self::token_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| format!("~/{}", TOKEN_FILE))
    }

    fn get(&self) -> Result<Option<String>> {
        read_token_file(&Self::token_path()?)
    }

    fn store(&self, token: &str) -> Result<()> {
        write_token_file(&Self::token_path()?, token)
    }

    fn erase(&self) -> Result<()> {
        erase_token_file(&Self::token_path()?)
    }
}

fn read_token_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let token = content.trim();
            Ok((!token.is_empty()).then(|| token.to_string()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read token file {}", path.display())),
    }
}

fn write_token_file(path: &Path, token: &str) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to open token file {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = file.metadata()?.permissions();
        perms.set_mode(0o600);
        file.set_permissions(perms)?;
    }

    file.write_all(token.as_bytes())
        .with_context(|| format!("Failed to write token file {}", path.display()))
}

fn erase_token_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove token file {}", path.display())),
    }
}

/// Delegates to an executable called as `<binary> get|store|erase`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTokenHelper {
    pub binary_path: PathBuf,
}

impl ExternalTokenHelper {
    fn run(&self, op: &str, stdin: Option<&str>) -> Result<String> {
        let script = format!("{} {}", shell_quote(&self.binary_path.to_string_lossy()), op);
        o_debug!("Running token helper: sh -c {}", script);

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&script)
            .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to execute token helper {}", self.binary_path.display()))?;

        if let Some(input) = stdin {
            let mut pipe = child.stdin.take().context("Token helper stdin unavailable")?;
            pipe.write_all(input.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "Token helper `{}` failed ({}): {}",
                op,
                output.status,
                stderr.trim()
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TokenHelper for ExternalTokenHelper {
    fn path(&self) -> String {
        self.binary_path.display().to_string()
    }

    fn get(&self) -> Result<Option<String>> {
        let out = self.run("get", None)?;
        let token = out.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    fn store(&self, token: &str) -> Result<()> {
        self.run("store", Some(token)).map(|_| ())
    }

    fn erase(&self) -> Result<()> {
        self.run("erase", None).map(|_| ())
    }
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// The helper selected by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultTokenHelper {
    Internal(InternalTokenHelper),
    External(ExternalTokenHelper),
}

impl DefaultTokenHelper {
    fn inner(&self) -> &dyn TokenHelper {
        match self {
            DefaultTokenHelper::Internal(h) => h as &dyn TokenHelper,
            DefaultTokenHelper::External(h) => h as &dyn TokenHelper,
        }
    }
}

impl TokenHelper for DefaultTokenHelper {
    fn path(&self) -> String {
        self.inner().path()
    }

    fn get(&self) -> Result<Option<String>> {
        self.inner().get()
    }

    fn store(&self, token: &str) -> Result<()> {
        self.inner().store(token)
    }

    fn erase(&self) -> Result<()> {
        self.inner().erase()
    }
}

/// Load the config at `config_path` (or the default location) and pick a helper.
pub fn default_token_helper(config_path: Option<&Path>) -> Result<DefaultTokenHelper> {
    let cfg = config::load_config(config_path)?;
    resolve_token_helper(&cfg, external_token_helper_path)
}

pub fn resolve_token_helper<F>(cfg: &Config, resolve_path: F) -> Result<DefaultTokenHelper>
where
    F: FnOnce(&str) -> Result<PathBuf>,
{
    if cfg.token_helper.is_empty() {
        o_debug!("Using internal token helper");
        return Ok(DefaultTokenHelper::Internal(InternalTokenHelper));
    }

    let binary_path = resolve_path(&cfg.token_helper)?;
    o_debug!("Using external token helper at {}", binary_path.display());
    Ok(DefaultTokenHelper::External(ExternalTokenHelper { binary_path }))
}

/// Expand `~`, search `PATH` for bare names, and check the helper exists.
pub fn external_token_helper_path(path: &str) -> Result<PathBuf> {
    let expanded = PathBuf::from(shellexpand::tilde(path).into_owned());

    let resolved = if expanded.is_absolute() {
        expanded
    } else {
        lookup_path(&expanded)
            .with_context(|| format!("Token helper {} not found in PATH", path))?
    };

    let meta = fs::metadata(&resolved)
        .with_context(|| format!("Unknown error getting the external helper path {}", resolved.display()))?;
    if !is_executable(&meta) {
        return Err(anyhow!("Token helper {} is not executable", resolved.display()));
    }
    Ok(resolved)
}

fn lookup_path(name: &Path) -> Option<PathBuf> {
    // "./helper" style names are relative to the working directory, not PATH
    if name.components().count() > 1 {
        return std::env::current_dir().ok().map(|dir| dir.join(name));
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| fs::metadata(candidate).map(|m| is_executable(&m)).unwrap_or(false))
}

#[cfg(unix)]
fn is_executable(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.is_file() && meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(meta: &fs::Metadata) -> bool {
    meta.is_file()
}
