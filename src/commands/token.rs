// src/commands/token.rs
use crate::token_helper::{self, TokenHelper};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;

pub fn handle_get_token(config_path: Option<&Path>) -> Result<()> {
    let helper = token_helper::default_token_helper(config_path)?;
    let token = helper
        .get()?
        .context("No token stored. Run `vault-field token store` first.")?;
    o_result!("{}", token); // no trailing newline, easier for scripts to capture
    Ok(())
}

pub fn handle_store_token(config_path: Option<&Path>, token: Option<String>) -> Result<()> {
    let helper = token_helper::default_token_helper(config_path)?;

    let token = match token {
        Some(t) => t,
        None => rpassword::prompt_password("Token (will be hidden): ")?,
    };
    let token = token.trim();
    if token.is_empty() {
        bail!("Refusing to store an empty token");
    }

    helper.store(token).context("Failed to store token")?;
    o_success!("{}", format!("✔ Token stored via {}", helper.path()).green());
    Ok(())
}

pub fn handle_erase_token(config_path: Option<&Path>) -> Result<()> {
    let helper = token_helper::default_token_helper(config_path)?;
    helper.erase().context("Failed to erase token")?;
    o_success!("{}", "✔ Token erased.".green());
    Ok(())
}
