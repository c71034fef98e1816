// src/commands/helper.rs
use crate::token_helper::{self, DefaultTokenHelper};
use anyhow::Result;
use std::path::Path;

/// Short description of the configured helper: `internal` or the binary path.
pub fn describe(helper: &DefaultTokenHelper) -> String {
    match helper {
        DefaultTokenHelper::Internal(_) => "internal".to_string(),
        DefaultTokenHelper::External(h) => h.binary_path.display().to_string(),
    }
}

pub fn handle_helper(config_path: Option<&Path>) -> Result<()> {
    let helper = token_helper::default_token_helper(config_path)?;
    o_result!("{}\n", describe(&helper));
    Ok(())
}
