// src/utils.rs

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};

/// Where the secret JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(String),
}

/// `None` and `"-"` both mean stdin.
pub fn parse_input_source(file: Option<&str>) -> InputSource {
    match file {
        None | Some("-") => InputSource::Stdin,
        Some(path) => InputSource::File(path.to_string()),
    }
}

pub fn read_input(file: Option<&str>) -> Result<String> {
    match parse_input_source(file) {
        InputSource::Stdin => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read secret from stdin")?;
            Ok(buf)
        }
        InputSource::File(path) => {
            fs::read_to_string(&path).with_context(|| format!("Failed to read secret file {}", path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_source() {
        assert_eq!(parse_input_source(None), InputSource::Stdin);
        assert_eq!(parse_input_source(Some("-")), InputSource::Stdin);
        assert_eq!(
            parse_input_source(Some("secret.json")),
            InputSource::File("secret.json".to_string())
        );
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_input(Some("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read secret file"));
    }
}
