// src/commands/field.rs
use crate::field::raw_field;
use crate::types::Secret;
use crate::ui::Ui;
use crate::utils;
use anyhow::Result;

/// Print one field of `secret` through `ui` and return the process exit code.
pub fn print_field(ui: &mut dyn Ui, secret: &Secret, field: &str) -> i32 {
    let (value, present) = raw_field(secret, field);
    if !present {
        ui.error(&format!("Field {} not present in secret", field));
        return 1;
    }

    // Plain output appends a newline, which scripts capturing the value don't want.
    if ui.supports_raw_output() {
        ui.write_raw(&value);
    } else {
        ui.output(&value);
    }
    0
}

// vault-field field <FIELD> [--file PATH]
pub fn handle_field(ui: &mut dyn Ui, field: &str, file: Option<&str>) -> Result<i32> {
    let input = utils::read_input(file)?;
    let secret = Secret::from_json(&input)?;
    o_debug!("Extracting field {}", field);
    Ok(print_field(ui, &secret, field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AuthResult, SecretKind};
    use crate::ui::{BasicUi, ColoredUi};

    fn captured() -> BasicUi<Vec<u8>, Vec<u8>> {
        BasicUi {
            writer: Vec::new(),
            error_writer: Vec::new(),
        }
    }

    fn auth_secret(token: &str) -> Secret {
        Secret::new(SecretKind::Auth(AuthResult {
            client_token: token.to_string(),
            ..Default::default()
        }))
    }

    #[test]
    fn test_print_present_field_raw() {
        let mut ui = captured();
        let code = print_field(&mut ui, &auth_secret("abc"), "token");
        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(ui.writer).unwrap(), "abc");
        assert!(ui.error_writer.is_empty());
    }

    #[test]
    fn test_print_missing_field() {
        let mut ui = captured();
        let secret = Secret::from_json(r#"{"data": {}}"#).unwrap();
        let code = print_field(&mut ui, &secret, "missing");
        assert_eq!(code, 1);
        assert!(ui.writer.is_empty());
        assert_eq!(
            String::from_utf8(ui.error_writer).unwrap(),
            "Field missing not present in secret\n"
        );
    }

    #[test]
    fn test_print_without_raw_support_uses_output() {
        let mut ui = ColoredUi { inner: captured() };
        let code = print_field(&mut ui, &auth_secret("abc"), "token");
        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(ui.inner.writer).unwrap(), "abc\n");
    }

    #[test]
    fn test_handle_field_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.json");
        std::fs::write(&path, r#"{"lease_duration": 60, "data": {"user": "admin"}}"#).unwrap();

        let mut ui = captured();
        let code = handle_field(&mut ui, "refresh_interval", path.to_str()).unwrap();
        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(ui.writer).unwrap(), "60");
    }

    #[test]
    fn test_handle_field_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.json");
        std::fs::write(&path, "not json").unwrap();

        let mut ui = captured();
        assert!(handle_field(&mut ui, "token", path.to_str()).is_err());
    }
}
