// src/ui.rs

use colored::Colorize;
use std::io::{self, Write};

/// Where commands send user-facing text.
pub trait Ui {
    /// Normal output. Implementations may decorate it (e.g. a trailing newline).
    fn output(&mut self, message: &str);

    fn error(&mut self, message: &str);

    /// True when `write_raw` emits the message byte for byte.
    fn supports_raw_output(&self) -> bool {
        false
    }

    fn write_raw(&mut self, message: &str) {
        self.output(message)
    }
}

/// Plain UI over two writers, stdout/stderr in the binary.
pub struct BasicUi<W: Write, E: Write> {
    pub writer: W,
    pub error_writer: E,
}

impl BasicUi<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        BasicUi {
            writer: io::stdout(),
            error_writer: io::stderr(),
        }
    }
}

impl<W: Write, E: Write> Ui for BasicUi<W, E> {
    // A closed stdout/stderr leaves nowhere to report to, so write errors are dropped.
    fn output(&mut self, message: &str) {
        let _ = writeln!(self.writer, "{}", message);
    }

    fn error(&mut self, message: &str) {
        let _ = writeln!(self.error_writer, "{}", message);
    }

    fn supports_raw_output(&self) -> bool {
        true
    }

    fn write_raw(&mut self, message: &str) {
        let _ = self.writer.write_all(message.as_bytes());
        let _ = self.writer.flush();
    }
}

/// Colors errors. Always decorates output, so raw output is not offered.
pub struct ColoredUi<U: Ui> {
    pub inner: U,
}

impl<U: Ui> Ui for ColoredUi<U> {
    fn output(&mut self, message: &str) {
        self.inner.output(message);
    }

    fn error(&mut self, message: &str) {
        self.inner.error(&message.red().bold().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured() -> BasicUi<Vec<u8>, Vec<u8>> {
        BasicUi {
            writer: Vec::new(),
            error_writer: Vec::new(),
        }
    }

    #[test]
    fn test_basic_ui_channels() {
        let mut ui = captured();
        ui.output("out");
        ui.error("err");
        assert_eq!(String::from_utf8(ui.writer).unwrap(), "out\n");
        assert_eq!(String::from_utf8(ui.error_writer).unwrap(), "err\n");
    }

    #[test]
    fn test_basic_ui_raw_has_no_newline() {
        let mut ui = captured();
        assert!(ui.supports_raw_output());
        ui.write_raw("abc");
        assert_eq!(String::from_utf8(ui.writer).unwrap(), "abc");
    }

    #[test]
    fn test_colored_ui_never_raw() {
        let mut ui = ColoredUi { inner: captured() };
        assert!(!ui.supports_raw_output());
        ui.write_raw("abc");
        assert_eq!(String::from_utf8(ui.inner.writer).unwrap(), "abc\n");
    }

    #[test]
    fn test_colored_ui_error_keeps_message() {
        let mut ui = ColoredUi { inner: captured() };
        ui.error("boom");
        let err = String::from_utf8(ui.inner.error_writer).unwrap();
        assert!(err.contains("boom"));
        assert!(err.ends_with('\n'));
    }
}
