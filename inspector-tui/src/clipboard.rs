//! Terminal clipboard using the OSC 52 escape sequence.

use std::io::{self, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use inspector_lib::clipboard::Clipboard;
use inspector_lib::error::ClipboardError;

/// Writes to the system clipboard through the terminal emulator.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let encoded = STANDARD.encode(text);
        write!(self.out, "\x1b]52;c;{}\x07", encoded)?;
        self.out.flush()?;
        log::debug!("copied {} bytes to clipboard", text.len());
        Ok(())
    }
}
