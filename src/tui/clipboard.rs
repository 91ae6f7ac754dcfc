//! Clipboard access for copy actions
//!
//! Terminals can set the system clipboard through the OSC 52 escape sequence,
//! which works over SSH and inside multiplexers that forward it.

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Largest encoded payload most terminals accept in one OSC 52 sequence
pub const OSC52_MAX_PAYLOAD: usize = 100_000;

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// Clipboard backed by the OSC 52 "set selection" sequence
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    writer: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let encoded = STANDARD.encode(text);
        if encoded.len() > OSC52_MAX_PAYLOAD {
            // Terminals drop oversized sequences without telling anyone
            tracing::warn!("Clipboard payload of {} bytes exceeds the OSC 52 limit", encoded.len());
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("payload of {} encoded bytes exceeds {}", encoded.len(), OSC52_MAX_PAYLOAD),
            ));
        }
        write!(self.writer, "\x1b]52;c;{}\x07", encoded)?;
        self.writer.flush()
    }
}
