//! Response rendering.

use std::io::Write;

use owo_colors::OwoColorize;

use crate::protocol::Envelope;

/// Writes envelopes one per line, optionally indented and coloured.
///
/// Non-ASCII text is written as-is. Colouring wraps the whole line: red for
/// error envelopes, green otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct Emitter {
    pub pretty: bool,
    pub color: bool,
}

impl Emitter {
    pub fn new(pretty: bool, color: bool) -> Self {
        Self { pretty, color }
    }

    pub fn render(&self, envelope: &Envelope) -> serde_json::Result<String> {
        let text = if self.pretty { serde_json::to_string_pretty(envelope)? } else { serde_json::to_string(envelope)? };

        if !self.color {
            return Ok(text);
        }
        Ok(if envelope.is_error() { text.red().to_string() } else { text.green().to_string() })
    }

    /// Renders and writes one envelope, then flushes.
    pub fn emit<W: Write>(&self, writer: &mut W, envelope: &Envelope) -> std::io::Result<()> {
        let text = self.render(envelope)?;
        writeln!(writer, "{text}")?;
        writer.flush()
    }
}
