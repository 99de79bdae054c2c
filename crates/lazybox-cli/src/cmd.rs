//! Command execution.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use lazybox_crypto::{EnvelopeCodec, KeyPair};
use tracing::{debug, info};

use crate::args::Commands;

/// Run one command against `input` and `output`.
///
/// `input` is only read when the command's argument was omitted.
pub fn run(
    command: &Commands,
    key_pair: &KeyPair,
    input: &mut impl Read,
    output: &mut impl Write,
) -> Result<()> {
    let codec = EnvelopeCodec::new();
    match command {
        Commands::Encrypt { text } => {
            let plaintext = match text {
                Some(text) => text.clone(),
                None => strip_trailing_newline(read_all(input)?),
            };
            let envelope = codec.encrypt(&plaintext, key_pair)?;
            info!(
                plaintext_bytes = plaintext.len(),
                envelope_len = envelope.len(),
                "Encrypted message"
            );
            writeln!(output, "{envelope}")?;
        }
        Commands::Decrypt { envelope } => {
            let envelope = match envelope {
                Some(envelope) => envelope.trim().to_string(),
                None => read_all(input)?.trim().to_string(),
            };
            debug!(envelope_len = envelope.len(), "Decrypting envelope");
            let plaintext = codec.decrypt(&envelope, key_pair)?;
            info!(plaintext_bytes = plaintext.len(), "Decrypted message");
            writeln!(output, "{plaintext}")?;
        }
        Commands::Fingerprint => {
            writeln!(output, "{}", key_pair.fingerprint()?)?;
        }
    }
    output.flush()?;
    Ok(())
}

fn read_all(input: &mut impl Read) -> Result<String> {
    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .context("Failed to read stdin as UTF-8 text")?;
    Ok(buf)
}

fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
