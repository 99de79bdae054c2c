//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lazybox_core::config::{ConfigLayer, KeysConfig, LoggingLayer};

/// Authenticated public-key envelopes from the terminal.
#[derive(Debug, Parser)]
#[command(name = "lazybox", version, about, long_about = None)]
pub struct Cli {
    /// JSON key file with hex `public_key` and `secret_key`
    #[arg(long, global = true)]
    pub key_file: Option<PathBuf>,

    /// Recipient public key (hex)
    #[arg(long, global = true)]
    pub public_key: Option<String>,

    /// Sender secret key (hex)
    #[arg(long, global = true)]
    pub secret_key: Option<String>,

    /// Log level (e.g. "info", "debug")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Directory searched for `.lazybox/settings.json` (defaults to the current directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Encrypt text into an envelope string
    Encrypt {
        /// Text to encrypt (reads stdin when omitted)
        #[arg(short, long)]
        text: Option<String>,
    },
    /// Decrypt an envelope string
    Decrypt {
        /// Envelope to decrypt (reads stdin when omitted)
        #[arg(short, long)]
        envelope: Option<String>,
    },
    /// Print the fingerprint of the configured public key
    Fingerprint,
}

impl Cli {
    /// The configuration layer contributed by command-line flags.
    pub fn config_layer(&self) -> ConfigLayer {
        ConfigLayer {
            logging: LoggingLayer {
                level: self.log_level.clone(),
                json: self.log_json.then_some(true),
            },
            keys: KeysConfig {
                public_key: self.public_key.clone(),
                secret_key: self.secret_key.clone(),
                key_file: self.key_file.clone(),
            },
        }
    }
}
