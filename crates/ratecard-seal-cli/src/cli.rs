//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ratecard_seal::Algorithm;

/// Seal and verify rate card documents.
#[derive(Debug, Parser)]
#[command(name = "ratecard-seal", version, about)]
pub struct Cli {
    /// JSON file with sealing defaults
    #[arg(long, global = true, env = "RATECARD_SEAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the canonical form of a document
    Canonical {
        /// Document path, or `-` for stdin
        document: PathBuf,
    },

    /// Add, verify, or remove `metadata.checksum`
    Checksum {
        #[command(subcommand)]
        action: ChecksumAction,
    },

    /// Generate a key pair as PEM files
    Keygen {
        #[arg(long)]
        algorithm: Option<Algorithm>,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// File stem for `<name>.key.pem` and `<name>.pub.pem`
        #[arg(long, default_value = "ratecard")]
        name: String,
    },

    /// Sign a document with a PKCS#8 private key
    Sign {
        document: PathBuf,

        #[arg(long)]
        key: PathBuf,

        #[arg(long)]
        algorithm: Option<Algorithm>,

        /// Public key to embed; derived from the private key when omitted
        #[arg(long)]
        public_key: Option<PathBuf>,

        #[arg(long)]
        key_id: Option<String>,

        #[arg(long)]
        no_timestamp: bool,

        #[arg(long)]
        no_embed_key: bool,

        #[arg(long)]
        no_checksum: bool,
    },

    /// Verify a document's signature and checksum
    Verify {
        document: PathBuf,

        /// Overrides the embedded public key
        #[arg(long)]
        public_key: Option<PathBuf>,

        /// Reject signatures made with any other algorithm
        #[arg(long)]
        expect_algorithm: Option<Algorithm>,
    },

    /// Issue a minimal certificate with a new key pair
    Cert {
        #[arg(long)]
        subject: String,

        /// Defaults to the subject
        #[arg(long)]
        issuer: Option<String>,

        #[arg(long)]
        algorithm: Option<Algorithm>,

        #[arg(long)]
        days: Option<u32>,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// File stem for `<name>.cert.json` and `<name>.key.pem`
        #[arg(long, default_value = "certificate")]
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ChecksumAction {
    /// Set `metadata.checksum`
    Add { document: PathBuf },
    /// Compare the stored checksum with a fresh one
    Verify { document: PathBuf },
    /// Delete `metadata.checksum`
    Remove { document: PathBuf },
}
