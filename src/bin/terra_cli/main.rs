// ABOUTME: Terra CLI - command-line tool for working with Terra webhooks
// ABOUTME: Signs and verifies webhook bodies and inspects payload contents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Sign a body as Terra would
//! terra-cli sign --secret whsec --body-file payload.json
//!
//! # Check a captured terra-signature header against a body
//! terra-cli verify --secret whsec --header "t=1700000000,v1=ab12..." --body-file payload.json
//!
//! # Show what a payload contains
//! terra-cli inspect --body-file payload.json
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use terra_client::logging::LoggingConfig;

#[derive(Parser)]
#[command(
    name = "terra-cli",
    about = "Terra webhook tooling",
    long_about = "Sign, verify, and inspect Terra webhook payloads."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print a terra-signature header for a body
    Sign {
        /// Webhook signing secret
        #[arg(long, env = "TERRA_WEBHOOK_SECRET", hide_env_values = true)]
        secret: String,

        /// Unix timestamp to sign at (defaults to now)
        #[arg(long)]
        timestamp: Option<u64>,

        /// File holding the raw body
        #[arg(long)]
        body_file: PathBuf,
    },

    /// Check a terra-signature header; exits 1 when it does not verify
    Verify {
        /// Webhook signing secret
        #[arg(long, env = "TERRA_WEBHOOK_SECRET", hide_env_values = true)]
        secret: String,

        /// Value of the terra-signature header
        #[arg(long)]
        header: String,

        /// File holding the raw body
        #[arg(long)]
        body_file: PathBuf,
    },

    /// Print the event type, user, and record count of a payload
    Inspect {
        /// File holding the raw body
        #[arg(long)]
        body_file: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    LoggingConfig::compact(log_level).init()?;

    match cli.command {
        Command::Sign {
            secret,
            timestamp,
            body_file,
        } => commands::webhook::sign(&secret, timestamp, &body_file)?,
        Command::Verify {
            secret,
            header,
            body_file,
        } => {
            if !commands::webhook::verify(&secret, &header, &body_file)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Inspect { body_file } => commands::webhook::inspect(&body_file)?,
    }

    Ok(ExitCode::SUCCESS)
}
