//! CLI for checking a deployment's vguard settings against sample inputs.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vguard_core::config::{self, GuardConfig};
use vguard_core::RootKind;

use commands::{
    run_build_url, run_check_path, run_check_redirect, run_check_url, run_client_ip, run_contain,
    run_escape, run_exec, run_sanitize, ClientIpArgs,
};

/// Top-level CLI for vguard.
#[derive(Debug, Parser)]
#[command(name = "vguard")]
#[command(about = "vguard: path, URL, redirect and client-IP validation", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/vguard/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Configured root a path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RootArg {
    Videos,
    Images,
    Cache,
}

impl From<RootArg> for RootKind {
    fn from(arg: RootArg) -> Self {
        match arg {
            RootArg::Videos => RootKind::Videos,
            RootArg::Images => RootKind::Images,
            RootArg::Cache => RootKind::CloudThumbnailCache,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a user-supplied path against one configured root.
    CheckPath {
        /// Path fragment as received from the API.
        raw: String,
        #[arg(long, value_enum, default_value = "videos")]
        root: RootArg,
    },

    /// Accept an absolute path if it lies inside any configured root.
    Contain {
        candidate: String,
    },

    /// Reduce a string to a single safe filename component.
    Sanitize {
        segment: String,
    },

    /// Validate a URL for SSRF (optionally against the configured allowlist).
    CheckUrl {
        url: String,
        /// Also require the host to be in the configured allowlist.
        #[arg(long)]
        allowlisted: bool,
    },

    /// Build the canonical outbound URL for an allowlisted fetch.
    BuildUrl {
        url: String,
    },

    /// Validate a redirect target against the allowed origin.
    CheckRedirect {
        target: String,
        /// Origin to compare against (defaults to allowed_redirect_origin from config).
        #[arg(long)]
        origin: Option<String>,
    },

    /// Resolve the client IP for a request description.
    ClientIp(ClientIpArgs),

    /// HTML-escape a string.
    Escape {
        text: String,
    },

    /// Run a program with discrete arguments (no shell).
    Exec {
        program: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::CheckPath { raw, root } => run_check_path(&cfg, &raw, root.into())?,
            CliCommand::Contain { candidate } => run_contain(&cfg, &candidate)?,
            CliCommand::Sanitize { segment } => run_sanitize(&segment),
            CliCommand::CheckUrl { url, allowlisted } => run_check_url(&cfg, &url, allowlisted)?,
            CliCommand::BuildUrl { url } => run_build_url(&cfg, &url)?,
            CliCommand::CheckRedirect { target, origin } => {
                run_check_redirect(&cfg, &target, origin.as_deref())?
            }
            CliCommand::ClientIp(args) => run_client_ip(&cfg, &args)?,
            CliCommand::Escape { text } => run_escape(&text),
            CliCommand::Exec { program, args } => run_exec(&program, &args)?,
        }

        Ok(())
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<GuardConfig> {
    match path {
        Some(path) => config::load_from(path),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
