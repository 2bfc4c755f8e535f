//! `vguard check-url` and `vguard build-url`.

use anyhow::Result;
use vguard_core::config::GuardConfig;
use vguard_core::{build_allowlisted_http_url, validate_url, validate_url_with_allowlist};

pub fn run_check_url(cfg: &GuardConfig, url: &str, allowlisted: bool) -> Result<()> {
    let accepted = if allowlisted {
        validate_url_with_allowlist(url, &cfg.allowlist)?
    } else {
        validate_url(url)?
    };
    println!("{accepted}");
    Ok(())
}

pub fn run_build_url(cfg: &GuardConfig, url: &str) -> Result<()> {
    if cfg.allowlist.is_empty() {
        tracing::warn!("allowlist is empty; every outbound URL will be rejected");
    }
    println!("{}", build_allowlisted_http_url(url, &cfg.allowlist)?);
    Ok(())
}
