//! `vguard check-redirect <target>`.

use anyhow::{Context, Result};
use vguard_core::config::GuardConfig;
use vguard_core::validate_redirect_url;

pub fn run_check_redirect(cfg: &GuardConfig, target: &str, origin: Option<&str>) -> Result<()> {
    let origin = origin
        .or(cfg.allowed_redirect_origin.as_deref())
        .context("no --origin given and allowed_redirect_origin is not configured")?;
    println!("{}", validate_redirect_url(target, origin)?);
    Ok(())
}
