//! `vguard check-path`, `vguard contain`, `vguard sanitize`.

use anyhow::Result;
use vguard_core::config::GuardConfig;
use vguard_core::{sanitize_path_segment, RootKind};

pub fn run_check_path(cfg: &GuardConfig, raw: &str, kind: RootKind) -> Result<()> {
    let resolved = cfg.path_roots().validate(kind, raw)?;
    println!("{}", resolved.display());
    Ok(())
}

pub fn run_contain(cfg: &GuardConfig, candidate: &str) -> Result<()> {
    let path = cfg.path_roots().contain(candidate)?;
    println!("{}", path.display());
    Ok(())
}

pub fn run_sanitize(segment: &str) {
    let clean = sanitize_path_segment(segment);
    if clean.is_empty() {
        tracing::info!("segment sanitized to empty string");
    }
    println!("{clean}");
}
