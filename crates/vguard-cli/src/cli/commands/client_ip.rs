//! `vguard client-ip` – resolve the client IP for a described request.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use vguard_core::config::GuardConfig;
use vguard_core::{get_client_ip, RequestIpContext};

#[derive(Debug, Clone, Default, Args)]
pub struct ClientIpArgs {
    /// Socket peer address.
    #[arg(long)]
    pub remote: Option<String>,
    /// Value of the X-Forwarded-For header.
    #[arg(long)]
    pub forwarded_for: Option<String>,
    /// Client IP pre-parsed by the framework.
    #[arg(long)]
    pub ip: Option<String>,
    /// Trust the reverse proxy even if the config does not.
    #[arg(long)]
    pub trust_proxy: bool,
    /// JSON file describing the request (remote_addr, headers, ip, trust_proxy).
    #[arg(long, value_name = "FILE", conflicts_with_all = ["remote", "forwarded_for", "ip"])]
    pub request: Option<PathBuf>,
}

pub fn run_client_ip(cfg: &GuardConfig, args: &ClientIpArgs) -> Result<()> {
    let ctx = build_context(cfg, args)?;
    println!("{}", get_client_ip(&ctx));
    Ok(())
}

/// The proxy is trusted if the config, the flag, or the request file says so.
pub(crate) fn build_context(cfg: &GuardConfig, args: &ClientIpArgs) -> Result<RequestIpContext> {
    let trust_proxy = cfg.trust_proxy || args.trust_proxy;

    let mut ctx = match &args.request {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("read request file {}", path.display()))?;
            serde_json::from_str::<RequestIpContext>(&data)
                .with_context(|| format!("parse request file {}", path.display()))?
        }
        None => {
            let ctx = RequestIpContext {
                remote_addr: args.remote.clone(),
                ip: args.ip.clone(),
                ..RequestIpContext::default()
            };
            match &args.forwarded_for {
                Some(value) => ctx.with_header("X-Forwarded-For", value.clone()),
                None => ctx,
            }
        }
    };
    ctx.trust_proxy |= trust_proxy;
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_build_context_with_config_trust() {
        let cfg = GuardConfig {
            trust_proxy: true,
            ..GuardConfig::default()
        };
        let args = ClientIpArgs {
            remote: Some("127.0.0.1".into()),
            forwarded_for: Some("203.0.113.8".into()),
            ..ClientIpArgs::default()
        };
        let ctx = build_context(&cfg, &args).unwrap();
        assert!(ctx.trust_proxy);
        assert_eq!(get_client_ip(&ctx), "203.0.113.8");
    }

    #[test]
    fn untrusted_by_default() {
        let args = ClientIpArgs {
            remote: Some("10.0.0.1".into()),
            forwarded_for: Some("203.0.113.8".into()),
            ..ClientIpArgs::default()
        };
        let ctx = build_context(&GuardConfig::default(), &args).unwrap();
        assert_eq!(get_client_ip(&ctx), "10.0.0.1");
    }

    #[test]
    fn request_file_is_parsed() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"remote_addr":"::ffff:192.168.0.4","headers":{{"x-forwarded-for":"198.51.100.9"}}}}"#
        )
        .unwrap();
        f.flush().unwrap();
        let args = ClientIpArgs {
            request: Some(f.path().to_path_buf()),
            trust_proxy: true,
            ..ClientIpArgs::default()
        };
        let ctx = build_context(&GuardConfig::default(), &args).unwrap();
        assert_eq!(get_client_ip(&ctx), "198.51.100.9");
    }
}
