use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::path_guard::{PathRoots, RootKind};

/// Directory roots the library serves files from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootsConfig {
    /// Downloaded videos.
    pub videos: PathBuf,
    /// Posters, avatars and other images.
    pub images: PathBuf,
    /// Thumbnails fetched from cloud drives.
    pub cloud_thumbnail_cache: PathBuf,
}

impl Default for RootsConfig {
    fn default() -> Self {
        Self {
            videos: PathBuf::from("/data/videos"),
            images: PathBuf::from("/data/images"),
            cloud_thumbnail_cache: PathBuf::from("/data/cache/cloud-thumbnails"),
        }
    }
}

/// Global configuration loaded from `~/.config/vguard/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Honor `X-Forwarded-For` from a private/loopback peer.
    #[serde(default)]
    pub trust_proxy: bool,
    /// Hostnames outbound fetches may target (exact or subdomain match).
    #[serde(default)]
    pub allowlist: Vec<String>,
    /// The one origin redirects may point to, e.g. the cloud-drive frontend.
    #[serde(default)]
    pub allowed_redirect_origin: Option<String>,
    #[serde(default)]
    pub roots: RootsConfig,
}

impl GuardConfig {
    pub fn path_roots(&self) -> PathRoots {
        PathRoots::new(
            self.roots.videos.clone(),
            self.roots.images.clone(),
            self.roots.cloud_thumbnail_cache.clone(),
        )
    }

    /// Rejects relative roots and blank allowlist entries.
    pub fn validate(&self) -> Result<()> {
        let roots = self.path_roots();
        for kind in RootKind::ALL {
            let root = roots.root(kind);
            if !root.is_absolute() {
                bail!("roots.{kind} must be an absolute path, got {}", root.display());
            }
        }
        if let Some(i) = self.allowlist.iter().position(|e| e.trim().is_empty()) {
            bail!("allowlist entry {i} is empty");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vguard")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GuardConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GuardConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load and validate configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<GuardConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: GuardConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = GuardConfig::default();
        assert!(!cfg.trust_proxy);
        assert!(cfg.allowlist.is_empty());
        assert!(cfg.allowed_redirect_origin.is_none());
        assert_eq!(cfg.roots.videos, PathBuf::from("/data/videos"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = GuardConfig {
            trust_proxy: true,
            allowlist: vec!["example.com".into()],
            allowed_redirect_origin: Some("https://openlist.example.com".into()),
            roots: RootsConfig::default(),
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: GuardConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            trust_proxy = true
            allowlist = ["example.com", "drive.cloud.test"]
            allowed_redirect_origin = "https://openlist.example.com"

            [roots]
            videos = "/srv/media/videos"
            images = "/srv/media/images"
            cloud_thumbnail_cache = "/srv/cache/thumbs"
        "#;
        let cfg: GuardConfig = toml::from_str(toml).unwrap();
        assert!(cfg.trust_proxy);
        assert_eq!(cfg.allowlist.len(), 2);
        let roots = cfg.path_roots();
        assert_eq!(roots.root(RootKind::Images), Path::new("/srv/media/images"));
        assert_eq!(
            roots.validate_video_path("a.mp4").unwrap(),
            PathBuf::from("/srv/media/videos/a.mp4")
        );
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg: GuardConfig = toml::from_str("trust_proxy = true").unwrap();
        assert!(cfg.trust_proxy);
        assert_eq!(cfg.roots, RootsConfig::default());
    }

    #[test]
    fn validate_rejects_relative_root_and_blank_entry() {
        let mut cfg = GuardConfig::default();
        cfg.roots.images = PathBuf::from("images");
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("roots.images"));

        let mut cfg = GuardConfig::default();
        cfg.allowlist = vec!["example.com".into(), " ".into()];
        assert!(cfg.validate().unwrap_err().to_string().contains("entry 1"));
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "allowlist = [\"example.com\"]").unwrap();
        f.flush().unwrap();
        let cfg = load_from(f.path()).unwrap();
        assert_eq!(cfg.allowlist, vec!["example.com".to_string()]);
    }

    #[test]
    fn load_from_invalid_file_reports_path() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "trust_proxy = \"maybe\"").unwrap();
        f.flush().unwrap();
        let err = load_from(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parse config"));
    }
}
