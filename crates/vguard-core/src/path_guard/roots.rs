//! Configured media roots and per-category path validation.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::GuardError;

use super::{resolve_safe_path, resolve_safe_path_in_directories};

/// Category of a configured root directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    Videos,
    Images,
    CloudThumbnailCache,
}

impl RootKind {
    pub const ALL: [RootKind; 3] = [
        RootKind::Videos,
        RootKind::Images,
        RootKind::CloudThumbnailCache,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RootKind::Videos => "videos",
            RootKind::Images => "images",
            RootKind::CloudThumbnailCache => "cloud_thumbnail_cache",
        }
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three directory roots the library serves from and writes to.
///
/// Each `validate_*` method binds [`resolve_safe_path`] to one root, so a path
/// that belongs to another category (an image path handed to a video
/// endpoint) is rejected as traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRoots {
    videos: PathBuf,
    images: PathBuf,
    cloud_thumbnail_cache: PathBuf,
}

impl PathRoots {
    pub fn new(
        videos: impl Into<PathBuf>,
        images: impl Into<PathBuf>,
        cloud_thumbnail_cache: impl Into<PathBuf>,
    ) -> Self {
        Self {
            videos: videos.into(),
            images: images.into(),
            cloud_thumbnail_cache: cloud_thumbnail_cache.into(),
        }
    }

    pub fn root(&self, kind: RootKind) -> &Path {
        match kind {
            RootKind::Videos => &self.videos,
            RootKind::Images => &self.images,
            RootKind::CloudThumbnailCache => &self.cloud_thumbnail_cache,
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        RootKind::ALL.map(|kind| self.root(kind))
    }

    pub fn validate(&self, kind: RootKind, raw: &str) -> Result<PathBuf, GuardError> {
        resolve_safe_path(raw, self.root(kind))
    }

    pub fn validate_video_path(&self, raw: &str) -> Result<PathBuf, GuardError> {
        self.validate(RootKind::Videos, raw)
    }

    pub fn validate_image_path(&self, raw: &str) -> Result<PathBuf, GuardError> {
        self.validate(RootKind::Images, raw)
    }

    pub fn validate_cloud_thumbnail_cache_path(&self, raw: &str) -> Result<PathBuf, GuardError> {
        self.validate(RootKind::CloudThumbnailCache, raw)
    }

    /// Accepts an absolute path inside any of the roots, unchanged.
    pub fn contain(&self, candidate: &str) -> Result<PathBuf, GuardError> {
        resolve_safe_path_in_directories(candidate, &self.all())
    }
}
