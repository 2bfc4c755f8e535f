//! Path containment and safe resolution against configured roots.
//!
//! All checks are lexical: `.` and `..` are normalized away, but nothing is
//! looked up on disk. Containment is component-wise, so `/data/videos2` is
//! never inside `/data/videos`.

mod normalize;
mod roots;
mod sanitize;

pub use normalize::normalize_lexically;
pub use roots::{PathRoots, RootKind};
pub use sanitize::sanitize_path_segment;

use std::path::{Path, PathBuf};

use crate::error::GuardError;
use normalize::absolutize;

/// True if `path` equals `dir` or lies below it after normalization.
///
/// An empty `path` is never inside anything.
pub fn is_path_within_directory(path: impl AsRef<Path>, dir: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return false;
    }
    absolutize(path).starts_with(absolutize(dir.as_ref()))
}

/// True if `path` is within any of `dirs`. An empty `dirs` yields false.
pub fn is_path_within_directories<P: AsRef<Path>>(path: impl AsRef<Path>, dirs: &[P]) -> bool {
    let path = path.as_ref();
    dirs.iter().any(|dir| is_path_within_directory(path, dir))
}

/// Joins `raw` onto `root`, normalizes, and returns the result if it stays
/// inside `root`.
///
/// An absolute `raw` replaces `root` entirely, so it only passes when it
/// already points inside `root`. The returned path is not checked for
/// existence.
pub fn resolve_safe_path(raw: &str, root: impl AsRef<Path>) -> Result<PathBuf, GuardError> {
    if raw.is_empty() || raw.contains('\0') {
        return Err(GuardError::InvalidPath);
    }
    let root = absolutize(root.as_ref());
    let resolved = normalize_lexically(&root.join(raw));
    if !resolved.starts_with(&root) {
        tracing::debug!(raw, root = %root.display(), "path traversal rejected");
        return Err(GuardError::PathTraversal {
            path: raw.to_string(),
        });
    }
    Ok(resolved)
}

/// Accepts an already-absolute `candidate` if it is inside any of `roots`.
///
/// Unlike [`resolve_safe_path`] the candidate is never joined onto a root and
/// is returned unchanged.
pub fn resolve_safe_path_in_directories<P: AsRef<Path>>(
    candidate: &str,
    roots: &[P],
) -> Result<PathBuf, GuardError> {
    if candidate.is_empty() || candidate.contains('\0') {
        return Err(GuardError::InvalidPath);
    }
    if !is_path_within_directories(candidate, roots) {
        tracing::debug!(candidate, "path outside allowed directories");
        return Err(GuardError::OutsideAllowedDirectories {
            path: candidate.to_string(),
        });
    }
    Ok(PathBuf::from(candidate))
}
