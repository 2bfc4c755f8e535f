//! Lexical path normalization (no filesystem access, no symlink resolution).

use std::path::{Component, Path, PathBuf};

/// Removes `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the root of an absolute path: `/../etc` becomes
/// `/etc`. Leading `..` components of a relative path are kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                let pops = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::Prefix(_) | Component::RootDir));
                if pops {
                    out.pop();
                } else if !at_root {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Makes `path` absolute against the current directory, then normalizes it.
pub(crate) fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_lexically(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize_lexically(&cwd.join(path)),
        Err(e) => {
            tracing::debug!("current_dir unavailable, normalizing relative path as-is: {}", e);
            normalize_lexically(path)
        }
    }
}
