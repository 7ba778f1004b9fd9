//! Path normalization and URL-to-file resolution.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Whether `segment` can be joined onto a directory without escaping it.
///
/// Corpus ids come straight from the URL and admit `.`, so `..` must be
/// rejected here rather than at the router.
pub fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.contains(['/', '\\', '\0'])
        && matches!(
            Path::new(segment).components().next(),
            Some(Component::Normal(_))
        )
        && Path::new(segment).components().count() == 1
}

/// Resolve a URL path below `root` to an existing file.
///
/// The URL must already have the context path removed. Returns `None` for
/// directories, missing files and anything that escapes `root`.
pub fn resolve_under(root: &Path, url_path: &str) -> Option<PathBuf> {
    use percent_encoding::percent_decode_str;

    let decoded = percent_decode_str(url_path).decode_utf8().ok()?;
    let clean = decoded.trim_matches('/');

    // Reject paths with suspicious patterns early
    if clean.is_empty() || clean.contains("..") {
        return None;
    }

    let local = root.join(clean);

    // Canonicalize to resolve symlinks and verify path is under root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    canonical.is_file().then_some(canonical)
}
