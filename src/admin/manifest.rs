//! Build time from the web application's `META-INF/MANIFEST.MF`.

use std::io::ErrorKind;
use std::path::Path;
use std::fs;

/// Reported when the manifest file does not exist.
pub const NO_MANIFEST: &str = "(no manifest)";

/// Reported when the manifest names no build time.
pub const UNKNOWN: &str = "UNKNOWN";

/// Read `Build-Time`, or the older `Build-Date`, from the manifest at `path`.
pub fn build_time(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => main_attribute(&text, "Build-Time")
            .or_else(|| main_attribute(&text, "Build-Date"))
            .unwrap_or_else(|| UNKNOWN.to_string()),
        Err(e) if e.kind() == ErrorKind::NotFound => NO_MANIFEST.to_string(),
        Err(e) => {
            crate::log!("error"; "could not read {}: {}", path.display(), e);
            UNKNOWN.to_string()
        }
    }
}

/// Look up `name` in the manifest's main section (everything before the
/// first blank line). Lines starting with a space continue the previous one.
fn main_attribute(text: &str, name: &str) -> Option<String> {
    let mut attributes: Vec<(String, String)> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            break;
        }
        if let Some(continued) = line.strip_prefix(' ') {
            if let Some((_, value)) = attributes.last_mut() {
                value.push_str(continued);
            }
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            attributes.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    attributes
        .into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(content: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("MANIFEST.MF");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_build_time() {
        let (_dir, path) = write_manifest(
            "Manifest-Version: 1.0\nBuild-Time: 2024-03-01 12:00:00\nCreated-By: maven\n",
        );
        assert_eq!(build_time(&path), "2024-03-01 12:00:00");
    }

    #[test]
    fn test_legacy_build_date() {
        let (_dir, path) = write_manifest("Manifest-Version: 1.0\r\nBuild-Date: 2015-06-01\r\n");
        assert_eq!(build_time(&path), "2015-06-01");
    }

    #[test]
    fn test_build_time_preferred_over_date() {
        let (_dir, path) = write_manifest("Build-Date: old\nBuild-Time: new\n");
        assert_eq!(build_time(&path), "new");
    }

    #[test]
    fn test_only_main_section() {
        let (_dir, path) = write_manifest("Manifest-Version: 1.0\n\nName: lib\nBuild-Time: nope\n");
        assert_eq!(build_time(&path), UNKNOWN);
    }

    #[test]
    fn test_continuation_line() {
        let (_dir, path) = write_manifest("Build-Time: 2024-03-01\n  12:00:00\n");
        assert_eq!(build_time(&path), "2024-03-01 12:00:00");
    }

    #[test]
    fn test_missing_manifest() {
        let dir = TempDir::new().unwrap();
        assert_eq!(build_time(&dir.path().join("MANIFEST.MF")), NO_MANIFEST);
    }
}
