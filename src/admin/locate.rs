//! Search for the deployment's admin properties file.

use std::path::{Path, PathBuf};

/// System directories searched on non-Windows hosts, in order.
#[cfg(not(windows))]
const SYSTEM_DIRS: &[&str] = &["/etc/blacklab", "/vol1/etc/blacklab"];

/// Every place `file_name` is looked for, in search order.
///
/// The directory containing the web application comes first, so several
/// deployments side by side can each carry their own file.
pub fn candidate_paths(file_name: &str, webapp: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(4);

    if let Some(parent) = webapp.parent() {
        candidates.push(parent.join(file_name));
    }

    #[cfg(not(windows))]
    candidates.extend(SYSTEM_DIRS.iter().map(|dir| Path::new(dir).join(file_name)));

    candidates.push(std::env::temp_dir().join(file_name));
    candidates
}

/// First candidate that exists. It may still not be a regular file; the
/// caller decides what to do with that.
pub fn locate(file_name: &str, webapp: &Path) -> Option<PathBuf> {
    candidate_paths(file_name, webapp).into_iter().find(|path| {
        let found = path.exists();
        crate::debug!("admin"; "{}: {}", path.display(), if found { "found" } else { "absent" });
        found
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_candidate_order() {
        let candidates = candidate_paths("corpus-frontend.properties", Path::new("/srv/webapps/corpus-frontend"));

        assert_eq!(candidates[0], PathBuf::from("/srv/webapps/corpus-frontend.properties"));
        assert_eq!(
            candidates.last().unwrap(),
            &std::env::temp_dir().join("corpus-frontend.properties")
        );
        #[cfg(not(windows))]
        {
            assert_eq!(candidates[1], PathBuf::from("/etc/blacklab/corpus-frontend.properties"));
            assert_eq!(candidates[2], PathBuf::from("/vol1/etc/blacklab/corpus-frontend.properties"));
            assert_eq!(candidates.len(), 4);
        }
    }

    #[test]
    fn test_webapp_parent_wins() {
        let dir = TempDir::new().unwrap();
        let webapp = dir.path().join("frontend-locate-test");
        fs::create_dir_all(&webapp).unwrap();
        let expected = dir.path().join("frontend-locate-test.properties");
        fs::write(&expected, "blsUrl=x").unwrap();

        assert_eq!(locate("frontend-locate-test.properties", &webapp), Some(expected));
    }

    #[test]
    fn test_nothing_found() {
        let dir = TempDir::new().unwrap();
        let webapp = dir.path().join("app");
        assert_eq!(locate("no-such-deployment-7f3a9c.properties", &webapp), None);
    }
}
