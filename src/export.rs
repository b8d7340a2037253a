//! Writes fixture objects to disk for external loaders (tc, bpftool, test harnesses)

use crate::{inspect, Fixture, Result};
use std::path::{Path, PathBuf};
use tc_fixtures_common::Hook;
use tracing::{debug, info};

/// Verify `image` against `hook` and write it to `dir/<object_name>.o`.
pub async fn write_image(image: &[u8], hook: Hook, dir: &Path) -> Result<PathBuf> {
    let report = inspect::verify(image, hook)?;
    debug!(
        "Verified {} image: section={}, license={}, {} bytes",
        hook, report.section, report.license, report.size_bytes
    );

    tokio::fs::create_dir_all(dir).await?;
    let file_name = Fixture::new(hook).file_name();
    let path = dir.join(&file_name);
    // A loader watching `dir` must never see a partially written object.
    let tmp = dir.join(format!("{file_name}.tmp"));
    tokio::fs::write(&tmp, image).await?;
    tokio::fs::rename(&tmp, &path).await?;

    info!("Wrote {} fixture to {}", hook, path.display());
    Ok(path)
}

/// Write one embedded fixture.
pub async fn write_fixture(fixture: Fixture, dir: &Path) -> Result<PathBuf> {
    write_image(fixture.image()?, fixture.hook(), dir).await
}

/// Write every embedded fixture, stopping at the first failure.
pub async fn write_all(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for fixture in Fixture::all() {
        written.push(write_fixture(fixture, dir).await?);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::testing::valid;
    use crate::FixtureError;

    #[tokio::test]
    async fn test_write_image() {
        let dir = tempfile::tempdir().unwrap();
        let image = valid("classifier");

        let path = write_image(&image, Hook::Classifier, dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("dummy_bpf.o"));
        assert_eq!(std::fs::read(&path).unwrap(), image);
    }

    #[tokio::test]
    async fn test_write_image_replaces_existing_object() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("dummy_bpf.o");
        std::fs::write(&stale, b"stale").unwrap();
        let image = valid("classifier");

        let path = write_image(&image, Hook::Classifier, dir.path()).await.unwrap();
        assert_eq!(path, stale);
        assert_eq!(std::fs::read(&path).unwrap(), image);

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["dummy_bpf.o"]);
    }

    #[tokio::test]
    async fn test_write_image_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let path = write_image(&valid("tcx/ingress"), Hook::TcxIngress, &nested)
            .await
            .unwrap();
        assert_eq!(path, nested.join("dummy_bpf_tcx.o"));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_write_image_refuses_mismatched_hook() {
        let dir = tempfile::tempdir().unwrap();

        let err = write_image(&valid("classifier"), Hook::TcxIngress, dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, FixtureError::HookMismatch { .. }));
        assert!(!dir.path().join("dummy_bpf_tcx.o").exists());
    }

    #[tokio::test]
    async fn test_write_all_follows_embedding() {
        let dir = tempfile::tempdir().unwrap();
        let embedded = Fixture::all().all(|f| f.is_embedded());

        match write_all(dir.path()).await {
            Ok(paths) => {
                assert!(embedded);
                assert_eq!(paths.len(), 2);
                assert!(paths.iter().all(|p| p.exists()));
            }
            Err(FixtureError::ImageUnavailable { .. }) => assert!(!embedded),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
