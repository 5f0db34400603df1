// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input folder scan.

use std::path::{Path, PathBuf};

use nikscan_core::error::{NikScanError, Result};
use nikscan_core::types::ImageExtension;
use tracing::{debug, instrument};

/// List the card images in `dir`, non-recursively.
///
/// Each extension in [`ImageExtension::SCAN_ORDER`] is queried on its own
/// (exact case) and the results are concatenated in that order. Within one
/// extension, files are sorted by name so repeated runs see the same order.
///
/// # Errors
///
/// [`NikScanError::InputDirMissing`] if `dir` does not exist,
/// [`NikScanError::InputNotDirectory`] if it is not a folder,
/// [`NikScanError::NoImages`] if nothing matches.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(NikScanError::InputDirMissing(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(NikScanError::InputNotDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }

    let mut images = Vec::new();
    for ext in ImageExtension::SCAN_ORDER {
        let mut matching: Vec<PathBuf> = files.iter().filter(|p| ext.matches(p)).cloned().collect();
        matching.sort();
        debug!(extension = ext.as_str(), count = matching.len(), "Extension scanned");
        images.extend(matching);
    }

    if images.is_empty() {
        return Err(NikScanError::NoImages {
            dir: dir.to_path_buf(),
            extensions: ImageExtension::describe_all(),
        });
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn missing_directory_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let err = discover_images(&tmp.path().join("images")).unwrap_err();
        assert!(matches!(err, NikScanError::InputDirMissing(_)));
    }

    #[test]
    fn regular_file_is_not_an_input_folder() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "images");

        let err = discover_images(&tmp.path().join("images")).unwrap_err();
        assert!(matches!(err, NikScanError::InputNotDirectory(_)));
    }

    #[test]
    fn only_bmp_files_means_no_images() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.bmp");
        touch(tmp.path(), "b.bmp");

        let err = discover_images(tmp.path()).unwrap_err();
        match err {
            NikScanError::NoImages { extensions, .. } => assert_eq!(extensions, ".jpg/.png/.jpeg"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extensions_are_grouped_in_scan_order() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["c.jpeg", "b.png", "z.jpg", "a.png", "a.jpg", "notes.txt"] {
            touch(tmp.path(), name);
        }

        let images = discover_images(tmp.path()).unwrap();
        assert_eq!(names(&images), vec!["a.jpg", "z.jpg", "a.png", "b.png", "c.jpeg"]);
    }

    #[test]
    fn extension_case_must_match() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "upper.JPG");
        touch(tmp.path(), "mixed.Png");
        touch(tmp.path(), "lower.jpg");

        let images = discover_images(tmp.path()).unwrap();
        assert_eq!(names(&images), vec!["lower.jpg"]);
    }

    #[test]
    fn subdirectories_are_not_entered() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("nested.jpg")).unwrap();
        touch(&tmp.path().join("nested.jpg"), "inner.jpg");

        let err = discover_images(tmp.path()).unwrap_err();
        assert!(matches!(err, NikScanError::NoImages { .. }));
    }
}
