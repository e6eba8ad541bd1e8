use std::fs;
use std::path::Path;

use crate::error::MediaError;
use crate::models::MediaRef;

/// Reads an attached photo or avatar once to make sure it is usable and
/// returns a reference to it. Failures are handed back to the caller, who
/// decides whether to drop the attachment or abort.
pub fn load_media(path: &Path) -> Result<MediaRef, MediaError> {
    let unreadable = |source| MediaError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let meta = fs::metadata(path).map_err(unreadable)?;
    if !meta.is_file() {
        return Err(MediaError::NotAFile(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(unreadable)?;
    if bytes.is_empty() {
        return Err(MediaError::Empty(path.to_path_buf()));
    }
    let resolved = fs::canonicalize(path).map_err(unreadable)?;

    Ok(MediaRef {
        path: resolved.to_string_lossy().into_owned(),
        size_bytes: bytes.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_readable_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x89PNG fake").unwrap();
        let media = load_media(file.path()).unwrap();
        assert_eq!(media.size_bytes, 9);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_media(&dir.path().join("nope.jpg")).unwrap_err();
        assert!(matches!(err, MediaError::Unreadable { .. }));
    }

    #[test]
    fn test_directory_and_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_media(dir.path()), Err(MediaError::NotAFile(_))));

        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(load_media(file.path()), Err(MediaError::Empty(_))));
    }
}
