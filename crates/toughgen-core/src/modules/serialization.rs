use crate::domain::{DeckError, DeckResult};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

/// Stages the deck next to its destination and renames it into place, so an
/// existing file is either fully replaced or left untouched.
pub fn write_text_artifact(path: &Path, content: &str) -> DeckResult<()> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(directory).map_err(|source| {
        DeckError::io(
            "IO.OUTPUT_DIRECTORY",
            format!(
                "failed to create output directory '{}': {}",
                directory.display(),
                source
            ),
        )
    })?;

    let write_error = |source: std::io::Error| {
        DeckError::io(
            "IO.OUTPUT_WRITE",
            format!("failed to stage '{}': {}", path.display(), source),
        )
    };
    let mut staged = NamedTempFile::new_in(directory).map_err(write_error)?;
    staged
        .write_all(normalize_text_artifact(content).as_bytes())
        .map_err(write_error)?;
    staged.flush().map_err(write_error)?;

    staged.persist(path).map_err(|error| {
        DeckError::io(
            "IO.OUTPUT_PERSIST",
            format!("failed to move deck into '{}': {}", path.display(), error.error),
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{normalize_text_artifact, write_text_artifact};
    use crate::domain::DeckErrorKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn normalize_text_artifact_uses_canonical_line_endings() {
        let normalized = normalize_text_artifact("alpha\r\nbeta\rgamma");
        assert_eq!(normalized, "alpha\nbeta\ngamma\n");
        assert_eq!(normalize_text_artifact(""), "");
    }

    #[test]
    fn writes_replace_existing_decks_and_leave_no_staging_files() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("decks").join("flow.inp");

        write_text_artifact(&path, "old\r\n").expect("first write should succeed");
        write_text_artifact(&path, "new deck").expect("second write should succeed");

        assert_eq!(fs::read(&path).expect("deck should be readable"), b"new deck\n");
        let entries = fs::read_dir(path.parent().expect("parent"))
            .expect("directory should be listable")
            .count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let blocker = temp.path().join("not-a-directory");
        fs::write(&blocker, "file").expect("blocker should be written");

        let error = write_text_artifact(&blocker.join("MESH"), "ELEME")
            .expect_err("parent is a regular file");
        assert_eq!(error.kind(), DeckErrorKind::Io);
        assert_eq!(error.exit_code(), 3);
    }
}
