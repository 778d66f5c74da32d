use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

/// Reads a file, mapping a missing file to `None`. Every other I/O error is
/// returned.
pub fn read_optional<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(Error::IoError(err)),
    }
}

/// Writes `contents` to a file only its owner can read or write.
///
/// On unix a new file is created with mode 0600 and an existing one is
/// restricted before anything is written to it.
#[cfg(unix)]
pub fn write_private<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path.as_ref())?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

#[cfg(not(unix))]
pub fn write_private<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let mut file =
        OpenOptions::new().write(true).create(true).truncate(true).open(path.as_ref())?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_optional_maps_missing_file_to_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_optional(dir.path().join("absent")).unwrap(), None);

        let present = dir.path().join("present");
        std::fs::write(&present, "x").unwrap();
        assert_eq!(read_optional(&present).unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn read_optional_propagates_other_errors() {
        let dir = TempDir::new().unwrap();
        assert!(read_optional(dir.path()).is_err());
    }

    #[test]
    fn write_private_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret");
        std::fs::write(&path, "a much longer previous content").unwrap();
        write_private(&path, "short").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn read_from_collects_reader() {
        assert_eq!(read_from("abc".as_bytes()).unwrap(), "abc");
    }
}
