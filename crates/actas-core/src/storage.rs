//! Image persistence.
//!
//! Bytes go to a `.part` file first and are renamed into place after a sync,
//! so an interrupted write never leaves a `mesa_<id>.jpg` the scanner would
//! mistake for a finished download.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::roster::MesaId;
use crate::scanner::image_path;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `mesa_1.jpg` → `mesa_1.jpg.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Write a decoded tally sheet for `id` into `dir`. Returns the final path.
pub fn write_image(dir: &Path, id: MesaId, bytes: &[u8]) -> io::Result<PathBuf> {
    let final_path = image_path(dir, id);
    let tmp = temp_path(&final_path);
    if let Err(e) = write_then_rename(&tmp, &final_path, bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(final_path)
}

fn write_then_rename(tmp: &Path, final_path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut f = File::create(tmp)?;
    f.write_all(bytes)?;
    f.sync_all()?;
    drop(f);
    std::fs::rename(tmp, final_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("mesa_1.jpg"));
        assert_eq!(p.to_string_lossy(), "mesa_1.jpg.part");
        let p2 = temp_path(Path::new("/tmp/out/mesa_22.jpg"));
        assert_eq!(p2.to_string_lossy(), "/tmp/out/mesa_22.jpg.part");
    }

    #[test]
    fn write_image_leaves_only_final_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), 42, b"\xff\xd8jpeg").unwrap();
        assert_eq!(path, dir.path().join("mesa_42.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), b"\xff\xd8jpeg");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn write_image_into_missing_dir_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(write_image(&missing, 1, b"x").is_err());
        assert!(!missing.exists());
    }
}
