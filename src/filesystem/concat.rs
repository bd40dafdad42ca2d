// src/filesystem/concat.rs
use crate::error::FsError;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Writes the contents of `sources`, in order, into `destination`, replacing
/// whatever it held. Returns the number of bytes written.
///
/// The output is staged in a temporary file next to `destination`, so a
/// failing source leaves `destination` as it was.
pub fn concat_files<I>(sources: I, destination: impl AsRef<Path>) -> Result<u64, FsError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let destination = destination.as_ref();
    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let staged = NamedTempFile::new_in(dir).map_err(|e| FsError::io(dir, e))?;
    let mut writer = BufWriter::new(staged);

    let mut total = 0;
    for source in sources {
        let source = source.as_ref();
        let mut reader = File::open(source).map_err(|e| open_error(source, e))?;
        total += io::copy(&mut reader, &mut writer).map_err(|e| FsError::io(source, e))?;
    }

    let staged = writer
        .into_inner()
        .map_err(|e| FsError::io(destination, e.into_error()))?;
    staged.persist(destination).map_err(|e| FsError::io(destination, e.error))?;

    debug!(destination = %destination.display(), bytes = total, "Concatenated files");
    Ok(total)
}

/// Reads every source as UTF-8 text and joins them in order.
pub fn concat_to_string<I>(sources: I) -> Result<String, FsError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut out = String::new();
    for source in sources {
        let source = source.as_ref();
        out.push_str(&fs::read_to_string(source).map_err(|e| open_error(source, e))?);
    }
    Ok(out)
}

fn open_error(path: &Path, e: io::Error) -> FsError {
    if e.kind() == io::ErrorKind::NotFound {
        FsError::NotFound(path.to_path_buf())
    } else {
        FsError::io(path, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        let out = dir.path().join("out.txt");
        fs::write(&a, "head\n").unwrap();
        fs::write(&b, "tail\n").unwrap();
        fs::write(&out, "stale contents").unwrap();

        let written = concat_files([&a, &b], &out).unwrap();

        assert_eq!(written, 10);
        assert_eq!(fs::read_to_string(&out).unwrap(), "head\ntail\n");
        assert_eq!(concat_to_string([&b, &a]).unwrap(), "tail\nhead\n");
    }

    #[test]
    fn test_concat_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.txt");
        let missing = dir.path().join("missing.txt");
        let out = dir.path().join("out.txt");
        fs::write(&present, "partial").unwrap();
        fs::write(&out, "precious").unwrap();

        assert!(matches!(concat_files([&present, &missing], &out), Err(FsError::NotFound(_))));
        assert_eq!(fs::read_to_string(&out).unwrap(), "precious");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);

        assert!(matches!(concat_to_string([&missing]), Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_concat_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.txt");
        let none: [&Path; 0] = [];

        assert_eq!(concat_files(none, &out).unwrap(), 0);
        assert_eq!(fs::read_to_string(&out).unwrap(), "");
    }
}
