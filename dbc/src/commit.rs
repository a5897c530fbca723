use super::*;
use std::fs::{OpenOptions, create_dir_all, remove_file};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// A sibling of `path` unique to this process and call.
fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        TMP_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    path.with_file_name(tmp_name)
}

/// Replaces the file at `path` with `data`, so that readers see either the
/// previous contents or all of `data`, never a partial file.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    /*
    write data to a temp file alongside the destination
    fsync() the temp file
    rename the temp file over the destination
    */

    // Ensure directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }

    // Never reuse a file that is already there
    let tmp_path = tmp_path(path);
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)?;

    // Write all data to file
    if let Err(e) = file.write_all(data) {
        _ = remove_file(&tmp_path);
        return Err(e);
    }

    // Sync everything
    if let Err(e) = file.sync_all() {
        _ = remove_file(&tmp_path);
        return Err(e);
    }
    drop(file);

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        _ = remove_file(&tmp_path);
        return Err(e);
    }

    trace!(path = %path.display(), bytes = data.len(), "Committed file");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.dbc");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn leaves_siblings_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.dbc");
        let sibling = dir.path().join("net.dbc.tmp");
        std::fs::write(&sibling, "keep").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_to_string(&sibling).unwrap(), "keep");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn concurrent_writers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.dbc");

        std::thread::scope(|s| {
            for i in 0..8 {
                let path = &path;
                s.spawn(move || write_atomic(path, format!("writer {i}\n").as_bytes()).unwrap());
            }
        });

        assert!(
            std::fs::read_to_string(&path)
                .unwrap()
                .starts_with("writer ")
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("net.dbc");

        write_atomic(&path, b"VERSION \"\"\n").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"VERSION \"\"\n");
    }
}
