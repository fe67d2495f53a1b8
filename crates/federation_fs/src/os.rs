use std::{
  fs, io,
  path::{Path, PathBuf},
};

use oxc_resolver::{FileMetadata, FileSystem as OxcResolverFileSystem};

use crate::file_system::{DirEntryKind, FileSystem};

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl OxcResolverFileSystem for OsFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
  }

  fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
    fs::metadata(path).map(FileMetadata::from)
  }

  fn symlink_metadata(&self, path: &Path) -> io::Result<FileMetadata> {
    fs::symlink_metadata(path).map(FileMetadata::from)
  }

  fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
    fs::read_link(path)
  }
}

impl FileSystem for OsFileSystem {
  fn read_dir(&self, path: &Path) -> io::Result<Vec<(PathBuf, DirEntryKind)>> {
    let mut entries = fs::read_dir(path)?
      .map(|entry| {
        let entry = entry?;
        // Follow symlinks, workspace packages are usually linked into `node_modules`.
        let kind = fs::metadata(entry.path()).map_or(DirEntryKind::Other, |meta| to_kind(&meta));
        Ok((entry.path(), kind))
      })
      .collect::<io::Result<Vec<_>>>()?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
  }

  fn kind(&self, path: &Path) -> Option<DirEntryKind> {
    fs::metadata(path).ok().map(|meta| to_kind(&meta))
  }
}

fn to_kind(meta: &fs::Metadata) -> DirEntryKind {
  if meta.is_dir() {
    DirEntryKind::Dir
  } else if meta.is_file() {
    DirEntryKind::File
  } else {
    DirEntryKind::Other
  }
}

#[test]
fn collect_dirs_is_lexicographic_and_recursive() {
  let root = tempfile::tempdir().unwrap();
  for dir in ["b", "a/z", "a/y", "c"] {
    fs::create_dir_all(root.path().join(dir)).unwrap();
  }
  fs::write(root.path().join("a/file.js"), "").unwrap();

  let dirs = OsFileSystem.collect_dirs(root.path()).unwrap();
  let relative = dirs
    .iter()
    .map(|dir| dir.strip_prefix(root.path()).unwrap().to_string_lossy().replace('\\', "/"))
    .collect::<Vec<_>>();
  assert_eq!(relative, ["a", "a/y", "a/z", "b", "c"]);
}
