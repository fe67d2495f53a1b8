use std::{
  io,
  path::{Path, PathBuf},
};

use oxc_resolver::FileSystem as OxcResolverFileSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirEntryKind {
  File,
  Dir,
  Other,
}

/// The file system module resolution runs on, plus the directory listing needed to walk install
/// directories.
pub trait FileSystem: OxcResolverFileSystem {
  /// Immediate children of `path`, sorted by path so callers see a stable order.
  fn read_dir(&self, path: &Path) -> io::Result<Vec<(PathBuf, DirEntryKind)>>;

  fn kind(&self, path: &Path) -> Option<DirEntryKind>;

  fn is_dir(&self, path: &Path) -> bool {
    matches!(self.kind(path), Some(DirEntryKind::Dir))
  }

  /// Every directory below `root`, depth-first in lexicographic order. `root` itself is excluded.
  fn collect_dirs(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut collected = vec![];
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
      let children = self.read_dir(&dir)?;
      // Reversed so the lexicographically smallest child is visited first.
      for (path, kind) in children.into_iter().rev() {
        if kind == DirEntryKind::Dir {
          stack.push(path);
        }
      }
      if dir != root {
        collected.push(dir);
      }
    }
    Ok(collected)
  }
}
