use std::{fmt::Debug, sync::Arc};

use arcstr::ArcStr;
use federation_utils::indexmap::FxIndexMap;

/// Maps a module id to the name of the chunk it must be placed in. `None` leaves the decision to
/// the bundler.
pub type ManualChunksFn = Arc<dyn Fn(&str) -> Option<ArcStr> + Send + Sync>;

#[derive(Clone)]
pub enum ManualChunks {
  Fn(ManualChunksFn),
  /// Chunk name -> module specifiers.
  Groups(FxIndexMap<String, Vec<String>>),
}

impl ManualChunks {
  pub fn chunk_for(&self, id: &str) -> Option<ArcStr> {
    match self {
      Self::Fn(func) => func(id),
      Self::Groups(groups) => groups
        .iter()
        .find(|(_, ids)| ids.iter().any(|each| each == id))
        .map(|(name, _)| ArcStr::from(name.as_str())),
    }
  }
}

impl Debug for ManualChunks {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Fn(_) => f.write_str("ManualChunks::Fn(..)"),
      Self::Groups(groups) => f.debug_tuple("ManualChunks::Groups").field(groups).finish(),
    }
  }
}

/// The part of the host's output options the federation engine adjusts.
#[derive(Debug, Clone)]
pub struct OutputOptions {
  pub manual_chunks: Option<ManualChunks>,
  /// Whether transitive imports of entry chunks are hoisted into them.
  pub hoist_transitive_imports: bool,
}

impl Default for OutputOptions {
  fn default() -> Self {
    Self { manual_chunks: None, hoist_transitive_imports: true }
  }
}
