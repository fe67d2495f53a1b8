use std::ops::{Deref, DerefMut};

use arcstr::ArcStr;
use federation_utils::indexmap::FxIndexMap;

use crate::{Output, OutputChunk};

/// The host's final output graph, keyed by output file name.
#[derive(Debug, Default, Clone)]
pub struct OutputBundle(FxIndexMap<ArcStr, Output>);

impl OutputBundle {
  pub fn add(&mut self, output: impl Into<Output>) {
    let output = output.into();
    self.0.insert(output.filename().clone(), output);
  }

  pub fn chunk(&self, filename: &str) -> Option<&OutputChunk> {
    self.0.get(filename).and_then(Output::as_chunk)
  }

  pub fn chunks(&self) -> impl Iterator<Item = &OutputChunk> {
    self.0.values().filter_map(Output::as_chunk)
  }

  pub fn find_chunk_by_facade(&self, facade_module_id: &str) -> Option<&OutputChunk> {
    self.chunks().find(|chunk| chunk.facade_module_id.as_deref() == Some(facade_module_id))
  }

  pub fn find_chunk_by_name(&self, name: &str) -> Option<&OutputChunk> {
    self.chunks().find(|chunk| chunk.name.as_str() == name)
  }

  /// File names of every stylesheet in the bundle, in bundle order.
  pub fn css_filenames(&self) -> impl Iterator<Item = &ArcStr> {
    self.0.values().filter(|output| output.is_css()).map(Output::filename)
  }
}

impl Deref for OutputBundle {
  type Target = FxIndexMap<ArcStr, Output>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for OutputBundle {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}
