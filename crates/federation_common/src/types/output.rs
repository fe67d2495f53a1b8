use arcstr::ArcStr;

use crate::{OutputAsset, OutputChunk};

#[derive(Debug, Clone)]
pub enum Output {
  Chunk(Box<OutputChunk>),
  Asset(Box<OutputAsset>),
}

impl Output {
  pub fn filename(&self) -> &ArcStr {
    match self {
      Self::Chunk(chunk) => &chunk.filename,
      Self::Asset(asset) => &asset.filename,
    }
  }

  pub fn as_chunk(&self) -> Option<&OutputChunk> {
    match self {
      Self::Chunk(chunk) => Some(chunk),
      Self::Asset(_) => None,
    }
  }

  pub fn as_chunk_mut(&mut self) -> Option<&mut OutputChunk> {
    match self {
      Self::Chunk(chunk) => Some(chunk),
      Self::Asset(_) => None,
    }
  }

  pub fn is_css(&self) -> bool {
    std::path::Path::new(self.filename().as_str())
      .extension()
      .is_some_and(|ext| ext.eq_ignore_ascii_case("css"))
  }
}

impl From<OutputChunk> for Output {
  fn from(chunk: OutputChunk) -> Self {
    Self::Chunk(Box::new(chunk))
  }
}

impl From<OutputAsset> for Output {
  fn from(asset: OutputAsset) -> Self {
    Self::Asset(Box::new(asset))
  }
}
