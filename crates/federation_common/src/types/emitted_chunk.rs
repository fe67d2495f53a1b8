use arcstr::ArcStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreserveSignature {
  Strict,
  AllowExtension,
}

/// A chunk the host has to emit in addition to its own entries.
#[derive(Debug, Clone)]
pub struct EmittedChunk {
  /// Module id, resolved by the host like an import specifier.
  pub id: ArcStr,
  /// Chunk name, the host renders the file name from it.
  pub name: Option<ArcStr>,
  /// Fixed output file name, takes precedence over `name`.
  pub filename: Option<String>,
  pub preserve_signature: PreserveSignature,
}
