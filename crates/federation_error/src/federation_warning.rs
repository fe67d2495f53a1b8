/// Non-fatal diagnostics collected while finalizing the generated runtime chunks.
#[derive(Debug, thiserror::Error)]
pub enum FederationWarning {
  #[error("No output chunk was generated for \"{path}\"; its stylesheet loader was removed from {chunk}")]
  UnresolvedCss { chunk: String, path: String },

  #[error("No output chunk was generated for \"{path}\" and its placeholder is not a stylesheet loader argument; it was replaced by an empty list in {chunk}")]
  StrayCss { chunk: String, path: String },

  #[error("No output chunk is named \"{key}\"; the placeholder is left unresolved in {chunk}")]
  UnresolvedJs { chunk: String, key: String },

  #[error("Failed to parse {chunk}, unresolved stylesheet loaders were neutralized instead of removed: {reason}")]
  SyntaxFallback { chunk: String, reason: String },
}
