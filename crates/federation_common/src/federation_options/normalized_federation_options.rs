use crate::{BuilderInfo, ExposedModule, RemoteDeclaration, SHARED_RUNTIME};

#[derive(Debug)]
pub struct NormalizedFederationOptions {
  pub name: Option<String>,
  pub filename: String,
  pub share_scope: String,
  pub exposes: Vec<ExposedModule>,
  pub remotes: Vec<RemoteDeclaration>,
  pub builder: BuilderInfo,
}

impl NormalizedFederationOptions {
  /// Output file name of the remote entry, relative to the output directory.
  pub fn remote_entry_filename(&self) -> String {
    self.builder.asset_path(&self.filename)
  }

  pub fn shared_runtime_filename(&self) -> String {
    self.builder.asset_path(&format!("{SHARED_RUNTIME}.js"))
  }

  pub fn find_expose(&self, logical_name: &str) -> Option<&ExposedModule> {
    self.exposes.iter().find(|expose| expose.logical_name == logical_name)
  }
}
