use crate::{ExposedModule, RemoteDeclaration, SharedDependency};

/// What the current build acts as. Always derived from the config tables, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FederationRole {
  exposes_modules: bool,
  consumes_remotes: bool,
  shares_dependencies: bool,
}

impl FederationRole {
  pub fn derive(
    exposes: &[ExposedModule],
    remotes: &[RemoteDeclaration],
    shared: &[SharedDependency],
  ) -> Self {
    Self {
      exposes_modules: !exposes.is_empty(),
      consumes_remotes: !remotes.is_empty(),
      shares_dependencies: shared.iter().any(|dep| !dep.is_removed()),
    }
  }

  pub fn is_remote(self) -> bool {
    self.exposes_modules
  }

  pub fn is_shared(self) -> bool {
    self.shares_dependencies
  }

  /// Exposes modules without also consuming remotes.
  pub fn is_pure_remote(self) -> bool {
    self.exposes_modules && !self.consumes_remotes
  }
}
