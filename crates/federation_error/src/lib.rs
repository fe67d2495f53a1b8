mod federation_error;
mod federation_warning;

use std::ops::{Deref, DerefMut};

pub use crate::{federation_error::FederationError, federation_warning::FederationWarning};

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Finds the first error of kind `E`, skipping errors of other kinds.
  pub fn find<E>(&self) -> Option<&E>
  where
    E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
  {
    self.0.iter().find_map(|error| error.downcast_ref::<E>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<FederationError> for BuildError {
  fn from(error: FederationError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn find_typed_error() {
  let error = BuildError(vec![
    anyhow::anyhow!("unrelated"),
    FederationError::MissingVersion { name: "react".to_string() }.into(),
  ]);
  assert!(matches!(error.find::<FederationError>(), Some(FederationError::MissingVersion { .. })));
  assert_eq!(error.len(), 2);
}
