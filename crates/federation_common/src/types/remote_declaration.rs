use arcstr::ArcStr;

use crate::{ExternalType, RemoteFormat, RemoteFrom};

/// A remote this build consumes modules from.
#[derive(Debug, Clone)]
pub struct RemoteDeclaration {
  pub name: ArcStr,
  pub external: String,
  pub external_type: ExternalType,
  pub format: RemoteFormat,
  pub from: RemoteFrom,
  pub scope: String,
}
