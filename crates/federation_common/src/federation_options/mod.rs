pub mod builder_info;
pub mod expose_options;
pub mod normalized_federation_options;
pub mod remote_options;
pub mod shared_options;

use std::path::PathBuf;

use federation_utils::indexmap::FxIndexMap;
use serde::Deserialize;

use crate::{ExposeOptions, RemoteOptions, SharedOptions};

/// User facing federation config, in the shape `vite.config` users already write.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FederationOptions {
  pub name: Option<String>,
  /// File name of the remote entry, `remoteEntry.js` by default.
  pub filename: Option<String>,
  pub exposes: Option<FxIndexMap<String, ExposeOptions>>,
  pub shared: Option<SharedOptions>,
  pub remotes: Option<FxIndexMap<String, RemoteOptions>>,
  /// Scope used by shared dependencies and remotes that don't name one.
  pub share_scope: Option<String>,
}

impl FederationOptions {
  pub fn from_json(json: &str) -> anyhow::Result<Self> {
    Ok(serde_json::from_str(json)?)
  }
}

/// What the federation engine needs to know about the surrounding build.
#[derive(Default, Debug, Clone)]
pub struct HostOptions {
  pub cwd: Option<PathBuf>,
  pub assets_dir: Option<String>,
  pub css_code_split: Option<bool>,
}
