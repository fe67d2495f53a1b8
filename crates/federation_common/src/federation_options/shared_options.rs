use federation_utils::indexmap::FxIndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SharedOptions {
  /// `shared: ["vue", "pinia"]`
  List(Vec<String>),
  Map(FxIndexMap<String, SharedItemOptions>),
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SharedItemOptions {
  /// Skips looking the version up in the package's description file.
  pub version: Option<String>,
  pub required_version: Option<String>,
  pub share_scope: Option<String>,
  pub singleton: Option<bool>,
  pub eager: Option<bool>,
  /// `false` means the build never falls back to its own copy.
  pub import: Option<bool>,
  /// `false` drops the shared chunk from a remote's output.
  pub generate: Option<bool>,
  /// Specifier used to locate the package, the package name by default.
  pub package_path: Option<String>,
}

impl SharedOptions {
  pub fn into_items(self) -> Vec<(String, SharedItemOptions)> {
    match self {
      Self::List(names) => {
        names.into_iter().map(|name| (name, SharedItemOptions::default())).collect()
      }
      Self::Map(map) => map.into_iter().collect(),
    }
  }
}
