use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RemoteOptions {
  /// `remote_app: "http://localhost:5001/assets/remoteEntry.js"`
  Url(String),
  Detailed(RemoteItemOptions),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RemoteItemOptions {
  pub external: String,
  pub external_type: Option<ExternalType>,
  pub format: Option<RemoteFormat>,
  pub from: Option<RemoteFrom>,
  pub share_scope: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalType {
  #[default]
  Url,
  /// `external` is code evaluating to a promise of the entry URL.
  Promise,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteFormat {
  #[default]
  Esm,
  Systemjs,
  Var,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteFrom {
  #[default]
  Vite,
  Webpack,
}
