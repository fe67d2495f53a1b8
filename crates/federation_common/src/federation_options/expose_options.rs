use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExposeOptions {
  /// `"./Button": "./src/Button.vue"`
  Path(String),
  Detailed(ExposeItemOptions),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExposeItemOptions {
  pub import: String,
}

impl ExposeOptions {
  pub fn import(&self) -> &str {
    match self {
      Self::Path(path) => path,
      Self::Detailed(item) => &item.import,
    }
  }
}
