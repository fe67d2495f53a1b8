use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct BuilderInfo {
  pub cwd: PathBuf,
  /// Empty when the host writes assets next to entries.
  pub assets_dir: String,
  /// When `false` the host aggregates every stylesheet of the build into one file.
  pub css_code_split: bool,
}

impl BuilderInfo {
  /// Places `filename` in the assets directory.
  pub fn asset_path(&self, filename: &str) -> String {
    if self.assets_dir.is_empty() {
      filename.to_string()
    } else {
      format!("{}/{filename}", self.assets_dir.trim_end_matches('/'))
    }
  }
}

#[test]
fn test_asset_path() {
  let mut info =
    BuilderInfo { cwd: PathBuf::from("/"), assets_dir: "assets".to_string(), css_code_split: true };
  assert_eq!(info.asset_path("remoteEntry.js"), "assets/remoteEntry.js");
  info.assets_dir = String::new();
  assert_eq!(info.asset_path("remoteEntry.js"), "remoteEntry.js");
}
